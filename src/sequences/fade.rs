//! Direct fades.

use super::ramp;
use crate::context::{Board, Cancelled, Context};
use crate::output::Channel;
use crate::time::{TimeSource, Timeout};

/// Fades each channel in one after another, then each out in the same order.
pub fn cascade<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    while ctx.running() {
        for channel in Channel::ALL {
            ramp(ctx, &[channel], 0, u8::MAX, 1, 1)?;
        }
        for channel in Channel::ALL {
            ramp(ctx, &[channel], u8::MAX, 0, 1, 1)?;
        }
    }
    Ok(())
}

/// Fades each channel in one after another, then all out together.
pub fn fill_then_fade<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    while ctx.running() {
        for channel in Channel::ALL {
            ramp(ctx, &[channel], 0, u8::MAX, 1, 2)?;
        }
        ramp(ctx, &Channel::ALL, u8::MAX, 0, 1, 4)?;
    }
    Ok(())
}

/// Fades all channels in and out together.
pub fn breathe<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    while ctx.running() {
        ramp(ctx, &Channel::ALL, 0, u8::MAX, 1, 1)?;
        ramp(ctx, &Channel::ALL, u8::MAX, 0, 1, 1)?;
        ctx.wait(100)?;
    }
    Ok(())
}

/// Quick in-and-out fade of all channels.
pub fn pulse<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    while ctx.running() {
        ramp(ctx, &Channel::ALL, 0, u8::MAX, 4, 1)?;
        ramp(ctx, &Channel::ALL, u8::MAX, 0, 4, 1)?;
        ctx.wait(30)?;
    }
    Ok(())
}
