//! Flashes and flickers.

use super::ramp;
use crate::context::{Board, Cancelled, Context};
use crate::output::Channel;
use crate::time::{TimeSource, Timeout};

/// Double-flashes each channel on in turn, then fades everything out.
pub fn flash_in<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    while ctx.running() {
        for channel in Channel::ALL {
            for _ in 0..2 {
                ctx.set(channel, u8::MAX);
                ctx.wait(50)?;
                ctx.set(channel, 0);
                ctx.wait(50)?;
            }
            ctx.set(channel, u8::MAX);
            ctx.wait(if channel == Channel::D { 500 } else { 100 })?;
        }
        ramp(ctx, &Channel::ALL, u8::MAX, 0, 1, 1)?;
        ctx.wait(500)?;
    }
    Ok(())
}

// (steps, per-step change, per-step delay ms)
const BROWNOUT_PHASES: [(u16, i8, u32); 13] = [
    (100, 0, 5),
    (60, -1, 3),
    (60, 1, 4),
    (100, 0, 10),
    (40, 1, 2),
    (40, -1, 2),
    (30, -1, 5),
    (100, 0, 20),
    (30, 1, 5),
    (100, 0, 30),
    (40, 1, 2),
    (100, 0, 20),
    (40, -1, 2),
];

const BROWNOUT_BASE: u8 = 60;

/// Dim glow with sags and surges, like a failing supply.
///
/// Levels move with 8-bit register arithmetic, so the deepest sag wraps into a
/// one-step full-brightness spike.
pub fn brownout<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    if ctx.running() {
        for level in 0..BROWNOUT_BASE {
            ctx.set_all(level);
            ctx.pause(2);
            ctx.checkpoint()?;
        }
    }
    while ctx.running() {
        for &(steps, delta, delay_ms) in &BROWNOUT_PHASES {
            for _ in 0..steps {
                if delta != 0 {
                    ctx.nudge_all(delta);
                }
                ctx.pause(delay_ms);
                ctx.checkpoint()?;
            }
        }
    }
    Ok(())
}

/// Snaps all channels up, then lets them decay slowly.
pub fn strobe_decay<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    while ctx.running() {
        for _ in 0..100 {
            ctx.nudge_all(2);
            ctx.checkpoint()?;
        }
        for _ in 0..8 {
            ctx.pause(1);
            ctx.checkpoint()?;
        }
        for _ in 0..200 {
            ctx.nudge_all(-1);
            ctx.pause(35);
            ctx.checkpoint()?;
        }
        for _ in 0..100 {
            ctx.pause(10);
            ctx.checkpoint()?;
        }
    }
    Ok(())
}
