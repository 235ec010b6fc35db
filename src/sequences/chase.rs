//! Chases: light handed from channel to channel by crossfading.

use crate::context::{Board, Cancelled, Context};
use crate::output::Channel;
use crate::time::{TimeSource, Timeout};

const PEAK: u8 = 200;
const STRIDE: usize = 2;

/// Crossfades `from` down and `to` up over `0..=PEAK`. Either side may be absent
/// at the ends of the chase.
fn hand_off<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    from: Option<Channel>,
    to: Option<Channel>,
) -> Result<(), Cancelled> {
    for level in (0..=PEAK).step_by(STRIDE) {
        if let Some(channel) = from {
            ctx.set(channel, PEAK - level);
        }
        if let Some(channel) = to {
            ctx.set(channel, level);
        }
        ctx.checkpoint()?;
    }
    Ok(())
}

fn run_through<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    order: [Channel; 4],
) -> Result<(), Cancelled> {
    hand_off(ctx, None, Some(order[0]))?;
    for pair in order.windows(2) {
        hand_off(ctx, Some(pair[0]), Some(pair[1]))?;
    }
    hand_off(ctx, Some(order[3]), None)?;
    ctx.wait(100)
}

/// Chases from the first channel to the last.
pub fn chase<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    while ctx.running() {
        run_through(ctx, Channel::ALL)?;
    }
    Ok(())
}

/// Chases from the first channel to the last and back.
pub fn bounce<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    let mut reversed = Channel::ALL;
    reversed.reverse();

    ctx.begin(timeout);
    while ctx.running() {
        run_through(ctx, Channel::ALL)?;
        run_through(ctx, reversed)?;
    }
    Ok(())
}
