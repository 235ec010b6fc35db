//! The stock sequence catalog.
//!
//! Every sequence follows the [`Context`](crate::context::Context) protocol: begin,
//! then step and checkpoint until the timeout elapses or the button is pressed.

mod chase;
mod fade;
mod flash;
mod sound;
mod twinkle;

pub use chase::{bounce, chase};
pub use fade::{breathe, cascade, fill_then_fade, pulse};
pub use flash::{brownout, flash_in, strobe_decay};
pub use sound::sound;
pub use twinkle::{shimmer, twinkle};

use crate::catalog::{Catalog, CatalogError};
use crate::context::{Board, Cancelled, Context};
use crate::output::Channel;
use crate::time::TimeSource;

/// Number of entries in [`standard`].
pub const STANDARD_LEN: usize = 12;

/// Builds the stock catalog in rotation order.
///
/// `sound` is rotation-only: demo mode cycles through the other eleven.
pub fn standard<B: Board, T: TimeSource>() -> Result<Catalog<B, T, STANDARD_LEN>, CatalogError> {
    Catalog::<B, T, STANDARD_LEN>::builder()
        .sequence("cascade", cascade)?
        .sequence("fill_then_fade", fill_then_fade)?
        .sequence("flash_in", flash_in)?
        .sequence("breathe", breathe)?
        .sequence("pulse", pulse)?
        .sequence("chase", chase)?
        .sequence("bounce", bounce)?
        .sequence("brownout", brownout)?
        .sequence("strobe_decay", strobe_decay)?
        .sequence("twinkle", twinkle)?
        .sequence("shimmer", shimmer)?
        .rotation_only("sound", sound)?
        .build()
}

/// Moves `channels` from `from` to `to` in steps of `stride`, pausing `delay_ms`
/// and checkpointing after every step. Ends exactly on `to`.
fn ramp<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    channels: &[Channel],
    from: u8,
    to: u8,
    stride: u8,
    delay_ms: u32,
) -> Result<(), Cancelled> {
    let stride = stride.max(1);
    let mut level = from;
    while level != to {
        level = if to > level {
            level.saturating_add(stride).min(to)
        } else {
            level.saturating_sub(stride).max(to)
        };
        for &channel in channels {
            ctx.set(channel, level);
        }
        if delay_ms > 0 {
            ctx.pause(delay_ms);
        }
        ctx.checkpoint()?;
    }
    Ok(())
}
