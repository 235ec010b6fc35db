//! Sound-reactive sequence.

use crate::context::{Board, Cancelled, Context};
use crate::time::{TimeSource, Timeout};

const DECAY_EVERY_MS: u64 = 2;

/// Drives every channel from the microphone envelope with peak hold.
///
/// Loud input lifts the level at once; silence lets it sink by one step every
/// couple of milliseconds.
pub fn sound<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    ctx.begin(timeout);
    ctx.reset_envelope();

    let mut level = 0u8;
    let mut last_decay = ctx.now_ms();
    while ctx.running() {
        let heard = ctx.listen();

        let now = ctx.now_ms();
        if now.wrapping_sub(last_decay) >= DECAY_EVERY_MS {
            level = level.saturating_sub(1);
            last_decay = now;
        }

        level = level.max(heard);
        ctx.set_all(level);
        ctx.checkpoint()?;
    }
    Ok(())
}
