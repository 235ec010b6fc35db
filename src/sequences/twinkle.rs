//! Random sparkles.

use crate::context::{Board, Cancelled, Context};
use crate::output::{CHANNEL_COUNT, Channel};
use crate::time::{TimeSource, Timeout};

const TWINKLE_ODDS: u32 = 50;
const SHIMMER_ODDS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drift {
    Still,
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy)]
struct Sparkle {
    levels: [u8; CHANNEL_COUNT],
    drift: [Drift; CHANNEL_COUNT],
}

impl Sparkle {
    fn at(level: u8) -> Self {
        Self {
            levels: [level; CHANNEL_COUNT],
            drift: [Drift::Still; CHANNEL_COUNT],
        }
    }

    /// Advances every drifting channel one step. A channel that reaches `peak`
    /// turns into `after_peak`; one that reaches zero turns into `after_floor`.
    fn advance(&mut self, after_peak: Drift, after_floor: Drift) {
        for (level, drift) in self.levels.iter_mut().zip(self.drift.iter_mut()) {
            match *drift {
                Drift::Rising => {
                    *level = level.saturating_add(1);
                    if *level == u8::MAX {
                        *drift = after_peak;
                    }
                }
                Drift::Falling => {
                    *level = level.saturating_sub(1);
                    if *level == 0 {
                        *drift = after_floor;
                    }
                }
                Drift::Still => {}
            }
        }
    }

    fn show<B: Board, T: TimeSource>(&self, ctx: &mut Context<'_, B, T>) {
        for (channel, &level) in Channel::ALL.into_iter().zip(self.levels.iter()) {
            ctx.set(channel, level);
        }
    }

    /// With odds of one in `odds`, starts a random still channel drifting.
    fn maybe_kick<B: Board, T: TimeSource>(
        &mut self,
        ctx: &mut Context<'_, B, T>,
        odds: u32,
        drift: Drift,
    ) {
        if ctx.random(odds) != 0 {
            return;
        }
        let pick = ctx.random(CHANNEL_COUNT as u32) as usize;
        if self.drift[pick] == Drift::Still {
            self.drift[pick] = drift;
        }
    }
}

/// Dark sign; random channels flare up to full and fade back.
pub fn twinkle<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    let mut sparkle = Sparkle::at(0);
    ctx.begin(timeout);
    while ctx.running() {
        sparkle.advance(Drift::Falling, Drift::Still);
        sparkle.show(ctx);
        sparkle.maybe_kick(ctx, TWINKLE_ODDS, Drift::Rising);
        ctx.checkpoint()?;
    }
    Ok(())
}

/// Lit sign; random channels dip to dark and recover.
pub fn shimmer<B: Board, T: TimeSource>(
    ctx: &mut Context<'_, B, T>,
    timeout: Timeout,
) -> Result<(), Cancelled> {
    let mut sparkle = Sparkle::at(u8::MAX);
    ctx.begin(timeout);
    ctx.set_all(u8::MAX);
    while ctx.running() {
        sparkle.advance(Drift::Still, Drift::Rising);
        sparkle.show(ctx);
        sparkle.maybe_kick(ctx, SHIMMER_ODDS, Drift::Falling);
        ctx.checkpoint()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_channel_turns_at_peak_and_stops_at_floor() {
        let mut sparkle = Sparkle::at(0);
        sparkle.drift[2] = Drift::Rising;
        for _ in 0..255 {
            sparkle.advance(Drift::Falling, Drift::Still);
        }
        assert_eq!(sparkle.levels[2], 255);
        assert_eq!(sparkle.drift[2], Drift::Falling);
        for _ in 0..255 {
            sparkle.advance(Drift::Falling, Drift::Still);
        }
        assert_eq!(sparkle.levels[2], 0);
        assert_eq!(sparkle.drift[2], Drift::Still);
        assert_eq!(sparkle.levels[0], 0);
    }

    #[test]
    fn falling_channel_recovers_and_settles_at_full() {
        let mut sparkle = Sparkle::at(255);
        sparkle.drift[0] = Drift::Falling;
        for _ in 0..510 {
            sparkle.advance(Drift::Still, Drift::Rising);
        }
        assert_eq!(sparkle.levels, [255; 4]);
        assert_eq!(sparkle.drift[0], Drift::Still);
    }
}
