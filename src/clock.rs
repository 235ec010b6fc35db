//! Tick-driven monotonic millisecond clock.
//!
//! A free-running hardware timer overflows roughly every 0.2 ms. Each overflow
//! calls [`Clock::tick`]; every [`DEFAULT_TICKS_PER_MS`] ticks the millisecond
//! counter advances. No calibration is performed, so the clock is only as accurate
//! as the timer's overflow period.

use core::cell::Cell;
use critical_section::Mutex;

use crate::interrupt::OverflowHandler;
use crate::time::TimeSource;

/// Timer overflows per millisecond.
pub const DEFAULT_TICKS_PER_MS: u8 = 5;

#[derive(Debug, Clone, Copy)]
struct Counters {
    ticks: u8,
    millis: u64,
}

/// Millisecond counter shared between the tick interrupt and the main loop.
///
/// The counter is wider than any atomic the target supports, so both the
/// interrupt and readers go through a critical section.
///
/// ```ignore
/// static CLOCK: Clock = Clock::new();
///
/// #[avr_device::interrupt(attiny85)]
/// fn TIMER0_OVF() {
///     CLOCK.on_overflow();
/// }
/// ```
pub struct Clock {
    counters: Mutex<Cell<Counters>>,
    ticks_per_ms: u8,
}

impl Clock {
    /// Creates a clock at 0 ms using [`DEFAULT_TICKS_PER_MS`].
    pub const fn new() -> Self {
        Self::with_ticks_per_ms(DEFAULT_TICKS_PER_MS)
    }

    /// Creates a clock at 0 ms advancing once every `ticks_per_ms` ticks.
    ///
    /// # Panics
    /// Panics if `ticks_per_ms` is zero.
    pub const fn with_ticks_per_ms(ticks_per_ms: u8) -> Self {
        assert!(ticks_per_ms > 0, "ticks_per_ms must be non-zero");
        Self {
            counters: Mutex::new(Cell::new(Counters { ticks: 0, millis: 0 })),
            ticks_per_ms,
        }
    }

    /// Returns this clock with the millisecond counter seeded to `millis`.
    pub const fn starting_at(self, millis: u64) -> Self {
        Self {
            counters: Mutex::new(Cell::new(Counters { ticks: 0, millis })),
            ticks_per_ms: self.ticks_per_ms,
        }
    }

    /// Advances the clock by one timer overflow.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let cell = self.counters.borrow(cs);
            let mut counters = cell.get();
            counters.ticks += 1;
            if counters.ticks >= self.ticks_per_ms {
                counters.ticks = 0;
                counters.millis = counters.millis.wrapping_add(1);
            }
            cell.set(counters);
        });
    }

    /// Returns milliseconds since startup (or since the seeded value).
    pub fn now_ms(&self) -> u64 {
        critical_section::with(|cs| self.counters.borrow(cs).get().millis)
    }

    /// Returns the configured ticks per millisecond.
    pub fn ticks_per_ms(&self) -> u8 {
        self.ticks_per_ms
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for Clock {
    fn now_ms(&self) -> u64 {
        Clock::now_ms(self)
    }
}

impl OverflowHandler for Clock {
    #[inline]
    fn on_overflow(&self) {
        self.tick();
    }
}
