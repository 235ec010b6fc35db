//! Software PWM emulation for a pin without a hardware compare output.
//!
//! A free-running timer raises an overflow interrupt at the start of every PWM
//! period and a compare-match interrupt when the counter reaches the duty value.
//! The overflow handler drives the pin high, the compare handler drives it low, and
//! the result is fast PWM at the cost of one interrupt's latency per edge.
//!
//! The board's overflow interrupt should also reload the timer's compare register
//! from [`SoftPwm::duty`], so a new duty value takes effect on the next period.

use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;
use portable_atomic::{AtomicU8, Ordering};

use crate::interrupt::{CompareMatchHandler, OverflowHandler};

/// Duty values at or below this are never switched on.
///
/// At very low duty the compare interrupt would fire before the overflow
/// interrupt has finished raising the pin, which shows up as flicker.
pub const DEFAULT_FLICKER_FLOOR: u8 = 4;

/// Emulated PWM channel: one duty register plus the pin the interrupts toggle.
///
/// The main loop is the only writer of the duty register; the interrupt handlers
/// only read it and only write the pin.
pub struct SoftPwm<P> {
    duty: AtomicU8,
    flicker_floor: u8,
    pin: Mutex<RefCell<Option<P>>>,
}

impl<P: OutputPin> SoftPwm<P> {
    /// Creates an unbound channel at duty 0 with [`DEFAULT_FLICKER_FLOOR`].
    pub const fn new() -> Self {
        Self::with_flicker_floor(DEFAULT_FLICKER_FLOOR)
    }

    /// Creates an unbound channel at duty 0 that suppresses duty values `<= floor`.
    pub const fn with_flicker_floor(floor: u8) -> Self {
        Self {
            duty: AtomicU8::new(0),
            flicker_floor: floor,
            pin: Mutex::new(RefCell::new(None)),
        }
    }

    /// Hands the output pin to the interrupt handlers.
    ///
    /// Call once during setup, before enabling the timer interrupts. The pin starts low.
    pub fn bind(&self, mut pin: P) {
        let _ = pin.set_low();
        critical_section::with(|cs| {
            *self.pin.borrow_ref_mut(cs) = Some(pin);
        });
    }

    /// Sets the duty register. Takes effect on the next PWM period.
    #[inline]
    pub fn set_duty(&self, duty: u8) {
        self.duty.store(duty, Ordering::Relaxed);
    }

    /// Returns the duty register.
    #[inline]
    pub fn duty(&self) -> u8 {
        self.duty.load(Ordering::Relaxed)
    }

    /// Returns the flicker floor.
    pub fn flicker_floor(&self) -> u8 {
        self.flicker_floor
    }

    /// Returns true if a period started with the current duty drives the pin high.
    #[inline]
    pub fn switches_on(&self) -> bool {
        self.duty() > self.flicker_floor
    }

    fn with_pin(&self, f: impl FnOnce(&mut P)) {
        critical_section::with(|cs| {
            if let Some(pin) = self.pin.borrow_ref_mut(cs).as_mut() {
                f(pin);
            }
        });
    }
}

impl<P: OutputPin> Default for SoftPwm<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin> OverflowHandler for SoftPwm<P> {
    fn on_overflow(&self) {
        if self.switches_on() {
            self.with_pin(|pin| {
                let _ = pin.set_high();
            });
        }
    }
}

impl<P: OutputPin> CompareMatchHandler for SoftPwm<P> {
    fn on_compare_match(&self) {
        self.with_pin(|pin| {
            let _ = pin.set_low();
        });
    }
}
