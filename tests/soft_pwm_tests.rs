//! Integration tests for the emulated PWM channel

mod common;
use common::*;

use core::cell::Cell;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin};
use proptest::prelude::*;
use sign_sequencer::{CompareMatchHandler, OverflowHandler, SoftPwm};

/// Pin whose level is visible from outside the PWM that owns it.
struct SharedPin<'a>(&'a Cell<bool>);

impl ErrorType for SharedPin<'_> {
    type Error = Infallible;
}

impl OutputPin for SharedPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

fn on_time(level: &Cell<bool>, duty: u8) -> u32 {
    let pwm = SoftPwm::new();
    pwm.bind(SharedPin(level));
    pwm.set_duty(duty);
    simulate_period(&pwm, || level.get())
}

#[test]
fn bind_drives_pin_low() {
    let level = Cell::new(true);
    let pwm = SoftPwm::new();
    pwm.bind(SharedPin(&level));
    assert!(!level.get());
}

#[test]
fn duties_at_or_below_floor_stay_dark() {
    let level = Cell::new(false);
    for duty in 0..=4 {
        assert_eq!(on_time(&level, duty), 0, "duty {duty}");
    }
}

#[test]
fn first_visible_duty_is_just_above_floor() {
    let level = Cell::new(false);
    assert_eq!(on_time(&level, 5), 5);
}

#[test]
fn full_duty_is_high_until_final_count() {
    let level = Cell::new(false);
    assert_eq!(on_time(&level, 255), 255);
}

#[test]
fn compare_match_always_clears() {
    let level = Cell::new(false);
    let pwm = SoftPwm::new();
    pwm.bind(SharedPin(&level));
    pwm.set_duty(100);
    pwm.on_overflow();
    assert!(level.get());

    // Duty dropped mid-period: the next compare still ends the pulse
    pwm.set_duty(0);
    pwm.on_compare_match();
    assert!(!level.get());

    pwm.on_overflow();
    assert!(!level.get());
}

proptest! {
    #[test]
    fn on_time_is_monotonic_in_duty(a in any::<u8>(), b in any::<u8>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let level = Cell::new(false);
        prop_assert!(on_time(&level, low) <= on_time(&level, high));
    }
}
