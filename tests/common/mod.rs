//! Shared test infrastructure for sign-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::ops::Range;
use embedded_hal::delay::DelayNs;
use rand_core::RngCore;
use sign_sequencer::{
    ADC_MAX, AdcChannel, AnalogSampler, CHANNEL_COUNT, Channel, Clock, Config, DutyOutputs,
    SettingsStore, SystemReset,
};

pub const BUTTON_CHANNEL: AdcChannel = AdcChannel(0);
pub const MIC_CHANNEL: AdcChannel = AdcChannel(1);

// ============================================================================
// Mock Board
// ============================================================================

/// Host stand-in for the sign's hardware.
///
/// Time only moves when the board is used: every delay ticks the shared clock for
/// its full length, every ADC conversion ticks it once. The button reads as held
/// during the scripted millisecond ranges.
pub struct MockBoard<'c> {
    clock: &'c Clock,
    duties: [u8; CHANNEL_COUNT],
    held: Vec<Range<u64>>,
    mic: Box<dyn FnMut(u64) -> u16 + 'c>,
    stored: u8,
    rng_state: u64,
    ns_carry: u64,
    pub button_samples: usize,
    pub stores: usize,
    pub restarts: usize,
    pub delayed_ms: u64,
}

impl<'c> MockBoard<'c> {
    pub fn new(clock: &'c Clock) -> Self {
        Self {
            clock,
            duties: [0; CHANNEL_COUNT],
            held: Vec::new(),
            mic: Box::new(|_| 512),
            stored: 0,
            rng_state: 0x2545_f491_4f6c_dd1d,
            ns_carry: 0,
            button_samples: 0,
            stores: 0,
            restarts: 0,
            delayed_ms: 0,
        }
    }

    /// Starts with `byte` in the settings store.
    pub fn with_stored(mut self, byte: u8) -> Self {
        self.stored = byte;
        self
    }

    /// Replaces the microphone signal; the closure gets the current time.
    pub fn with_mic(mut self, mic: impl FnMut(u64) -> u16 + 'c) -> Self {
        self.mic = Box::new(mic);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_state = seed.max(1);
        self
    }

    /// Holds the button from `start_ms` for `duration_ms`.
    pub fn hold(&mut self, start_ms: u64, duration_ms: u64) {
        self.held.push(start_ms..start_ms + duration_ms);
    }

    /// Holds the button from now for `duration_ms`.
    pub fn hold_now(&mut self, duration_ms: u64) {
        let now = self.clock.now_ms();
        self.hold(now, duration_ms);
    }

    /// Short press starting now: held across the debounce, released before the hold check.
    pub fn tap(&mut self) {
        self.hold_now(1000);
    }

    /// Long press starting now: held past the hold check.
    pub fn long_press(&mut self) {
        self.hold_now(5000);
    }

    pub fn stored(&self) -> u8 {
        self.stored
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn advance_ticks(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.clock.tick();
        }
    }

    fn button_held(&self) -> bool {
        let now = self.clock.now_ms();
        self.held.iter().any(|range| range.contains(&now))
    }
}

impl DutyOutputs for MockBoard<'_> {
    fn set_duty(&mut self, channel: Channel, duty: u8) {
        self.duties[channel.index()] = duty;
    }

    fn duty(&self, channel: Channel) -> u8 {
        self.duties[channel.index()]
    }
}

impl AnalogSampler for MockBoard<'_> {
    fn sample(&mut self, channel: AdcChannel) -> u16 {
        let reading = if channel == BUTTON_CHANNEL {
            self.button_samples += 1;
            if self.button_held() { 0 } else { ADC_MAX }
        } else if channel == MIC_CHANNEL {
            let now = self.clock.now_ms();
            (self.mic)(now)
        } else {
            0
        };
        self.advance_ticks(1);
        reading
    }
}

impl DelayNs for MockBoard<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let tick_ns = 1_000_000 / u64::from(self.clock.ticks_per_ms());
        let total = self.ns_carry + u64::from(ns);
        self.ns_carry = total % tick_ns;
        self.advance_ticks(total / tick_ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delayed_ms += u64::from(ms);
        self.advance_ticks(u64::from(ms) * u64::from(self.clock.ticks_per_ms()));
    }
}

impl SettingsStore for MockBoard<'_> {
    fn load(&mut self) -> u8 {
        self.stored
    }

    fn store(&mut self, value: u8) {
        self.stores += 1;
        self.stored = value;
    }
}

impl SystemReset for MockBoard<'_> {
    fn restart(&mut self) {
        self.restarts += 1;
    }
}

// xorshift64
impl RngCore for MockBoard<'_> {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Configuration with a short demo timeout so demo steps finish quickly.
pub fn quick_config(demo_timeout_ms: u32) -> Config {
    Config::default().with_demo_timeout_ms(demo_timeout_ms)
}

/// Simulates one software PWM period of a 256-count timer and returns how many
/// counts the pin spent high.
pub fn simulate_period<P: embedded_hal::digital::OutputPin>(
    pwm: &sign_sequencer::SoftPwm<P>,
    is_high: impl Fn() -> bool,
) -> u32 {
    use sign_sequencer::{CompareMatchHandler, OverflowHandler};

    let compare = pwm.duty();
    let mut high_counts = 0;
    pwm.on_overflow();
    for count in 0..=u8::MAX {
        if count == compare {
            pwm.on_compare_match();
        }
        if is_high() {
            high_counts += 1;
        }
    }
    high_counts
}
