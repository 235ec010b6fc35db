//! Debounced analog button and long-press reset.
//!
//! The button pulls a voltage divider below a threshold while held. Polling is
//! tiered: a released button returns immediately; a held one is re-checked after
//! the debounce delay, then again after the hold delay. A press that survives both
//! is a long press, which blinks the lights, persists the resume point and restarts
//! the device.
//!
//! Because every animation loop polls the button, the blocking delays here are also
//! the only places a running sequence gives up time to user input.

use embedded_hal::delay::DelayNs;

use crate::adc::{AdcChannel, AnalogSampler};
use crate::output::DutyOutputs;
use crate::settings::{SettingsStore, SystemReset};

/// Result of one button poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Button not held.
    None,

    /// Short press: the running sequence should return control.
    Pressed,

    /// Held through both delays. The restart has been requested.
    LongPressHold,
}

impl ButtonState {
    /// Returns true for any press.
    #[inline]
    pub fn is_pressed(self) -> bool {
        self != ButtonState::None
    }
}

/// Button input and long-press timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// ADC channel on the divider.
    pub channel: AdcChannel,

    /// Readings below this count as held. Depends on the divider resistors.
    pub threshold: u16,

    /// Delay before the first re-sample.
    pub debounce_ms: u32,

    /// Further delay before a held button counts as a long press.
    pub hold_ms: u32,

    /// On/off blinks shown to confirm a long press.
    pub confirm_blinks: u8,

    /// Length of each blink half.
    pub blink_ms: u32,

    /// Pause between the confirmation blinks and the restart.
    pub settle_ms: u32,
}

impl ButtonConfig {
    /// Sets the divider channel.
    pub fn with_channel(mut self, channel: AdcChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Sets the press threshold.
    pub fn with_threshold(mut self, threshold: u16) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the debounce and hold delays.
    pub fn with_timing(mut self, debounce_ms: u32, hold_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self.hold_ms = hold_ms;
        self
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            channel: AdcChannel(0),
            threshold: 1000,
            debounce_ms: 300,
            hold_ms: 3000,
            confirm_blinks: 10,
            blink_ms: 50,
            settle_ms: 2000,
        }
    }
}

/// Polls the analog button.
///
/// Stateless between polls: every call makes a fresh decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonMonitor {
    config: ButtonConfig,
}

impl ButtonMonitor {
    /// Creates a monitor.
    pub fn new(config: ButtonConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Returns true if a single reading means the button is held.
    #[inline]
    pub fn is_active(&self, reading: u16) -> bool {
        reading < self.config.threshold
    }

    /// Samples the button and classifies the press.
    ///
    /// Returns [`ButtonState::None`] after one conversion when released. Otherwise
    /// blocks for the debounce delay and, if still held, the hold delay. On a long
    /// press, `resume_index` is written to the settings store before the restart.
    pub fn poll<B>(&self, board: &mut B, resume_index: u8) -> ButtonState
    where
        B: AnalogSampler + DelayNs + DutyOutputs + SettingsStore + SystemReset,
    {
        let cfg = &self.config;

        if !self.is_active(board.sample(cfg.channel)) {
            return ButtonState::None;
        }

        board.delay_ms(cfg.debounce_ms);
        if !self.is_active(board.sample(cfg.channel)) {
            return ButtonState::Pressed;
        }

        board.delay_ms(cfg.hold_ms);
        if !self.is_active(board.sample(cfg.channel)) {
            #[cfg(feature = "defmt")]
            defmt::debug!("button: press");
            return ButtonState::Pressed;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("button: long press, saving resume point {}", resume_index);

        self.confirm(board);
        board.delay_ms(cfg.settle_ms);
        board.store(resume_index);
        board.restart();

        ButtonState::LongPressHold
    }

    fn confirm<B: DelayNs + DutyOutputs>(&self, board: &mut B) {
        for _ in 0..self.config.confirm_blinks {
            board.set_all(u8::MAX);
            board.delay_ms(self.config.blink_ms);
            board.set_all(0);
            board.delay_ms(self.config.blink_ms);
        }
    }
}
