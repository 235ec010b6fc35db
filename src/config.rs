//! Runner configuration and validation.

use crate::adc::ADC_MAX;
use crate::button::ButtonConfig;
use crate::envelope::SoundConfig;
use crate::time::ElapsedCheck;

/// How long each randomly picked sequence runs in demo mode.
pub const DEFAULT_DEMO_TIMEOUT_MS: u32 = 8000;

/// Everything the runner needs besides hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Button input and long-press timing.
    pub button: ButtonConfig,

    /// Microphone input and brightness mapping.
    pub sound: SoundConfig,

    /// Time each demo sequence runs before another is picked.
    pub demo_timeout_ms: u32,

    /// How sequences decide their timeout has elapsed.
    pub elapsed_check: ElapsedCheck,
}

impl Config {
    /// Sets the button configuration.
    pub fn with_button(mut self, button: ButtonConfig) -> Self {
        self.button = button;
        self
    }

    /// Sets the sound configuration.
    pub fn with_sound(mut self, sound: SoundConfig) -> Self {
        self.sound = sound;
        self
    }

    /// Sets the demo timeout.
    pub fn with_demo_timeout_ms(mut self, demo_timeout_ms: u32) -> Self {
        self.demo_timeout_ms = demo_timeout_ms;
        self
    }

    /// Sets the elapsed-time policy.
    pub fn with_elapsed_check(mut self, elapsed_check: ElapsedCheck) -> Self {
        self.elapsed_check = elapsed_check;
        self
    }

    /// Checks the configuration for values the hardware cannot honour.
    ///
    /// # Errors
    /// * `ThresholdOutOfRange` - Button threshold above the ADC range
    /// * `GainTooLarge` - Sound gain shift of 8 or more
    /// * `ZeroDemoTimeout` - Demo sequences would never animate
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.button.threshold > ADC_MAX + 1 {
            return Err(ConfigError::ThresholdOutOfRange(self.button.threshold));
        }

        if self.sound.gain_shift >= 8 {
            return Err(ConfigError::GainTooLarge(self.sound.gain_shift));
        }

        if self.demo_timeout_ms == 0 {
            return Err(ConfigError::ZeroDemoTimeout);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            button: ButtonConfig::default(),
            sound: SoundConfig::default(),
            demo_timeout_ms: DEFAULT_DEMO_TIMEOUT_MS,
            elapsed_check: ElapsedCheck::default(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Button threshold can never be reached by a 10-bit reading.
    ThresholdOutOfRange(u16),

    /// Gain shift would push every level past a byte.
    GainTooLarge(u8),

    /// Demo timeout of zero.
    ZeroDemoTimeout,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ThresholdOutOfRange(threshold) => {
                write!(
                    f,
                    "button threshold {} exceeds ADC range 0-{}",
                    threshold, ADC_MAX
                )
            }
            ConfigError::GainTooLarge(shift) => {
                write!(f, "sound gain shift {} must be below 8", shift)
            }
            ConfigError::ZeroDemoTimeout => {
                write!(f, "demo timeout must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
