//! Rolling sound envelope from raw microphone samples.
//!
//! Loudness is estimated as the mean absolute deviation (MAD) of the last `N`
//! samples. The mean tracks the microphone's DC bias, so only variation around it
//! counts, and a single spike is diluted across the window.

use crate::adc::AdcChannel;

/// Default window length.
pub const DEFAULT_WINDOW: usize = 16;

/// Mid-scale reading of a 10-bit ADC, used to pre-fill the window.
pub const DEFAULT_BASELINE: u16 = 512;

/// Fixed-size window of recent microphone samples.
///
/// The window is always full: it starts pre-filled with a baseline value, and each
/// new sample overwrites the oldest. `N` must be a power of two.
#[derive(Debug, Clone)]
pub struct EnvelopeDetector<const N: usize = DEFAULT_WINDOW> {
    samples: [u16; N],
    cursor: usize,
    baseline: u16,
}

impl<const N: usize> EnvelopeDetector<N> {
    const WINDOW_IS_POWER_OF_TWO: () = assert!(N.is_power_of_two(), "window must be a power of two");

    /// Creates a window filled with `baseline`.
    pub const fn new(baseline: u16) -> Self {
        let () = Self::WINDOW_IS_POWER_OF_TWO;
        Self {
            samples: [baseline; N],
            cursor: 0,
            baseline,
        }
    }

    /// Refills the window with the baseline and rewinds the cursor.
    pub fn reset(&mut self) {
        self.samples = [self.baseline; N];
        self.cursor = 0;
    }

    /// Overwrites the oldest sample.
    pub fn push_sample(&mut self, raw: u16) {
        self.samples[self.cursor] = raw;
        self.cursor = (self.cursor + 1) % N;
    }

    /// Returns the mean of the window, truncated.
    pub fn mean(&self) -> u16 {
        let total: u32 = self.samples.iter().map(|&s| u32::from(s)).sum();
        (total / N as u32) as u16
    }

    /// Returns the mean absolute deviation of the window, truncated.
    pub fn intensity(&self) -> u16 {
        let mean = self.mean();
        let deviation: u32 = self
            .samples
            .iter()
            .map(|&s| u32::from(s.abs_diff(mean)))
            .sum();
        (deviation / N as u32) as u16
    }

    /// Returns the window length.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the samples in storage order (not age order).
    pub fn samples(&self) -> &[u16; N] {
        &self.samples
    }
}

impl<const N: usize> Default for EnvelopeDetector<N> {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE)
    }
}

/// Microphone input and intensity-to-brightness mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoundConfig {
    /// ADC channel the microphone amplifier feeds.
    pub channel: AdcChannel,

    /// Value the window is pre-filled with.
    pub baseline: u16,

    /// Intensities at or below this are treated as silence.
    pub noise_floor: u16,

    /// Left shift applied after the noise floor is removed.
    pub gain_shift: u8,
}

impl SoundConfig {
    /// Sets the microphone channel.
    pub fn with_channel(mut self, channel: AdcChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Sets the noise floor.
    pub fn with_noise_floor(mut self, noise_floor: u16) -> Self {
        self.noise_floor = noise_floor;
        self
    }

    /// Sets the gain shift.
    pub fn with_gain_shift(mut self, gain_shift: u8) -> Self {
        self.gain_shift = gain_shift;
        self
    }

    /// Maps an intensity onto 0-255 brightness.
    ///
    /// Removes the noise floor, then saturates before shifting so the result
    /// cannot overflow a byte.
    pub fn brightness(&self, intensity: u16) -> u8 {
        let shift = u32::from(self.gain_shift.min(7));
        let level = intensity.saturating_sub(self.noise_floor);
        let ceiling = 255u16 >> shift;
        (level.min(ceiling) << shift) as u8
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            channel: AdcChannel(1),
            baseline: DEFAULT_BASELINE,
            noise_floor: 40,
            gain_shift: 2,
        }
    }
}
