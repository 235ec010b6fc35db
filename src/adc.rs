//! Blocking analog sampling.

/// Largest value a 10-bit conversion can return.
pub const ADC_MAX: u16 = 1023;

/// Identifies an analog input channel on the ADC multiplexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcChannel(pub u8);

impl From<u8> for AdcChannel {
    fn from(channel: u8) -> Self {
        AdcChannel(channel)
    }
}

/// Trait for abstracting the analog-to-digital converter.
///
/// Implement this for your board's ADC. Each call selects `channel`, starts a single
/// conversion and busy-waits for the result.
pub trait AnalogSampler {
    /// Performs one blocking conversion and returns the raw reading (0..=[`ADC_MAX`]).
    fn sample(&mut self, channel: AdcChannel) -> u16;
}

impl<A: AnalogSampler + ?Sized> AnalogSampler for &mut A {
    fn sample(&mut self, channel: AdcChannel) -> u16 {
        (**self).sample(channel)
    }
}
