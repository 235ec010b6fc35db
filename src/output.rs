//! Duty-cycle outputs for the four light channels.
//!
//! Three channels have native hardware PWM; the fourth is driven by [`SoftPwm`].
//! Sequences only see the [`DutyOutputs`] trait, so boards can route the channels
//! however they like. [`QuadPwm`] is the stock routing built on `embedded-hal`.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::soft_pwm::SoftPwm;

/// Number of output channels.
pub const CHANNEL_COUNT: usize = 4;

/// One of the four light channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// First native hardware PWM channel.
    A,
    /// Second native hardware PWM channel.
    B,
    /// Third native hardware PWM channel.
    C,
    /// Software-emulated channel.
    D,
}

impl Channel {
    /// All channels in sign order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::A, Channel::B, Channel::C, Channel::D];

    /// Returns the channel's position in [`Channel::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
            Channel::C => 2,
            Channel::D => 3,
        }
    }

    /// Returns true for the channel without native PWM.
    #[inline]
    pub fn is_emulated(self) -> bool {
        self == Channel::D
    }
}

/// Trait for abstracting the four duty-cycle registers.
///
/// Writes take effect at the next PWM period boundary. Handle any hardware errors
/// internally - these methods cannot fail.
pub trait DutyOutputs {
    /// Sets one channel's duty cycle (0 = off, 255 = fully on).
    fn set_duty(&mut self, channel: Channel, duty: u8);

    /// Returns the duty cycle last written to `channel`.
    fn duty(&self, channel: Channel) -> u8;

    /// Sets every channel to the same duty cycle.
    fn set_all(&mut self, duty: u8) {
        for channel in Channel::ALL {
            self.set_duty(channel, duty);
        }
    }

    /// Returns all four duty cycles in [`Channel::ALL`] order.
    fn duties(&self) -> [u8; CHANNEL_COUNT] {
        Channel::ALL.map(|channel| self.duty(channel))
    }
}

impl<O: DutyOutputs + ?Sized> DutyOutputs for &mut O {
    fn set_duty(&mut self, channel: Channel, duty: u8) {
        (**self).set_duty(channel, duty);
    }

    fn duty(&self, channel: Channel) -> u8 {
        (**self).duty(channel)
    }
}

/// Three native PWM channels plus one emulated channel.
///
/// Native channels are scaled from 0-255 onto their `max_duty_cycle()`.
pub struct QuadPwm<'p, A, B, C, P> {
    a: A,
    b: B,
    c: C,
    d: &'p SoftPwm<P>,
    mirror: [u8; 3],
}

impl<'p, A, B, C, P> QuadPwm<'p, A, B, C, P>
where
    A: SetDutyCycle,
    B: SetDutyCycle,
    C: SetDutyCycle,
    P: OutputPin,
{
    /// Creates the router and switches every channel off.
    pub fn new(a: A, b: B, c: C, d: &'p SoftPwm<P>) -> Self {
        let mut outputs = Self {
            a,
            b,
            c,
            d,
            mirror: [0; 3],
        };
        outputs.set_all(0);
        outputs
    }

    /// Releases the native channels.
    pub fn release(self) -> (A, B, C) {
        (self.a, self.b, self.c)
    }
}

impl<A, B, C, P> DutyOutputs for QuadPwm<'_, A, B, C, P>
where
    A: SetDutyCycle,
    B: SetDutyCycle,
    C: SetDutyCycle,
    P: OutputPin,
{
    fn set_duty(&mut self, channel: Channel, duty: u8) {
        let fraction = u16::from(duty);
        match channel {
            Channel::A => {
                let _ = self.a.set_duty_cycle_fraction(fraction, 255);
            }
            Channel::B => {
                let _ = self.b.set_duty_cycle_fraction(fraction, 255);
            }
            Channel::C => {
                let _ = self.c.set_duty_cycle_fraction(fraction, 255);
            }
            Channel::D => {
                self.d.set_duty(duty);
                return;
            }
        }
        self.mirror[channel.index()] = duty;
    }

    fn duty(&self, channel: Channel) -> u8 {
        if channel.is_emulated() {
            self.d.duty()
        } else {
            self.mirror[channel.index()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType as DigitalErrorType;
    use embedded_hal::pwm::ErrorType;

    struct MockPwm {
        max: u16,
        raw: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.raw = duty;
            Ok(())
        }
    }

    struct NullPin;

    impl DigitalErrorType for NullPin {
        type Error = Infallible;
    }

    impl OutputPin for NullPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn pwm(max: u16) -> MockPwm {
        MockPwm { max, raw: 1 }
    }

    #[test]
    fn channel_index_matches_all_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
            assert_eq!(Channel::ALL[channel.index()], *channel);
        }
        assert!(Channel::D.is_emulated());
        assert!(!Channel::A.is_emulated());
    }

    #[test]
    fn new_switches_all_channels_off() {
        let soft: SoftPwm<NullPin> = SoftPwm::new();
        soft.set_duty(99);
        let outputs = QuadPwm::new(pwm(255), pwm(255), pwm(255), &soft);
        assert_eq!(outputs.duties(), [0; 4]);
        assert_eq!(soft.duty(), 0);
        let (a, _, _) = outputs.release();
        assert_eq!(a.raw, 0);
    }

    #[test]
    fn native_duty_scales_to_hardware_range() {
        let soft: SoftPwm<NullPin> = SoftPwm::new();
        let mut outputs = QuadPwm::new(pwm(1000), pwm(255), pwm(255), &soft);
        outputs.set_duty(Channel::A, 255);
        outputs.set_duty(Channel::B, 128);
        assert_eq!(outputs.duty(Channel::A), 255);
        assert_eq!(outputs.duty(Channel::B), 128);

        let (a, b, _) = outputs.release();
        assert_eq!(a.raw, 1000);
        assert_eq!(b.raw, 128);
    }

    #[test]
    fn emulated_channel_writes_soft_pwm_register() {
        let soft: SoftPwm<NullPin> = SoftPwm::new();
        let mut outputs = QuadPwm::new(pwm(255), pwm(255), pwm(255), &soft);
        outputs.set_duty(Channel::D, 77);
        assert_eq!(soft.duty(), 77);
        assert_eq!(outputs.duty(Channel::D), 77);
    }
}
