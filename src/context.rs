//! The suspension point handed to every running sequence.
//!
//! A sequence owns no hardware. It gets a [`Context`] for the length of one
//! invocation and follows one protocol:
//!
//! ```ignore
//! fn my_sequence<B: Board, T: TimeSource>(
//!     ctx: &mut Context<'_, B, T>,
//!     timeout: Timeout,
//! ) -> Result<(), Cancelled> {
//!     ctx.begin(timeout);            // zero all channels, capture the start time
//!     while ctx.running() {          // timeout not yet elapsed (or Forever)
//!         /* one animation step */
//!         ctx.checkpoint()?;         // poll the button, bail out on a press
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Cancellation is cooperative: a sequence that never reaches a checkpoint cannot
//! be interrupted.

use embedded_hal::delay::DelayNs;
use rand_core::RngCore;

use crate::adc::AnalogSampler;
use crate::button::ButtonMonitor;
use crate::config::Config;
use crate::envelope::{EnvelopeDetector, SoundConfig};
use crate::output::{Channel, DutyOutputs};
use crate::settings::{SettingsStore, SystemReset};
use crate::time::{ElapsedCheck, TimeSource, Timeout};

/// Everything a sequence may touch on the board.
///
/// Blanket-implemented: implement the component traits and your board is a `Board`.
pub trait Board: DutyOutputs + AnalogSampler + DelayNs + SettingsStore + SystemReset + RngCore {}

impl<T> Board for T where
    T: DutyOutputs + AnalogSampler + DelayNs + SettingsStore + SystemReset + RngCore
{
}

/// Marker returned through `?` when the button cancels a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cancelled;

/// How a sequence invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The timeout elapsed.
    Completed,

    /// The button was pressed.
    Cancelled,
}

impl Outcome {
    /// Returns true if the button ended the sequence.
    #[inline]
    pub fn is_cancelled(self) -> bool {
        self == Outcome::Cancelled
    }
}

impl From<Result<(), Cancelled>> for Outcome {
    fn from(result: Result<(), Cancelled>) -> Self {
        match result {
            Ok(()) => Outcome::Completed,
            Err(Cancelled) => Outcome::Cancelled,
        }
    }
}

/// Per-invocation view of the board, clock and shared detectors.
pub struct Context<'a, B, T> {
    board: &'a mut B,
    clock: &'a T,
    envelope: &'a mut EnvelopeDetector,
    button: ButtonMonitor,
    sound: SoundConfig,
    elapsed_check: ElapsedCheck,
    resume_index: u8,
    start_ms: u64,
    timeout: Timeout,
}

impl<'a, B: Board, T: TimeSource> Context<'a, B, T> {
    /// Creates a context. `resume_index` is what a long press persists.
    pub fn new(
        board: &'a mut B,
        clock: &'a T,
        envelope: &'a mut EnvelopeDetector,
        config: &Config,
        resume_index: u8,
    ) -> Self {
        let start_ms = clock.now_ms();
        Self {
            board,
            clock,
            envelope,
            button: ButtonMonitor::new(config.button),
            sound: config.sound,
            elapsed_check: config.elapsed_check,
            resume_index,
            start_ms,
            timeout: Timeout::After(0),
        }
    }

    /// Zeroes every channel and starts the timeout.
    pub fn begin(&mut self, timeout: Timeout) {
        self.board.set_all(0);
        self.timeout = timeout;
        self.start_ms = self.clock.now_ms();
    }

    /// Returns true while the timeout passed to [`Context::begin`] has not elapsed.
    pub fn running(&self) -> bool {
        self.elapsed_check
            .within(self.timeout, self.start_ms, self.clock.now_ms())
    }

    /// Polls the button once.
    ///
    /// # Errors
    /// Returns `Cancelled` on a press. Channel state is left as it is.
    pub fn checkpoint(&mut self) -> Result<(), Cancelled> {
        if self.button.poll(&mut *self.board, self.resume_index).is_pressed() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Polls the button repeatedly until `ms` milliseconds have passed.
    ///
    /// # Errors
    /// Returns `Cancelled` as soon as a poll sees a press.
    pub fn wait(&mut self, ms: u32) -> Result<(), Cancelled> {
        let start = self.clock.now_ms();
        while !self.elapsed_check.has_elapsed(start, self.clock.now_ms(), ms) {
            self.checkpoint()?;
        }
        Ok(())
    }

    /// Blocks for `ms` milliseconds without polling.
    #[inline]
    pub fn pause(&mut self, ms: u32) {
        self.board.delay_ms(ms);
    }

    /// Sets one channel.
    #[inline]
    pub fn set(&mut self, channel: Channel, duty: u8) {
        self.board.set_duty(channel, duty);
    }

    /// Sets every channel.
    #[inline]
    pub fn set_all(&mut self, duty: u8) {
        self.board.set_all(duty);
    }

    /// Returns one channel's duty.
    #[inline]
    pub fn duty(&self, channel: Channel) -> u8 {
        self.board.duty(channel)
    }

    /// Returns all duties in [`Channel::ALL`] order.
    pub fn duties(&self) -> [u8; 4] {
        self.board.duties()
    }

    /// Adds `delta` to every channel with 8-bit register wraparound.
    pub fn nudge_all(&mut self, delta: i8) {
        for channel in Channel::ALL {
            let duty = self.duty(channel).wrapping_add_signed(delta);
            self.board.set_duty(channel, duty);
        }
    }

    /// Returns a pseudo-random value in `0..bound` (0 when `bound` is 0).
    pub fn random(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.board.next_u32() % bound
    }

    /// Samples the microphone into the envelope window and returns the brightness
    /// the current intensity maps to.
    pub fn listen(&mut self) -> u8 {
        let raw = self.board.sample(self.sound.channel);
        self.envelope.push_sample(raw);
        self.sound.brightness(self.envelope.intensity())
    }

    /// Refills the envelope window with its baseline.
    pub fn reset_envelope(&mut self) {
        self.envelope.reset();
    }

    /// Returns the clock reading.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}
