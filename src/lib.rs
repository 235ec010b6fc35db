#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Clock`**: Millisecond counter advanced from the timer overflow interrupt
//! - **`SoftPwm`**: Fourth PWM channel emulated on a plain GPIO from two timer interrupts
//! - **`QuadPwm`**: Three hardware channels plus the emulated one behind `DutyOutputs`
//! - **`ButtonMonitor`**: Debounced short press and long-press persist-and-reset
//! - **`EnvelopeDetector`**: Mean-absolute-deviation loudness over a sample ring
//! - **`Context`**: What a running sequence sees: outputs, clock, cancellation checkpoints
//! - **`Catalog`**: Ordered set of named sequences, some excluded from demo mode
//! - **`Runner`**: Demo/rotation driver with resume across resets
//!
//! Hardware is reached only through traits (`DutyOutputs`, `AnalogSampler`,
//! `embedded_hal::delay::DelayNs`, `SettingsStore`, `SystemReset`, `rand_core::RngCore`),
//! so everything above runs on a host with mocks.

pub mod adc;
pub mod button;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod context;
pub mod envelope;
pub mod interrupt;
pub mod output;
pub mod runner;
pub mod sequences;
pub mod settings;
pub mod soft_pwm;
pub mod time;

pub use adc::{ADC_MAX, AdcChannel, AnalogSampler};
pub use button::{ButtonConfig, ButtonMonitor, ButtonState};
pub use catalog::{Catalog, CatalogBuilder, CatalogError, Sequence, SequenceFn};
pub use clock::{Clock, DEFAULT_TICKS_PER_MS};
pub use config::{Config, ConfigError, DEFAULT_DEMO_TIMEOUT_MS};
pub use context::{Board, Cancelled, Context, Outcome};
pub use envelope::{EnvelopeDetector, SoundConfig};
pub use interrupt::{CompareMatchHandler, OverflowHandler};
pub use output::{CHANNEL_COUNT, Channel, DutyOutputs, QuadPwm};
pub use runner::{Mode, Runner, StepReport};
pub use settings::{ResumePoint, SettingsStore, SystemReset};
pub use soft_pwm::SoftPwm;
pub use time::{ElapsedCheck, TimeSource, Timeout};
