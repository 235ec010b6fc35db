//! Top-level driver: random demo cycling, then button-stepped rotation.
//!
//! Provides [`Runner`] which owns the board and the catalog. The sign starts in
//! demo mode, running a random demo-eligible sequence for a bounded time, over and
//! over. The first button press switches to fixed rotation: each catalog entry runs
//! forever until pressed, then the next one starts. After the last entry the sign
//! drops back into demo mode.
//!
//! A long press persists the rotation position, so after the restart the sign
//! resumes where it was.

use crate::catalog::Catalog;
use crate::config::{Config, ConfigError};
use crate::context::{Board, Context, Outcome};
use crate::envelope::EnvelopeDetector;
use crate::settings::ResumePoint;
use crate::time::{TimeSource, Timeout};

/// Which phase the runner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Random sequences with a bounded timeout until the button is pressed.
    Demo,

    /// Catalog entry `index` runs until the button is pressed.
    Rotation {
        /// Catalog index of the running entry.
        index: usize,
    },
}

impl Mode {
    /// Returns the resume point a long press in this mode persists.
    pub fn resume_point(self) -> ResumePoint {
        match self {
            Mode::Demo => ResumePoint::Demo,
            Mode::Rotation { index } => ResumePoint::Rotation(index),
        }
    }
}

impl From<ResumePoint> for Mode {
    fn from(point: ResumePoint) -> Self {
        match point {
            ResumePoint::Demo => Mode::Demo,
            ResumePoint::Rotation(index) => Mode::Rotation { index },
        }
    }
}

/// What a single [`Runner::step`] ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Mode the sequence ran in.
    pub mode: Mode,

    /// Catalog index of the sequence.
    pub index: usize,

    /// How the sequence ended.
    pub outcome: Outcome,
}

/// Drives the catalog on one board.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `B` - Board implementation type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of catalog entries
pub struct Runner<'t, B: Board, T: TimeSource, const N: usize> {
    board: B,
    clock: &'t T,
    catalog: Catalog<B, T, N>,
    config: Config,
    envelope: EnvelopeDetector,
    mode: Mode,
}

impl<'t, B: Board, T: TimeSource, const N: usize> Runner<'t, B, T, N> {
    /// Creates a runner and restores the persisted resume point.
    ///
    /// # Errors
    /// Returns the [`ConfigError`] from [`Config::validate`] if `config` is rejected.
    pub fn new(
        mut board: B,
        clock: &'t T,
        catalog: Catalog<B, T, N>,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let stored = board.load();
        let mode = Mode::from(ResumePoint::decode(stored, catalog.len()));

        #[cfg(feature = "defmt")]
        defmt::info!("runner: stored resume byte {}, starting in {}", stored, mode);

        Ok(Self {
            board,
            clock,
            catalog,
            envelope: EnvelopeDetector::new(config.sound.baseline),
            config,
            mode,
        })
    }

    /// Runs one sequence invocation and advances the mode.
    pub fn step(&mut self) -> StepReport {
        let mode = self.mode;
        let (index, timeout) = match mode {
            Mode::Demo => (self.pick_demo(), Timeout::After(self.config.demo_timeout_ms)),
            Mode::Rotation { index } => (index, Timeout::Forever),
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "runner: {} -> {}",
            mode,
            self.catalog.get(index).map(|s| s.name()).unwrap_or("?")
        );

        let outcome = self.run_sequence(index, timeout);

        self.mode = match (mode, outcome.is_cancelled()) {
            (Mode::Demo, false) => Mode::Demo,
            (Mode::Demo, true) => Mode::Rotation { index: 0 },
            (Mode::Rotation { index }, _) if index + 1 < self.catalog.len() => {
                Mode::Rotation { index: index + 1 }
            }
            (Mode::Rotation { .. }, _) => Mode::Demo,
        };

        StepReport {
            mode,
            index,
            outcome,
        }
    }

    /// Runs forever.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Runs catalog entry `index` once with `timeout`.
    ///
    /// A long press during the run persists the current mode's resume point.
    /// Out-of-range indices complete immediately.
    pub fn run_sequence(&mut self, index: usize, timeout: Timeout) -> Outcome {
        let Some(run) = self.catalog.get(index).map(|s| s.run_fn()) else {
            return Outcome::Completed;
        };

        let resume_index = self.mode.resume_point().encode();
        let mut ctx = Context::new(
            &mut self.board,
            self.clock,
            &mut self.envelope,
            &self.config,
            resume_index,
        );
        Outcome::from(run(&mut ctx, timeout))
    }

    /// Returns the current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog<B, T, N> {
        &self.catalog
    }

    /// Returns the board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Returns the board mutably.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Consumes the runner and returns the board.
    pub fn into_board(self) -> B {
        self.board
    }

    fn pick_demo(&mut self) -> usize {
        let count = self.catalog.demo_len() as u32;
        let nth = if count == 0 {
            0
        } else {
            self.board.next_u32() % count
        };
        self.catalog.demo_index(nth as usize).unwrap_or(0)
    }
}
