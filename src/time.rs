//! Time abstraction and elapsed-time predicates.

/// Trait for abstracting the millisecond time source.
pub trait TimeSource {
    /// Returns milliseconds since startup.
    ///
    /// Must be non-blocking and callable from both interrupt and normal context.
    fn now_ms(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// How long a sequence is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Run until cancelled.
    Forever,

    /// Run for this many milliseconds.
    After(u32),
}

impl Timeout {
    /// Converts a signed millisecond count: negative means run forever.
    pub fn from_millis_signed(millis: i32) -> Self {
        match u32::try_from(millis) {
            Ok(ms) => Timeout::After(ms),
            Err(_) => Timeout::Forever,
        }
    }

    /// Returns true for [`Timeout::Forever`].
    #[inline]
    pub fn is_forever(&self) -> bool {
        matches!(self, Timeout::Forever)
    }
}

/// Policy used to decide whether a timeout has elapsed.
///
/// The millisecond counter is allowed to wrap at its integer width.
/// [`ElapsedCheck::Wrapping`] survives that; [`ElapsedCheck::Deadline`] computes an
/// absolute deadline and compares against it, which ends early when the deadline
/// wraps past the counter's maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElapsedCheck {
    /// `now - start >= timeout`, unsigned wrapping subtraction.
    #[default]
    Wrapping,

    /// `now >= start + timeout`, wrapping addition against an absolute deadline.
    Deadline,
}

impl ElapsedCheck {
    /// Returns true once `timeout_ms` has elapsed since `start_ms`.
    pub fn has_elapsed(self, start_ms: u64, now_ms: u64, timeout_ms: u32) -> bool {
        match self {
            ElapsedCheck::Wrapping => now_ms.wrapping_sub(start_ms) >= u64::from(timeout_ms),
            ElapsedCheck::Deadline => now_ms >= start_ms.wrapping_add(u64::from(timeout_ms)),
        }
    }

    /// Returns true while a sequence started at `start_ms` should keep running.
    pub fn within(self, timeout: Timeout, start_ms: u64, now_ms: u64) -> bool {
        match timeout {
            Timeout::Forever => true,
            Timeout::After(ms) => !self.has_elapsed(start_ms, now_ms, ms),
        }
    }
}
