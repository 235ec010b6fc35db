//! Persisted resume point and device restart.

/// Trait for abstracting the single persisted settings byte (e.g. one EEPROM cell).
pub trait SettingsStore {
    /// Reads the stored byte.
    fn load(&mut self) -> u8;

    /// Writes the byte. Implementations should skip the write when the value is
    /// unchanged to spare EEPROM wear.
    fn store(&mut self, value: u8);
}

/// Trait for abstracting a full device restart.
pub trait SystemReset {
    /// Requests a restart, typically by arming the watchdog with a short timeout
    /// and spinning until it fires.
    ///
    /// Hardware implementations never return. Test doubles may return, in which
    /// case the caller carries on as if the restart had been refused.
    fn restart(&mut self);
}

/// Where the sign picks up after a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResumePoint {
    /// Start in demo mode.
    Demo,

    /// Resume fixed rotation at this catalog index.
    Rotation(usize),
}

impl ResumePoint {
    /// Decodes a stored byte for a catalog of `catalog_len` entries.
    ///
    /// `0` and anything beyond the catalog decode as [`ResumePoint::Demo`].
    pub fn decode(byte: u8, catalog_len: usize) -> Self {
        match usize::from(byte) {
            0 => ResumePoint::Demo,
            k if k <= catalog_len => ResumePoint::Rotation(k - 1),
            _ => ResumePoint::Demo,
        }
    }

    /// Encodes into the stored byte. Indices that do not fit encode as demo.
    pub fn encode(self) -> u8 {
        match self {
            ResumePoint::Demo => 0,
            ResumePoint::Rotation(index) => index
                .checked_add(1)
                .and_then(|k| u8::try_from(k).ok())
                .unwrap_or(0),
        }
    }
}
