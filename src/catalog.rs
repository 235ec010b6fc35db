//! Named sequence catalog.
//!
//! A [`Catalog`] is a fixed-capacity, ordered list of [`Sequence`] entries built with
//! [`CatalogBuilder`]. Order is the rotation order; entries flagged rotation-only are
//! skipped when demo mode picks at random.

use heapless::Vec;

use crate::context::{Cancelled, Context};
use crate::time::Timeout;

/// Signature every sequence implements.
///
/// Runs until `timeout` elapses (`Ok`) or the button cancels it (`Err(Cancelled)`).
pub type SequenceFn<B, T> = fn(&mut Context<'_, B, T>, Timeout) -> Result<(), Cancelled>;

/// A named entry in the catalog.
pub struct Sequence<B, T> {
    name: &'static str,
    run: SequenceFn<B, T>,
    demo: bool,
}

impl<B, T> Sequence<B, T> {
    /// Creates an entry that also takes part in demo mode.
    pub const fn new(name: &'static str, run: SequenceFn<B, T>) -> Self {
        Self {
            name,
            run,
            demo: true,
        }
    }

    /// Creates an entry only reachable through fixed rotation.
    pub const fn rotation_only(name: &'static str, run: SequenceFn<B, T>) -> Self {
        Self {
            name,
            run,
            demo: false,
        }
    }

    /// Returns the entry's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the sequence function.
    pub fn run_fn(&self) -> SequenceFn<B, T> {
        self.run
    }

    /// Returns true if demo mode may pick this entry.
    pub fn in_demo(&self) -> bool {
        self.demo
    }
}

impl<B, T> Clone for Sequence<B, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, T> Copy for Sequence<B, T> {}

impl<B, T> core::fmt::Debug for Sequence<B, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sequence")
            .field("name", &self.name)
            .field("demo", &self.demo)
            .finish()
    }
}

/// Catalog validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// No entries provided.
    EmptyCatalog,

    /// Catalog capacity exceeded.
    CapacityExceeded,

    /// Every entry is rotation-only, so demo mode has nothing to pick.
    NoDemoEntries,
}

impl core::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CatalogError::EmptyCatalog => {
                write!(f, "catalog must have at least one sequence")
            }
            CatalogError::CapacityExceeded => {
                write!(f, "catalog capacity exceeded")
            }
            CatalogError::NoDemoEntries => {
                write!(f, "catalog needs at least one sequence eligible for demo mode")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CatalogError {}

/// Ordered, fixed-capacity list of sequences.
///
/// Order is the fixed-rotation order; the demo-eligible subset is what demo mode
/// picks from.
///
/// # Type Parameters
/// * `B` - Board type the sequences drive
/// * `T` - Time source type
/// * `N` - Maximum number of entries
pub struct Catalog<B, T, const N: usize> {
    entries: Vec<Sequence<B, T>, N>,
}

impl<B, T, const N: usize> Catalog<B, T, N> {
    /// Creates a new catalog builder.
    pub fn builder() -> CatalogBuilder<B, T, N> {
        CatalogBuilder::new()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Sequence<B, T>> {
        self.entries.get(index)
    }

    /// Iterates entries in rotation order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequence<B, T>> {
        self.entries.iter()
    }

    /// Returns the number of demo-eligible entries.
    pub fn demo_len(&self) -> usize {
        self.entries.iter().filter(|s| s.demo).count()
    }

    /// Returns the catalog index of the `nth` demo-eligible entry.
    pub fn demo_index(&self, nth: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, s)| s.demo)
            .nth(nth)
            .map(|(i, _)| i)
    }

    /// Returns the index of the entry called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|s| s.name == name)
    }
}

/// Builder for constructing validated catalogs.
pub struct CatalogBuilder<B, T, const N: usize> {
    entries: Vec<Sequence<B, T>, N>,
}

impl<B, T, const N: usize> CatalogBuilder<B, T, N> {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry that also takes part in demo mode.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the catalog is full.
    pub fn sequence(self, name: &'static str, run: SequenceFn<B, T>) -> Result<Self, CatalogError> {
        self.entry(Sequence::new(name, run))
    }

    /// Appends an entry only reachable through fixed rotation.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the catalog is full.
    pub fn rotation_only(
        self,
        name: &'static str,
        run: SequenceFn<B, T>,
    ) -> Result<Self, CatalogError> {
        self.entry(Sequence::rotation_only(name, run))
    }

    /// Appends a prepared entry.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the catalog is full.
    pub fn entry(mut self, sequence: Sequence<B, T>) -> Result<Self, CatalogError> {
        self.entries
            .push(sequence)
            .map_err(|_| CatalogError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the catalog.
    ///
    /// # Errors
    /// * `EmptyCatalog` - No entries were added
    /// * `NoDemoEntries` - Every entry is rotation-only
    pub fn build(self) -> Result<Catalog<B, T, N>, CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        if !self.entries.iter().any(|s| s.demo) {
            return Err(CatalogError::NoDemoEntries);
        }

        Ok(Catalog {
            entries: self.entries,
        })
    }
}

impl<B, T, const N: usize> Default for CatalogBuilder<B, T, N> {
    fn default() -> Self {
        Self::new()
    }
}
