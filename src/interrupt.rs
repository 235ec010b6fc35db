//! Handler traits bound to timer interrupts.
//!
//! Board code registers one handler object per interrupt vector during setup and
//! forwards each interrupt to it. Handlers only take `&self`, so they can live in
//! `static`s shared with the main loop.

/// Handler for a timer overflow interrupt.
pub trait OverflowHandler {
    /// Called from the overflow interrupt.
    fn on_overflow(&self);
}

/// Handler for a timer compare-match interrupt.
pub trait CompareMatchHandler {
    /// Called from the compare-match interrupt.
    fn on_compare_match(&self);
}
