//! Ctrl-C as a cooperative flag.
//!
//! The CLI's `ctrlc` handler only raises the flag. The interpreter polls it before
//! every command and every repetition, and unwinds with
//! [`TurtilleError::Interrupted`](crate::TurtilleError::Interrupted) once it is set.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Printed when Ctrl-C cuts a running program short.
pub const INTERRUPTED: &str = "# interrupted";

/// Shared between the signal handler and the loops that poll it.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Reads and clears the flag.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}
