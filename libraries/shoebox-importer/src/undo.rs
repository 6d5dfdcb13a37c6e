//! Ordered log of reversible actions
//!
//! Actions are recorded during the forward pass and undone strictly newest
//! first. Unwinding never stops early: a failed undo is logged and the rest
//! of the log is still processed.

use std::fmt::{Debug, Display};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct UndoLog<T> {
    actions: Vec<T>,
}

impl<T> Default for UndoLog<T> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
        }
    }
}

impl<T: Debug> UndoLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action that will need undoing on rollback
    pub fn record(&mut self, action: T) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions in recording order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.actions.iter()
    }

    pub fn contains(&self, action: &T) -> bool
    where
        T: PartialEq,
    {
        self.actions.contains(action)
    }

    /// Forget every action; they are now permanent
    pub fn discard(&mut self) {
        self.actions.clear();
    }

    /// Undo every action newest first and empty the log
    ///
    /// Returns how many undo steps failed.
    pub fn unwind<E, F>(&mut self, what: &str, undo: F) -> usize
    where
        E: Display,
        F: FnMut(T) -> Result<(), E>,
    {
        self.unwind_to(0, what, undo)
    }

    /// Undo the actions recorded after the log had `len` entries, newest
    /// first, keeping the older ones
    pub fn unwind_to<E, F>(&mut self, len: usize, what: &str, mut undo: F) -> usize
    where
        E: Display,
        F: FnMut(T) -> Result<(), E>,
    {
        let mut failures = 0;
        while self.actions.len() > len {
            let Some(action) = self.actions.pop() else {
                break;
            };
            let description = format!("{:?}", action);
            if let Err(e) = undo(action) {
                warn!("Failed to undo {} {}: {}", what, description, e);
                failures += 1;
            }
        }
        failures
    }
}
