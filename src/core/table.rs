//! Per-state transition tables.
//!
//! Every state owns one [`TransitionTable`] mapping the events it
//! responds to onto target state identifiers. The table is deterministic
//! by construction: one target per event, first declaration wins, and a
//! duplicate declaration is rejected rather than silently overwritten.

use crate::core::id::{EventId, StateId};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by transition-table edits.
///
/// These are configuration errors: the table is left untouched whenever
/// one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError<E: EventId, S: StateId> {
    /// The event already maps to a target; tables are append-only per
    /// distinct event.
    #[error("event {event:?} is already mapped to {existing:?}")]
    DuplicateTransition { event: E, existing: S },

    /// The event was not present in the table.
    #[error("event {0:?} is not mapped in this table")]
    UnknownTransition(E),
}

/// Deterministic event → target-state map owned by a single state.
///
/// # Example
///
/// ```rust
/// use cogwheel::TransitionTable;
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Push {
///     Toggle,
/// }
///
/// let mut table = TransitionTable::new();
/// table.declare(Push::Toggle, Door::Open).unwrap();
///
/// assert_eq!(table.resolve(Push::Toggle), Some(Door::Open));
/// assert!(table.declare(Push::Toggle, Door::Closed).is_err());
/// assert_eq!(table.resolve(Push::Toggle), Some(Door::Open));
/// ```
#[derive(Debug, Clone)]
pub struct TransitionTable<E: EventId, S: StateId> {
    edges: HashMap<E, S>,
}

impl<E: EventId, S: StateId> Default for TransitionTable<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventId, S: StateId> TransitionTable<E, S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Map `event` to `target`.
    ///
    /// Fails without mutating if `event` already has a mapping; the
    /// existing target is reported in the error.
    pub fn declare(&mut self, event: E, target: S) -> Result<(), TableError<E, S>> {
        if let Some(&existing) = self.edges.get(&event) {
            return Err(TableError::DuplicateTransition { event, existing });
        }
        self.edges.insert(event, target);
        Ok(())
    }

    /// Remove the mapping for `event`.
    ///
    /// Fails if `event` was not mapped.
    pub fn remove(&mut self, event: E) -> Result<(), TableError<E, S>> {
        match self.edges.remove(&event) {
            Some(_) => Ok(()),
            None => Err(TableError::UnknownTransition(event)),
        }
    }

    /// Look up the target for `event`, if any.
    ///
    /// Missing mappings are an ordinary absence, never an error; this is
    /// what the machine consults when deciding whether an event applies.
    pub fn resolve(&self, event: E) -> Option<S> {
        self.edges.get(&event).copied()
    }

    /// Pure membership query.
    pub fn contains(&self, event: E) -> bool {
        self.edges.contains_key(&event)
    }

    /// Number of declared transitions.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the table has no transitions at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over `(event, target)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (E, S)> + '_ {
        self.edges.iter().map(|(&e, &s)| (e, s))
    }
}
