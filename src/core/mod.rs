//! Core state machine building blocks.
//!
//! This module contains the pieces a machine is assembled from:
//! - Identifier capabilities via the `StateId` and `EventId` aliases
//! - The `State` contract with its four lifecycle callbacks
//! - Per-state `TransitionTable`s mapping events to targets
//!
//! Nothing here dispatches anything; the registry and driver live in
//! [`crate::machine`].

mod id;
mod state;
mod table;

pub use id::{EventId, StateId};
pub use state::State;
pub use table::{TableError, TransitionTable};
