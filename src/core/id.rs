//! Identifier capabilities for states and transition events.
//!
//! A machine is parameterized by two identifier types: one naming its
//! states, one naming the events that trigger transitions. Both are
//! opaque to the framework; all it needs is value semantics, equality,
//! and hashability for registry and table keys.

use std::fmt::Debug;
use std::hash::Hash;

/// Capability alias for types that name a state within one machine.
///
/// State identifiers must be unique per machine; registering two states
/// under the same identifier is a configuration error. Any field-less
/// enum deriving the standard set qualifies:
///
/// ```rust
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum DoorState {
///     Open,
///     Closed,
/// }
///
/// fn assert_state_id<S: cogwheel::StateId>() {}
/// assert_state_id::<DoorState>();
/// ```
pub trait StateId: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> StateId for T {}

/// Capability alias for types that name a triggerable transition event.
///
/// Event identifiers are not required to be globally unique: the same
/// event may appear in several states' tables, each mapping it to a
/// possibly different target.
pub trait EventId: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> EventId for T {}
