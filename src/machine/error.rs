//! Machine-level configuration errors.

use crate::core::{EventId, StateId};
use thiserror::Error;

/// Errors returned by [`StateMachine`] operations.
///
/// Every variant is a configuration error: the machine rejects the
/// operation without partial mutation and no lifecycle callback fires.
/// None of them is fatal; the embedding application decides whether to
/// halt or carry on.
///
/// [`StateMachine`]: crate::machine::StateMachine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError<S: StateId, E: EventId> {
    /// A state with this identifier is already registered.
    #[error("state {0:?} is already registered")]
    DuplicateState(S),

    /// The identifier is not present in the registry.
    #[error("state {0:?} is not registered in this machine")]
    UnknownState(S),

    /// The identifier names the currently active state, which cannot be
    /// removed; transition away first.
    #[error("state {0:?} is currently active and cannot be removed")]
    ActiveState(S),

    /// A transition was requested before any state was activated via
    /// `set_current`.
    #[error("no current state is set")]
    NoCurrentState,

    /// The active state maps `event` to a target that was never
    /// registered. The active state is left untouched.
    #[error("event {event:?} targets unregistered state {target:?}")]
    UnknownTarget { event: E, target: S },
}
