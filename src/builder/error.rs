//! Build errors for the machine builder.

use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError<S: StateId> {
    #[error("no states registered. Add at least one state before .build()")]
    NoStates,

    #[error("two states share the identifier {0:?}")]
    DuplicateState(S),

    #[error("initial state {0:?} is not among the registered states")]
    UnknownInitial(S),
}
