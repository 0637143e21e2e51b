//! The state machine itself: registry, active-state tracking, and
//! transition/tick dispatch.
//!
//! A [`StateMachine`] owns one context value, a registry keyed by state
//! identifier, and at most one active state. Configuration errors come
//! back as [`MachineError`]; expected no-ops (an event the active state
//! does not care about, a tick before activation) are surfaced as
//! [`TransitionOutcome::Ignored`] or a `tracing` warning, never as
//! errors.

mod error;
mod registry;

pub use error::MachineError;
pub use registry::{StateMachine, TransitionOutcome};
