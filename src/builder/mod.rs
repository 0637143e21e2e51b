//! Ergonomic construction of state machines.
//!
//! This module provides a fluent [`MachineBuilder`] plus the
//! [`id_enum!`](crate::id_enum) macro for declaring identifier enums
//! with the standard derive set.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
