//! Cogwheel: a deterministic finite state machine framework for
//! tick-driven simulations.
//!
//! An owning entity declares a set of named states, wires transitions
//! between them keyed by named events, and drives state lifecycle and
//! per-tick behavior through one uniform protocol. The machine keeps
//! exactly one state active at a time and runs the exit/enter handshake
//! atomically on every transition.
//!
//! # Core Concepts
//!
//! - **State**: one named mode of behavior implementing the four
//!   lifecycle callbacks (`on_enter`, `on_exit`, `on_reason`, `on_act`)
//!   and owning its outgoing [`TransitionTable`]
//! - **StateMachine**: the registry and dispatcher, bound to one shared
//!   owner/context value that it lends read-only into every callback
//! - **Tick**: one reason-then-act cycle on the active state, driven by
//!   an external loop with a caller-supplied elapsed time
//!
//! # Example
//!
//! ```rust
//! use cogwheel::{id_enum, MachineBuilder, State, TransitionTable};
//!
//! id_enum! {
//!     enum Traffic {
//!         Red,
//!         Green,
//!     }
//! }
//!
//! id_enum! {
//!     enum Signal {
//!         Change,
//!     }
//! }
//!
//! struct Light {
//!     id: Traffic,
//!     table: TransitionTable<Signal, Traffic>,
//! }
//!
//! impl Light {
//!     fn new(id: Traffic, next: Traffic) -> Self {
//!         let mut table = TransitionTable::new();
//!         table.declare(Signal::Change, next).unwrap();
//!         Light { id, table }
//!     }
//! }
//!
//! impl State<(), Traffic, Signal> for Light {
//!     fn id(&self) -> Traffic {
//!         self.id
//!     }
//!     fn transitions(&self) -> &TransitionTable<Signal, Traffic> {
//!         &self.table
//!     }
//!     fn transitions_mut(&mut self) -> &mut TransitionTable<Signal, Traffic> {
//!         &mut self.table
//!     }
//!     fn on_enter(&mut self, _ctx: &()) {}
//!     fn on_exit(&mut self, _ctx: &()) {}
//!     fn on_reason(&mut self, _ctx: &(), _dt: f32) {}
//!     fn on_act(&mut self, _ctx: &(), _dt: f32) {}
//! }
//!
//! let mut machine = MachineBuilder::new(())
//!     .state(Light::new(Traffic::Red, Traffic::Green))
//!     .state(Light::new(Traffic::Green, Traffic::Red))
//!     .initial(Traffic::Red)
//!     .build()
//!     .unwrap();
//!
//! machine.tick(0.016);
//! machine.perform_transition(Signal::Change).unwrap();
//! assert_eq!(machine.current_state_id(), Some(Traffic::Green));
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use core::{EventId, State, StateId, TableError, TransitionTable};
pub use machine::{MachineError, StateMachine, TransitionOutcome};
