//! The state contract every machine participant implements.

use crate::core::id::{EventId, StateId};
use crate::core::table::TransitionTable;

/// One named mode of behavior inside a [`StateMachine`].
///
/// A state carries an immutable identifier, owns its outgoing transition
/// table (typically populated in the concrete type's constructor), and
/// implements the four lifecycle callbacks. The callbacks are invoked
/// only by the owning machine, never by the state itself or by sibling
/// states, and the framework supplies no behavior for them: all four
/// are required.
///
/// `C` is the shared owner/context type. The machine owns the context
/// value and lends `&C` into every callback, so all states observe the
/// same instance under read-only aliasing; a context that wants to be
/// mutated from inside a state uses interior mutability under its own
/// discipline.
///
/// # Example
///
/// ```rust
/// use cogwheel::{State, TransitionTable};
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum LightState {
///     Red,
///     Green,
/// }
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum LightEvent {
///     Change,
/// }
///
/// struct Red {
///     table: TransitionTable<LightEvent, LightState>,
/// }
///
/// impl Red {
///     fn new() -> Self {
///         let mut table = TransitionTable::new();
///         table.declare(LightEvent::Change, LightState::Green).unwrap();
///         Red { table }
///     }
/// }
///
/// impl State<(), LightState, LightEvent> for Red {
///     fn id(&self) -> LightState {
///         LightState::Red
///     }
///
///     fn transitions(&self) -> &TransitionTable<LightEvent, LightState> {
///         &self.table
///     }
///
///     fn transitions_mut(&mut self) -> &mut TransitionTable<LightEvent, LightState> {
///         &mut self.table
///     }
///
///     fn on_enter(&mut self, _ctx: &()) {}
///     fn on_exit(&mut self, _ctx: &()) {}
///     fn on_reason(&mut self, _ctx: &(), _dt: f32) {}
///     fn on_act(&mut self, _ctx: &(), _dt: f32) {}
/// }
/// ```
///
/// [`StateMachine`]: crate::machine::StateMachine
pub trait State<C, S: StateId, E: EventId> {
    /// The state's identifier, fixed for its whole lifetime.
    fn id(&self) -> S;

    /// The state's outgoing transition table.
    fn transitions(&self) -> &TransitionTable<E, S>;

    /// Mutable access to the table, for declaring or removing edges
    /// after construction.
    fn transitions_mut(&mut self) -> &mut TransitionTable<E, S>;

    /// Called once when this state becomes active.
    fn on_enter(&mut self, ctx: &C);

    /// Called once when this state stops being active, before the
    /// incoming state's [`on_enter`](State::on_enter).
    fn on_exit(&mut self, ctx: &C);

    /// Evaluation half of a tick; runs before [`on_act`](State::on_act)
    /// every time. `dt` is the caller-supplied elapsed time, purely
    /// advisory to state logic.
    fn on_reason(&mut self, ctx: &C, dt: f32);

    /// Action half of a tick; runs after [`on_reason`](State::on_reason).
    fn on_act(&mut self, ctx: &C, dt: f32);
}
