//! The state registry and transition dispatcher.

use crate::core::{EventId, State, StateId};
use crate::machine::error::MachineError;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of a [`StateMachine::perform_transition`] call that did not
/// hit a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome<S: StateId> {
    /// The exit/enter handshake ran and the machine moved to `to`.
    Applied { from: S, to: S },

    /// The active state has no mapping for the event. This is normal,
    /// expected behavior, not a fault; nothing changed and no callback
    /// fired.
    Ignored,
}

impl<S: StateId> TransitionOutcome<S> {
    /// Whether the machine actually changed state.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// A deterministic finite state machine bound to one owner/context value.
///
/// The machine owns the registry of states, tracks the single active
/// state, and dispatches transition and tick requests. It starts with no
/// active state; the only way to gain one is [`set_current`].
///
/// All operations are synchronous and intended to be driven from one
/// logical thread of control per machine instance, typically a per-tick
/// simulation loop. Give each owner its own machine rather than sharing
/// one across threads.
///
/// # Example
///
/// ```rust
/// use cogwheel::{State, StateMachine, TransitionTable};
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Mode {
///     Off,
///     On,
/// }
///
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Switch {
///     Flip,
/// }
///
/// struct Lamp {
///     id: Mode,
///     table: TransitionTable<Switch, Mode>,
/// }
///
/// impl Lamp {
///     fn new(id: Mode, flip_to: Mode) -> Self {
///         let mut table = TransitionTable::new();
///         table.declare(Switch::Flip, flip_to).unwrap();
///         Lamp { id, table }
///     }
/// }
///
/// impl State<(), Mode, Switch> for Lamp {
///     fn id(&self) -> Mode {
///         self.id
///     }
///     fn transitions(&self) -> &TransitionTable<Switch, Mode> {
///         &self.table
///     }
///     fn transitions_mut(&mut self) -> &mut TransitionTable<Switch, Mode> {
///         &mut self.table
///     }
///     fn on_enter(&mut self, _ctx: &()) {}
///     fn on_exit(&mut self, _ctx: &()) {}
///     fn on_reason(&mut self, _ctx: &(), _dt: f32) {}
///     fn on_act(&mut self, _ctx: &(), _dt: f32) {}
/// }
///
/// let mut machine = StateMachine::new(());
/// machine.add_state(Lamp::new(Mode::Off, Mode::On)).unwrap();
/// machine.add_state(Lamp::new(Mode::On, Mode::Off)).unwrap();
/// machine.set_current(Mode::Off).unwrap();
///
/// machine.perform_transition(Switch::Flip).unwrap();
/// assert_eq!(machine.current_state_id(), Some(Mode::On));
/// ```
///
/// [`set_current`]: StateMachine::set_current
pub struct StateMachine<C, S: StateId, E: EventId> {
    context: C,
    states: HashMap<S, Box<dyn State<C, S, E>>>,
    current: Option<S>,
}

impl<C, S: StateId, E: EventId> std::fmt::Debug for StateMachine<C, S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<C, S: StateId, E: EventId> StateMachine<C, S, E> {
    /// Create a machine bound to `context`.
    ///
    /// The context is stored once and lent, never copied or cloned, into
    /// every lifecycle callback of every registered state.
    pub fn new(context: C) -> Self {
        Self {
            context,
            states: HashMap::new(),
            current: None,
        }
    }

    /// Register a state under its own identifier.
    ///
    /// Fails without inserting if a state with the same identifier is
    /// already registered. Registration does not activate the state.
    pub fn add_state<T>(&mut self, state: T) -> Result<(), MachineError<S, E>>
    where
        T: State<C, S, E> + 'static,
    {
        self.add_boxed_state(Box::new(state))
    }

    /// [`add_state`](StateMachine::add_state) for an already-boxed state.
    pub fn add_boxed_state(
        &mut self,
        state: Box<dyn State<C, S, E>>,
    ) -> Result<(), MachineError<S, E>> {
        let id = state.id();
        if self.states.contains_key(&id) {
            return Err(MachineError::DuplicateState(id));
        }
        self.states.insert(id, state);
        Ok(())
    }

    /// Remove the state registered under `id`.
    ///
    /// Fails if `id` is unknown, and fails with
    /// [`MachineError::ActiveState`] if `id` names the active state:
    /// removal would leave the active pointer dangling, so callers must
    /// transition away first.
    pub fn delete_state(&mut self, id: S) -> Result<(), MachineError<S, E>> {
        if self.current == Some(id) {
            return Err(MachineError::ActiveState(id));
        }
        match self.states.remove(&id) {
            Some(_) => Ok(()),
            None => Err(MachineError::UnknownState(id)),
        }
    }

    /// Make `id` the active state, running the exit/enter handshake.
    ///
    /// Fails without mutating if `id` is not registered. Otherwise the
    /// outgoing state's `on_exit` runs (if a state was active), the
    /// active identifier moves to `id`, and the target's `on_enter`
    /// runs. This is the only way to establish the very first active
    /// state.
    pub fn set_current(&mut self, id: S) -> Result<(), MachineError<S, E>> {
        if !self.states.contains_key(&id) {
            return Err(MachineError::UnknownState(id));
        }

        if let Some(prev) = self.current {
            if let Some(state) = self.states.get_mut(&prev) {
                state.on_exit(&self.context);
            }
        }

        self.current = Some(id);
        if let Some(state) = self.states.get_mut(&id) {
            state.on_enter(&self.context);
        }
        debug!(state = ?id, "state activated");
        Ok(())
    }

    /// Fire `event` against the active state.
    ///
    /// - No active state: [`MachineError::NoCurrentState`], nothing fires.
    /// - Event unmapped in the active state's table:
    ///   [`TransitionOutcome::Ignored`]; a state ignoring an
    ///   inapplicable event is not a fault.
    /// - Mapped target not registered: [`MachineError::UnknownTarget`]
    ///   and the machine is unchanged. The handshake is atomic, so the
    ///   active state is *not* exited.
    /// - Otherwise: `on_exit` on the outgoing state, active id updated,
    ///   `on_enter` on the incoming state, in that order with nothing in
    ///   between.
    pub fn perform_transition(
        &mut self,
        event: E,
    ) -> Result<TransitionOutcome<S>, MachineError<S, E>> {
        let from = self.current.ok_or(MachineError::NoCurrentState)?;

        let outgoing = self
            .states
            .get(&from)
            .expect("active state is always registered");
        let Some(target) = outgoing.transitions().resolve(event) else {
            return Ok(TransitionOutcome::Ignored);
        };

        // Validate the target before touching anything: exit and enter
        // either both happen or neither does.
        if !self.states.contains_key(&target) {
            return Err(MachineError::UnknownTarget { event, target });
        }

        if let Some(state) = self.states.get_mut(&from) {
            state.on_exit(&self.context);
        }
        self.current = Some(target);
        if let Some(state) = self.states.get_mut(&target) {
            state.on_enter(&self.context);
        }

        debug!(?event, ?from, to = ?target, "transition applied");
        Ok(TransitionOutcome::Applied { from, to: target })
    }

    /// Run one reason-then-act cycle on the active state.
    ///
    /// With no active state this warns and returns; that is an expected
    /// no-op, not an error. `dt` is passed through to both callbacks.
    ///
    /// Both callbacks run unconditionally. A state that decides during
    /// `on_reason` that it wants to move elsewhere records that wish in
    /// the context; the driving loop reads it and calls
    /// [`perform_transition`](StateMachine::perform_transition) between
    /// ticks. Re-entering the machine mid-tick is impossible because
    /// `tick` holds the machine exclusively.
    pub fn tick(&mut self, dt: f32) {
        let Some(id) = self.current else {
            warn!("tick with no active state");
            return;
        };
        if let Some(state) = self.states.get_mut(&id) {
            state.on_reason(&self.context, dt);
            state.on_act(&self.context, dt);
        }
    }

    /// Whether `id` is registered.
    pub fn is_valid_state(&self, id: S) -> bool {
        self.states.contains_key(&id)
    }

    /// Whether any state has been activated yet.
    pub fn has_current_state(&self) -> bool {
        self.current.is_some()
    }

    /// Identifier of the active state, if any.
    pub fn current_state_id(&self) -> Option<S> {
        self.current
    }

    /// The active state object, if any. Always agrees with
    /// [`current_state_id`](StateMachine::current_state_id); the
    /// reference is derived from the identifier by registry lookup.
    pub fn current_state(&self) -> Option<&dyn State<C, S, E>> {
        self.current
            .and_then(|id| self.states.get(&id))
            .map(|s| s.as_ref())
    }

    /// Shared access to the registered state under `id`.
    pub fn state(&self, id: S) -> Option<&dyn State<C, S, E>> {
        self.states.get(&id).map(|s| s.as_ref())
    }

    /// Mutable access to the registered state under `id`, e.g. to edit
    /// its transition table after registration.
    pub fn state_mut(&mut self, id: S) -> Option<&mut dyn State<C, S, E>> {
        // Unsizing through `map` trips over `&mut` invariance; coerce at
        // the return site instead.
        match self.states.get_mut(&id) {
            Some(state) => Some(state.as_mut()),
            None => None,
        }
    }

    /// The owner/context value this machine was bound to.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionTable;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    enum Mood {
        Calm,
        Alert,
        Panicked,
    }

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    enum Stimulus {
        Noise,
        Silence,
        Threat,
    }

    /// Context shared by all states; counters use `Cell` because the
    /// machine lends it out read-only.
    #[derive(Default)]
    struct Creature {
        heartbeats: Cell<u32>,
    }

    struct MoodState {
        id: Mood,
        table: TransitionTable<Stimulus, Mood>,
        entered: Rc<Cell<u32>>,
        exited: Rc<Cell<u32>>,
    }

    impl MoodState {
        fn new(id: Mood, edges: &[(Stimulus, Mood)]) -> Self {
            let mut table = TransitionTable::new();
            for &(event, target) in edges {
                table.declare(event, target).unwrap();
            }
            MoodState {
                id,
                table,
                entered: Rc::new(Cell::new(0)),
                exited: Rc::new(Cell::new(0)),
            }
        }
    }

    impl State<Creature, Mood, Stimulus> for MoodState {
        fn id(&self) -> Mood {
            self.id
        }

        fn transitions(&self) -> &TransitionTable<Stimulus, Mood> {
            &self.table
        }

        fn transitions_mut(&mut self) -> &mut TransitionTable<Stimulus, Mood> {
            &mut self.table
        }

        fn on_enter(&mut self, _ctx: &Creature) {
            self.entered.set(self.entered.get() + 1);
        }

        fn on_exit(&mut self, _ctx: &Creature) {
            self.exited.set(self.exited.get() + 1);
        }

        fn on_reason(&mut self, _ctx: &Creature, _dt: f32) {}

        fn on_act(&mut self, ctx: &Creature, _dt: f32) {
            ctx.heartbeats.set(ctx.heartbeats.get() + 1);
        }
    }

    fn machine_with_calm_and_alert() -> StateMachine<Creature, Mood, Stimulus> {
        let mut machine = StateMachine::new(Creature::default());
        machine
            .add_state(MoodState::new(Mood::Calm, &[(Stimulus::Noise, Mood::Alert)]))
            .unwrap();
        machine
            .add_state(MoodState::new(
                Mood::Alert,
                &[(Stimulus::Silence, Mood::Calm)],
            ))
            .unwrap();
        machine
    }

    #[test]
    fn new_machine_has_no_current_state() {
        let machine = machine_with_calm_and_alert();
        assert!(!machine.has_current_state());
        assert_eq!(machine.current_state_id(), None);
        assert!(machine.current_state().is_none());
    }

    #[test]
    fn add_state_registers_and_rejects_duplicates() {
        let mut machine = machine_with_calm_and_alert();
        assert!(machine.is_valid_state(Mood::Calm));
        assert!(machine.is_valid_state(Mood::Alert));
        assert!(!machine.is_valid_state(Mood::Panicked));

        let err = machine
            .add_state(MoodState::new(Mood::Calm, &[]))
            .unwrap_err();
        assert_eq!(err, MachineError::DuplicateState(Mood::Calm));
        assert_eq!(machine.state_count(), 2);
    }

    #[test]
    fn duplicate_add_keeps_the_first_registration() {
        let mut machine = machine_with_calm_and_alert();
        machine
            .add_state(MoodState::new(Mood::Calm, &[]))
            .unwrap_err();

        // The original Calm still has its Noise edge.
        let calm = machine.state(Mood::Calm).unwrap();
        assert!(calm.transitions().contains(Stimulus::Noise));
    }

    #[test]
    fn set_current_activates_and_enters() {
        let mut machine = machine_with_calm_and_alert();
        machine.set_current(Mood::Calm).unwrap();

        assert!(machine.has_current_state());
        assert_eq!(machine.current_state_id(), Some(Mood::Calm));
        assert_eq!(machine.current_state().unwrap().id(), Mood::Calm);
    }

    #[test]
    fn set_current_of_unknown_state_fails_without_mutation() {
        let mut machine = machine_with_calm_and_alert();
        let err = machine.set_current(Mood::Panicked).unwrap_err();
        assert_eq!(err, MachineError::UnknownState(Mood::Panicked));
        assert!(!machine.has_current_state());
    }

    #[test]
    fn transition_before_activation_is_an_error_and_fires_nothing() {
        let mut machine = machine_with_calm_and_alert();
        let err = machine.perform_transition(Stimulus::Noise).unwrap_err();
        assert_eq!(err, MachineError::NoCurrentState);
        assert!(!machine.has_current_state());
    }

    #[test]
    fn mapped_event_moves_the_machine() {
        let mut machine = machine_with_calm_and_alert();
        machine.set_current(Mood::Calm).unwrap();

        let outcome = machine.perform_transition(Stimulus::Noise).unwrap();
        assert_eq!(
            outcome,
            TransitionOutcome::Applied {
                from: Mood::Calm,
                to: Mood::Alert,
            }
        );
        assert!(outcome.is_applied());
        assert_eq!(machine.current_state_id(), Some(Mood::Alert));
    }

    #[test]
    fn unmapped_event_is_a_silent_no_op() {
        let mut machine = machine_with_calm_and_alert();
        machine.set_current(Mood::Calm).unwrap();

        let outcome = machine.perform_transition(Stimulus::Threat).unwrap();
        assert_eq!(outcome, TransitionOutcome::Ignored);
        assert!(!outcome.is_applied());
        assert_eq!(machine.current_state_id(), Some(Mood::Calm));
    }

    #[test]
    fn unregistered_target_fails_atomically() {
        let mut machine = StateMachine::new(Creature::default());
        let calm = MoodState::new(Mood::Calm, &[(Stimulus::Threat, Mood::Panicked)]);
        let exited = Rc::clone(&calm.exited);
        machine.add_state(calm).unwrap();
        machine.set_current(Mood::Calm).unwrap();

        let err = machine.perform_transition(Stimulus::Threat).unwrap_err();
        assert_eq!(
            err,
            MachineError::UnknownTarget {
                event: Stimulus::Threat,
                target: Mood::Panicked,
            }
        );

        // Atomicity: the active state was never exited.
        assert_eq!(machine.current_state_id(), Some(Mood::Calm));
        assert_eq!(exited.get(), 0);
    }

    #[test]
    fn delete_state_removes_inactive_entries() {
        let mut machine = machine_with_calm_and_alert();
        machine.delete_state(Mood::Alert).unwrap();
        assert!(!machine.is_valid_state(Mood::Alert));

        let err = machine.delete_state(Mood::Alert).unwrap_err();
        assert_eq!(err, MachineError::UnknownState(Mood::Alert));
    }

    #[test]
    fn deleting_the_active_state_is_forbidden() {
        let mut machine = machine_with_calm_and_alert();
        machine.set_current(Mood::Calm).unwrap();

        let err = machine.delete_state(Mood::Calm).unwrap_err();
        assert_eq!(err, MachineError::ActiveState(Mood::Calm));

        // Registry and active pointer are both untouched; ticking still
        // reaches the state.
        assert!(machine.is_valid_state(Mood::Calm));
        machine.tick(0.1);
        assert_eq!(machine.context().heartbeats.get(), 1);
    }

    #[test]
    fn tick_without_active_state_is_a_warned_no_op() {
        let mut machine = machine_with_calm_and_alert();
        machine.tick(0.5);
        assert_eq!(machine.context().heartbeats.get(), 0);
    }

    #[test]
    fn tick_reaches_only_the_active_state() {
        let mut machine = machine_with_calm_and_alert();
        machine.set_current(Mood::Calm).unwrap();

        for _ in 0..3 {
            machine.tick(0.016);
        }
        assert_eq!(machine.context().heartbeats.get(), 3);
    }

    #[test]
    fn debug_output_lists_registry_and_current() {
        let mut machine = machine_with_calm_and_alert();
        machine.set_current(Mood::Calm).unwrap();

        let rendered = format!("{machine:?}");
        assert!(rendered.starts_with("StateMachine"));
        assert!(rendered.contains("Calm"));
        assert!(rendered.contains("current: Some(Calm)"));
    }

    #[test]
    fn state_mut_allows_post_registration_table_edits() {
        let mut machine = machine_with_calm_and_alert();
        machine
            .state_mut(Mood::Alert)
            .unwrap()
            .transitions_mut()
            .declare(Stimulus::Threat, Mood::Calm)
            .unwrap();

        machine.set_current(Mood::Alert).unwrap();
        let outcome = machine.perform_transition(Stimulus::Threat).unwrap();
        assert!(outcome.is_applied());
        assert_eq!(machine.current_state_id(), Some(Mood::Calm));
    }
}
