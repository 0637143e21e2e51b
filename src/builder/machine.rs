//! Fluent builder for assembling state machines.

use crate::builder::error::BuildError;
use crate::core::{EventId, State, StateId};
use crate::machine::{MachineError, StateMachine};

/// Builder that collects states and an optional initial state, then
/// assembles a [`StateMachine`] in one validated step.
///
/// The builder is sugar over the imperative API; everything it does can
/// be done with [`StateMachine::add_state`] and
/// [`StateMachine::set_current`] directly.
///
/// # Example
///
/// ```rust
/// use cogwheel::{MachineBuilder, State, TransitionTable};
///
/// # #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// # enum Mode { Off, On }
/// # #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// # enum Switch { Flip }
/// # struct Lamp { id: Mode, table: TransitionTable<Switch, Mode> }
/// # impl Lamp {
/// #     fn new(id: Mode, to: Mode) -> Self {
/// #         let mut table = TransitionTable::new();
/// #         table.declare(Switch::Flip, to).unwrap();
/// #         Lamp { id, table }
/// #     }
/// # }
/// # impl State<(), Mode, Switch> for Lamp {
/// #     fn id(&self) -> Mode { self.id }
/// #     fn transitions(&self) -> &TransitionTable<Switch, Mode> { &self.table }
/// #     fn transitions_mut(&mut self) -> &mut TransitionTable<Switch, Mode> { &mut self.table }
/// #     fn on_enter(&mut self, _: &()) {}
/// #     fn on_exit(&mut self, _: &()) {}
/// #     fn on_reason(&mut self, _: &(), _: f32) {}
/// #     fn on_act(&mut self, _: &(), _: f32) {}
/// # }
/// let machine = MachineBuilder::new(())
///     .state(Lamp::new(Mode::Off, Mode::On))
///     .state(Lamp::new(Mode::On, Mode::Off))
///     .initial(Mode::Off)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state_id(), Some(Mode::Off));
/// ```
pub struct MachineBuilder<C, S: StateId, E: EventId> {
    context: C,
    states: Vec<Box<dyn State<C, S, E>>>,
    initial: Option<S>,
}

impl<C, S: StateId, E: EventId> MachineBuilder<C, S, E> {
    /// Start a builder for a machine bound to `context`.
    pub fn new(context: C) -> Self {
        Self {
            context,
            states: Vec::new(),
            initial: None,
        }
    }

    /// Add a state to be registered at build time.
    pub fn state<T>(mut self, state: T) -> Self
    where
        T: State<C, S, E> + 'static,
    {
        self.states.push(Box::new(state));
        self
    }

    /// Add an already-boxed state.
    pub fn boxed_state(mut self, state: Box<dyn State<C, S, E>>) -> Self {
        self.states.push(state);
        self
    }

    /// Set the state to activate at build time (optional).
    ///
    /// If given, `build` runs the target's `on_enter`. Without it the
    /// machine comes back uninitialized and the caller activates a
    /// state later via [`StateMachine::set_current`].
    pub fn initial(mut self, id: S) -> Self {
        self.initial = Some(id);
        self
    }

    /// Register every collected state and activate the initial one.
    ///
    /// Fails if no states were added, if two states share an
    /// identifier, or if the initial identifier is not among the
    /// registered states.
    pub fn build(self) -> Result<StateMachine<C, S, E>, BuildError<S>> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut machine = StateMachine::new(self.context);
        for state in self.states {
            if let Err(MachineError::DuplicateState(id)) = machine.add_boxed_state(state) {
                return Err(BuildError::DuplicateState(id));
            }
        }

        if let Some(id) = self.initial {
            if machine.set_current(id).is_err() {
                return Err(BuildError::UnknownInitial(id));
            }
        }

        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionTable;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    enum Step {
        First,
        Second,
    }

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    enum Go {
        Next,
    }

    struct Plain {
        id: Step,
        table: TransitionTable<Go, Step>,
        entered: Rc<Cell<u32>>,
    }

    impl Plain {
        fn new(id: Step) -> Self {
            Plain {
                id,
                table: TransitionTable::new(),
                entered: Rc::new(Cell::new(0)),
            }
        }
    }

    impl State<(), Step, Go> for Plain {
        fn id(&self) -> Step {
            self.id
        }

        fn transitions(&self) -> &TransitionTable<Go, Step> {
            &self.table
        }

        fn transitions_mut(&mut self) -> &mut TransitionTable<Go, Step> {
            &mut self.table
        }

        fn on_enter(&mut self, _ctx: &()) {
            self.entered.set(self.entered.get() + 1);
        }

        fn on_exit(&mut self, _ctx: &()) {}
        fn on_reason(&mut self, _ctx: &(), _dt: f32) {}
        fn on_act(&mut self, _ctx: &(), _dt: f32) {}
    }

    #[test]
    fn builder_requires_states() {
        let result = MachineBuilder::<(), Step, Go>::new(()).build();
        assert_eq!(result.unwrap_err(), BuildError::NoStates);
    }

    #[test]
    fn builder_rejects_duplicate_identifiers() {
        let result = MachineBuilder::new(())
            .state(Plain::new(Step::First))
            .state(Plain::new(Step::First))
            .build();
        assert_eq!(result.unwrap_err(), BuildError::DuplicateState(Step::First));
    }

    #[test]
    fn builder_rejects_unknown_initial() {
        let result = MachineBuilder::new(())
            .state(Plain::new(Step::First))
            .initial(Step::Second)
            .build();
        assert_eq!(result.unwrap_err(), BuildError::UnknownInitial(Step::Second));
    }

    #[test]
    fn build_with_initial_activates_and_enters() {
        let first = Plain::new(Step::First);
        let entered = Rc::clone(&first.entered);

        let machine = MachineBuilder::new(())
            .state(first)
            .state(Plain::new(Step::Second))
            .initial(Step::First)
            .build()
            .unwrap();

        assert_eq!(machine.current_state_id(), Some(Step::First));
        assert_eq!(entered.get(), 1);
    }

    #[test]
    fn build_without_initial_leaves_machine_uninitialized() {
        let machine = MachineBuilder::new(())
            .state(Plain::new(Step::First))
            .build()
            .unwrap();

        assert!(!machine.has_current_state());
        assert!(machine.is_valid_state(Step::First));
    }
}
