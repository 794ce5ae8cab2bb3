//! The state machine proper: registries, handles, and the transition
//! algorithm.

use crate::core::State;
use crate::machine::error::MachineError;
use crate::machine::group::TransitionGroup;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// A registry of named states with guarded transitions between them,
/// driven by externally supplied exciters.
///
/// The machine exclusively owns its states and transition groups; the
/// start/current/end references are identifier handles into the state
/// registry, so removing a state can never leave a dangling reference.
/// `X` is the exciter type: an opaque stimulus the machine passes through
/// to transition guards unchanged.
///
/// The machine is not internally synchronized: exactly one thread or
/// cooperative task may drive it at a time. Stimuli produced elsewhere
/// must be marshalled into that context before they reach
/// [`next`](StateMachine::next).
///
/// # Example
///
/// ```rust
/// use excitable::builder::StateMachineBuilder;
/// use excitable::core::Guard;
/// use excitable::machine::GuardedTransitionGroup;
/// use excitable::state;
///
/// state! {
///     struct Menu => "menu";
///     struct Playing => "playing";
///     struct GameOver => "game-over";
/// }
///
/// let mut machine = StateMachineBuilder::new()
///     .state(Menu::default())
///     .state(Playing::default())
///     .state(GameOver::default())
///     .group(
///         "menu",
///         GuardedTransitionGroup::new().edge("playing", Guard::equals("start")),
///     )
///     .group(
///         "playing",
///         GuardedTransitionGroup::new().edge("game-over", Guard::equals("died")),
///     )
///     .start("menu")
///     .end("game-over")
///     .build()
///     .unwrap();
///
/// machine.reset(false).unwrap();
/// assert_eq!(machine.current_state_id(), Some("menu"));
///
/// assert!(machine.next(&"start").unwrap());
/// assert!(!machine.next(&"jump").unwrap()); // no guard accepts it
/// assert!(machine.next(&"died").unwrap());
/// assert!(machine.halted());
/// ```
pub struct StateMachine<X> {
    states: HashMap<String, Box<dyn State>>,
    transition_groups: HashMap<String, Box<dyn TransitionGroup<X>>>,
    start: Option<String>,
    current: Option<String>,
    end: Option<String>,
}

impl<X> StateMachine<X> {
    /// Create an empty machine: no states, no groups, no handles set.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            transition_groups: HashMap::new(),
            start: None,
            current: None,
            end: None,
        }
    }

    // ---- registry mutation ----

    /// Register a state, overwriting any previous state with the same
    /// identifier.
    pub fn add_state(&mut self, state: impl State + 'static) {
        self.insert_boxed_state(Box::new(state));
    }

    pub(crate) fn insert_boxed_state(&mut self, state: Box<dyn State>) {
        let identifier = state.identifier().to_string();
        trace!(identifier = %identifier, "state registered");
        self.states.insert(identifier, state);
    }

    /// Remove a state and everything that references it: its transition
    /// group, its appearances as a destination in every remaining group,
    /// and any of the start/current/end handles pointing at it.
    pub fn remove_state(&mut self, identifier: &str) -> Result<(), MachineError> {
        if self.states.remove(identifier).is_none() {
            return Err(MachineError::UnknownState {
                identifier: identifier.to_string(),
            });
        }
        self.transition_groups.remove(identifier);
        for group in self.transition_groups.values_mut() {
            if group.contains(identifier) {
                group.remove_connection(identifier);
            }
        }
        if self.start.as_deref() == Some(identifier) {
            self.start = None;
        }
        if self.current.as_deref() == Some(identifier) {
            self.current = None;
        }
        if self.end.as_deref() == Some(identifier) {
            self.end = None;
        }
        trace!(identifier = %identifier, "state removed");
        Ok(())
    }

    /// Register the transition group for `source`, overwriting any
    /// previous group for that source. The source must be a registered
    /// state.
    pub fn add_transition_group(
        &mut self,
        source: &str,
        group: impl TransitionGroup<X> + 'static,
    ) -> Result<(), MachineError> {
        self.insert_boxed_group(source, Box::new(group))
    }

    pub(crate) fn insert_boxed_group(
        &mut self,
        source: &str,
        group: Box<dyn TransitionGroup<X>>,
    ) -> Result<(), MachineError> {
        if !self.states.contains_key(source) {
            return Err(MachineError::UnknownState {
                identifier: source.to_string(),
            });
        }
        trace!(source = %source, "transition group registered");
        self.transition_groups.insert(source.to_string(), group);
        Ok(())
    }

    /// Remove the transition group registered for `source`.
    pub fn remove_transition_group(&mut self, source: &str) -> Result<(), MachineError> {
        if self.transition_groups.remove(source).is_none() {
            return Err(MachineError::UnknownGroup {
                source_id: source.to_string(),
            });
        }
        trace!(source = %source, "transition group removed");
        Ok(())
    }

    // ---- start/current/end handles ----

    /// The configured start state.
    pub fn start_state(&self) -> Option<&dyn State> {
        self.resolve(&self.start)
    }

    /// The configured start state's identifier.
    pub fn start_state_id(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Point the start handle at a registered state.
    pub fn set_start_state_id(&mut self, identifier: &str) -> Result<(), MachineError> {
        self.ensure_registered(identifier)?;
        self.start = Some(identifier.to_string());
        Ok(())
    }

    /// Set the start state by instance, registering it first if its
    /// identifier is not already present.
    pub fn set_start_state(&mut self, state: impl State + 'static) {
        let identifier = self.register_if_absent(Box::new(state));
        self.start = Some(identifier);
    }

    /// The current state.
    pub fn current_state(&self) -> Option<&dyn State> {
        self.resolve(&self.current)
    }

    /// The current state's identifier.
    pub fn current_state_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Point the current handle at a registered state.
    ///
    /// This is a handle move, not a transition: no hook fires and the
    /// adopted state's volatile store is left as-is. The abandoned state's
    /// scratch is discarded, since its visit is over. Hook-observing
    /// transitions happen only through [`reset`](StateMachine::reset) and
    /// [`next`](StateMachine::next).
    pub fn set_current_state_id(&mut self, identifier: &str) -> Result<(), MachineError> {
        self.ensure_registered(identifier)?;
        self.discard_outgoing_scratch();
        self.current = Some(identifier.to_string());
        Ok(())
    }

    /// Set the current state by instance, registering it first if its
    /// identifier is not already present. Same handle-move semantics as
    /// [`set_current_state_id`](StateMachine::set_current_state_id).
    pub fn set_current_state(&mut self, state: impl State + 'static) {
        let identifier = self.register_if_absent(Box::new(state));
        self.discard_outgoing_scratch();
        self.current = Some(identifier);
    }

    /// The configured end state.
    pub fn end_state(&self) -> Option<&dyn State> {
        self.resolve(&self.end)
    }

    /// The configured end state's identifier.
    pub fn end_state_id(&self) -> Option<&str> {
        self.end.as_deref()
    }

    /// Point the end handle at a registered state.
    pub fn set_end_state_id(&mut self, identifier: &str) -> Result<(), MachineError> {
        self.ensure_registered(identifier)?;
        self.end = Some(identifier.to_string());
        Ok(())
    }

    /// Set the end state by instance, registering it first if its
    /// identifier is not already present.
    pub fn set_end_state(&mut self, state: impl State + 'static) {
        let identifier = self.register_if_absent(Box::new(state));
        self.end = Some(identifier);
    }

    // ---- drive ----

    /// Whether the machine is halted: no current state, or the current
    /// state equals the configured end state. A machine with no end state
    /// halts only by losing its current state.
    pub fn halted(&self) -> bool {
        match (&self.current, &self.end) {
            (None, _) => true,
            (Some(current), Some(end)) => current == end,
            (Some(_), None) => false,
        }
    }

    /// Re-establish the start state as current and fire its entry hook.
    ///
    /// The adopted state's volatile store is cleared before the hook runs.
    /// With `reset_states`, every registered state's
    /// [`reset`](State::reset) is additionally invoked (in unspecified
    /// order) after the entry hook has fired.
    pub fn reset(&mut self, reset_states: bool) -> Result<(), MachineError> {
        let start = self.start.clone().ok_or(MachineError::NoStartState)?;
        debug!(start = %start, reset_states, "machine reset");
        self.discard_outgoing_scratch();
        self.current = Some(start.clone());
        let adopted = self
            .states
            .get_mut(&start)
            .expect("registry invariant: the start handle resolves");
        adopted.volatile_mut().clear();
        adopted.before_entry();
        if reset_states {
            for state in self.states.values_mut() {
                state.reset();
            }
        }
        Ok(())
    }

    /// Evaluate one stimulus against the current state's transition group.
    ///
    /// Returns `Ok(true)` when a transition was taken, `Ok(false)` when
    /// the machine is halted or no guard accepted the exciter (the
    /// stimulus is silently rejected and nothing fires). Configuration
    /// faults come back as errors, raised before any hook has run, so a
    /// faulted call never partially mutates the machine.
    pub fn next(&mut self, exciter: &X) -> Result<bool, MachineError> {
        if self.halted() {
            return Ok(false);
        }
        let from = self
            .current
            .clone()
            .expect("a non-halted machine has a current state");
        let group = self.transition_groups.get(&from).ok_or_else(|| {
            MachineError::MissingTransitionGroup {
                state: from.clone(),
            }
        })?;

        let mut candidates = group.possible_destinations(exciter);
        if candidates.is_empty() {
            return Ok(false);
        }
        if candidates.len() > 1 {
            return Err(MachineError::AmbiguousTransition { from, candidates });
        }
        let destination = candidates.pop().expect("exactly one candidate");
        if !self.states.contains_key(&destination) {
            return Err(MachineError::UnknownDestination { from, destination });
        }

        self.states
            .get_mut(&from)
            .expect("registry invariant: current is registered")
            .before_leave();
        debug!(from = %from, to = %destination, "transition");
        self.current = Some(destination.clone());
        let adopted = self
            .states
            .get_mut(&destination)
            .expect("destination was checked against the registry");
        adopted.volatile_mut().clear();
        adopted.before_entry();
        Ok(true)
    }

    /// Let the current state perform per-tick work. No-op when halted;
    /// never evaluates transitions.
    pub fn update(&mut self) {
        if self.halted() {
            return;
        }
        if let Some(identifier) = self.current.clone() {
            if let Some(state) = self.states.get_mut(&identifier) {
                state.update();
            }
        }
    }

    // ---- introspection ----

    /// Look up a state by identifier.
    pub fn get(&self, identifier: &str) -> Option<&dyn State> {
        self.states.get(identifier).map(|state| state.as_ref())
    }

    /// Look up a state by identifier, mutably.
    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut (dyn State + 'static)> {
        self.states.get_mut(identifier).map(|state| state.as_mut())
    }

    /// Whether a state with this identifier is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.states.contains_key(identifier)
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the registry holds no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterate over every registered state, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &dyn State> {
        self.states.values().map(|state| state.as_ref())
    }

    /// Iterate over every registered state identifier, in no particular
    /// order.
    pub fn state_ids(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Look up the transition group registered for `source`.
    pub fn transition_group(&self, source: &str) -> Option<&dyn TransitionGroup<X>> {
        self.transition_groups.get(source).map(|group| group.as_ref())
    }

    /// Iterate over every source identifier that has a transition group.
    pub fn transition_group_ids(&self) -> impl Iterator<Item = &str> {
        self.transition_groups.keys().map(String::as_str)
    }

    /// Iterate over every registered transition group with its source
    /// identifier, in no particular order.
    pub fn transition_groups(&self) -> impl Iterator<Item = (&str, &dyn TransitionGroup<X>)> {
        self.transition_groups
            .iter()
            .map(|(source, group)| (source.as_str(), group.as_ref()))
    }

    // ---- internals ----

    fn resolve(&self, handle: &Option<String>) -> Option<&dyn State> {
        handle
            .as_deref()
            .and_then(|identifier| self.states.get(identifier))
            .map(|state| state.as_ref())
    }

    fn ensure_registered(&self, identifier: &str) -> Result<(), MachineError> {
        if self.states.contains_key(identifier) {
            Ok(())
        } else {
            Err(MachineError::UnknownState {
                identifier: identifier.to_string(),
            })
        }
    }

    fn register_if_absent(&mut self, state: Box<dyn State>) -> String {
        let identifier = state.identifier().to_string();
        if !self.states.contains_key(&identifier) {
            trace!(identifier = %identifier, "state registered");
            self.states.insert(identifier.clone(), state);
        }
        identifier
    }

    fn discard_outgoing_scratch(&mut self) {
        if let Some(identifier) = self.current.clone() {
            if let Some(state) = self.states.get_mut(&identifier) {
                state.volatile_mut().clear();
            }
        }
    }
}

impl<X> Default for StateMachine<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X> fmt::Debug for StateMachine<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.states.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("StateMachine")
            .field("states", &ids)
            .field("start", &self.start)
            .field("current", &self.current)
            .field("end", &self.end)
            .finish()
    }
}
