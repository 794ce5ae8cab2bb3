//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::{StateMachine, TransitionGroup};

/// Builder assembling a [`StateMachine`] with a fluent API.
///
/// Collects states, transition groups, and the start/end handles, then
/// validates the whole configuration in [`build`](StateMachineBuilder::build):
/// the start handle is required, and every identifier referenced by a
/// handle or group source must name a registered state. The built machine
/// has no current state; call [`StateMachine::reset`] to begin driving it.
pub struct StateMachineBuilder<X> {
    states: Vec<Box<dyn State>>,
    groups: Vec<(String, Box<dyn TransitionGroup<X>>)>,
    start: Option<String>,
    end: Option<String>,
}

impl<X> StateMachineBuilder<X> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            groups: Vec::new(),
            start: None,
            end: None,
        }
    }

    /// Add a state to the registry.
    pub fn state(mut self, state: impl State + 'static) -> Self {
        self.states.push(Box::new(state));
        self
    }

    /// Register the transition group for `source`.
    pub fn group(
        mut self,
        source: impl Into<String>,
        group: impl TransitionGroup<X> + 'static,
    ) -> Self {
        self.groups.push((source.into(), Box::new(group)));
        self
    }

    /// Set the start state by identifier (required).
    pub fn start(mut self, identifier: impl Into<String>) -> Self {
        self.start = Some(identifier.into());
        self
    }

    /// Set the end state by identifier (optional). Without one, the
    /// machine never halts by reaching a particular state.
    pub fn end(mut self, identifier: impl Into<String>) -> Self {
        self.end = Some(identifier.into());
        self
    }

    /// Validate the configuration and build the machine.
    pub fn build(self) -> Result<StateMachine<X>, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStartState)?;

        let mut machine = StateMachine::new();
        for state in self.states {
            machine.insert_boxed_state(state);
        }
        for (source, group) in self.groups {
            machine
                .insert_boxed_group(&source, group)
                .map_err(|_| BuildError::UnknownStateReference {
                    role: "Transition group source",
                    identifier: source.clone(),
                })?;
        }
        machine
            .set_start_state_id(&start)
            .map_err(|_| BuildError::UnknownStateReference {
                role: "Start handle",
                identifier: start.clone(),
            })?;
        if let Some(end) = self.end {
            machine
                .set_end_state_id(&end)
                .map_err(|_| BuildError::UnknownStateReference {
                    role: "End handle",
                    identifier: end.clone(),
                })?;
        }

        Ok(machine)
    }
}

impl<X> Default for StateMachineBuilder<X> {
    fn default() -> Self {
        Self::new()
    }
}
