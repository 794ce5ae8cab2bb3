//! Machine error types.

use thiserror::Error;

/// Errors surfaced by [`StateMachine`](crate::machine::StateMachine)
/// operations.
///
/// All of these indicate a malformed machine configuration or a
/// resolution-policy fault, not runtime conditions: a halted machine or a
/// stimulus no guard accepts is reported as `Ok(false)` from
/// [`next`](crate::machine::StateMachine::next), never as an error. A
/// faulted call leaves the machine exactly as it was: no hook fires and
/// the current state is untouched.
#[derive(Debug, Error)]
pub enum MachineError {
    /// An identifier was looked up in the state registry and is not there.
    #[error("no state '{identifier}' is registered")]
    UnknownState { identifier: String },

    /// A transition group was removed by a source identifier that has none.
    #[error("no transition group is registered for source '{source_id}'")]
    UnknownGroup { source_id: String },

    /// `next` was called while the current state has no transition group.
    /// Every reachable, non-halted state must have one.
    #[error("current state '{state}' has no transition group")]
    MissingTransitionGroup { state: String },

    /// An edge of the current state's group names a destination that is
    /// not registered.
    #[error("transition from '{from}' targets unregistered state '{destination}'")]
    UnknownDestination { from: String, destination: String },

    /// More than one destination was eligible for a single stimulus.
    /// Surfaced instead of silently picking one, so configuration bugs
    /// stay visible.
    #[error("ambiguous transition from '{from}': eligible destinations {candidates:?}")]
    AmbiguousTransition {
        from: String,
        candidates: Vec<String>,
    },

    /// `reset` was called before a start state was configured.
    #[error("start state is not set")]
    NoStartState,
}
