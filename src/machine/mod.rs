//! The engine proper: the state machine and its transition groups.
//!
//! - [`StateMachine`]: owned registries of states and transition groups,
//!   start/current/end handles, and the synchronous transition algorithm
//! - [`TransitionGroup`]: the guarded outgoing edges of one source state
//! - [`GuardedTransitionGroup`]: the standard ordered-edge implementation
//! - [`MachineError`]: precondition violations and the resolution-policy
//!   fault

pub mod error;
pub mod group;
#[allow(clippy::module_inception)]
mod machine;

pub use error::MachineError;
pub use group::{GuardedTransitionGroup, TransitionGroup};
pub use machine::StateMachine;
