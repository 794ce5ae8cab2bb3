//! Excitable: an exciter-driven finite state machine engine
//!
//! Excitable is a registry of named states, a per-state set of guarded
//! transitions, and a synchronous transition-evaluation algorithm driven
//! by externally supplied stimuli ("exciters"). It knows nothing about
//! rendering, audio, assets, or input plumbing; those live in the
//! embedding application, which produces the exciters the engine consumes
//! and reads the current state to decide what to do next.
//!
//! # Core Concepts
//!
//! - **State**: a named unit of behavior with lifecycle hooks and a
//!   per-visit volatile store, via the [`State`] trait
//! - **Transition group**: the complete set of guarded outgoing edges of
//!   one source state, via the [`TransitionGroup`] trait
//! - **Exciter**: an opaque stimulus the machine passes through to guards
//!   unchanged; the machine is generic over its type
//! - **Halting**: a machine halts when it has no current state or the
//!   current state equals the configured end state; only
//!   [`reset`](machine::StateMachine::reset) brings it back
//!
//! # Example
//!
//! ```rust
//! use excitable::builder::StateMachineBuilder;
//! use excitable::core::Guard;
//! use excitable::machine::GuardedTransitionGroup;
//! use excitable::state;
//!
//! state! {
//!     struct Locked => "locked";
//!     struct Unlocked => "unlocked";
//! }
//!
//! #[derive(PartialEq)]
//! enum Input {
//!     Coin,
//!     Push,
//! }
//!
//! let mut turnstile = StateMachineBuilder::new()
//!     .state(Locked::default())
//!     .state(Unlocked::default())
//!     .group(
//!         "locked",
//!         GuardedTransitionGroup::new().edge("unlocked", Guard::equals(Input::Coin)),
//!     )
//!     .group(
//!         "unlocked",
//!         GuardedTransitionGroup::new().edge("locked", Guard::equals(Input::Push)),
//!     )
//!     .start("locked")
//!     .build()
//!     .unwrap();
//!
//! turnstile.reset(false).unwrap();
//! assert!(!turnstile.next(&Input::Push).unwrap()); // rejected, stays locked
//! assert!(turnstile.next(&Input::Coin).unwrap());
//! assert_eq!(turnstile.current_state_id(), Some("unlocked"));
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{Guard, State, VolatileStore};
pub use builder::StateMachineBuilder;
pub use machine::{GuardedTransitionGroup, MachineError, StateMachine, TransitionGroup};
pub use snapshot::Snapshot;
