//! Builder API for ergonomic machine construction.
//!
//! [`StateMachineBuilder`] assembles a machine fluently and validates the
//! whole configuration at [`build`](StateMachineBuilder::build) time; the
//! [`state!`](crate::state!) macro declares the trivial states most
//! machines are full of.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
