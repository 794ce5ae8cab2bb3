//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Start state not specified. Call .start(identifier) before .build()")]
    MissingStartState,

    #[error("{role} references unregistered state '{identifier}'")]
    UnknownStateReference {
        role: &'static str,
        identifier: String,
    },
}
