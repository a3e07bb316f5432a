//! Runtime error types.

use switchyard_framework::RegistrationError;
use thiserror::Error;

use crate::application::LifecycleState;
use crate::config::ConfigError;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A lifecycle operation was called from a state that does not allow it.
    #[error("Cannot {operation} an application that is {state}")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },

    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Building the action registry failed.
    #[error("Failed to register actions: {0}")]
    Registration(#[from] RegistrationError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
