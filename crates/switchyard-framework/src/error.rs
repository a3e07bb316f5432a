//! Error types for the Switchyard framework.

use switchyard_core::{Failure, InvocationMode};
use thiserror::Error;

/// Errors that can occur while binding captured segments and context values
/// to a handler's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A positional segment could not be converted to the declared type.
    #[error("segment #{index} '{value}' is not a valid {expected}")]
    TypeMismatch {
        /// Zero-based position among the captured segments.
        index: usize,
        /// Declared segment type name.
        expected: &'static str,
        /// The raw segment.
        value: String,
    },

    /// The handler declares more segment parameters than were captured.
    #[error("missing segment #{index} ({expected})")]
    Missing {
        index: usize,
        expected: &'static str,
    },

    /// Captured segments remained after every parameter was bound.
    #[error("{count} unconsumed argument(s)")]
    ExtraArguments { count: usize },

    /// A `State<T>` parameter has no value registered for `T`.
    #[error("no shared state of type '{type_name}' is registered")]
    MissingState { type_name: &'static str },
}

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;

impl From<BindError> for Failure {
    fn from(error: BindError) -> Self {
        match error {
            BindError::TypeMismatch { .. } | BindError::ExtraArguments { .. } => {
                Failure::type_mismatch(error.to_string())
            }
            BindError::Missing { .. } | BindError::MissingState { .. } => {
                Failure::missing_parameter(error.to_string())
            }
        }
    }
}

/// Errors raised while registering actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two actions share name, mode and segment signature.
    #[error("action '{name}' [{mode}] with signature ({signature}) is already registered")]
    Conflict {
        name: String,
        mode: InvocationMode,
        signature: String,
    },

    /// The action name has no literal segment.
    #[error("action name '{0}' has no literal segment")]
    EmptyName(String),

    /// Two controllers in one manifest share a name.
    #[error("controller '{0}' is listed more than once")]
    DuplicateController(String),
}

/// Result type for registration operations.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

#[cfg(test)]
mod tests {
    use switchyard_core::FailureKind;

    use super::*;

    #[test]
    fn bind_errors_map_to_failure_kinds() {
        let mismatch = BindError::TypeMismatch {
            index: 0,
            expected: "Integer",
            value: "abc".into(),
        };
        assert_eq!(Failure::from(mismatch).kind(), FailureKind::BindingTypeMismatch);
        assert_eq!(
            Failure::from(BindError::ExtraArguments { count: 2 }).kind(),
            FailureKind::BindingTypeMismatch
        );
        assert_eq!(
            Failure::from(BindError::MissingState { type_name: "Db" }).kind(),
            FailureKind::MissingParameter
        );
    }
}
