//! Error types shared between the engine, handlers, and front ends.

use thiserror::Error;

/// A boxed, thread-safe error used as an opaque cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while building an [`InvocationRequest`](crate::InvocationRequest).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// `ANY` is a descriptor wildcard and can never be an observed mode.
    #[error("ANY is not an observable invocation mode")]
    WildcardMode,

    /// The invocation name contained no non-empty segment.
    #[error("invocation name is empty")]
    EmptyName,
}

/// Errors a handler returns to the dispatcher.
///
/// The dispatcher maps [`MissingParameter`](Self::MissingParameter) to
/// [`FailureKind::MissingParameter`](crate::FailureKind::MissingParameter)
/// unchanged and everything else to
/// [`FailureKind::HandlerThrew`](crate::FailureKind::HandlerThrew), keeping
/// the message and the original cause.
///
/// # Example
///
/// ```rust
/// use switchyard_core::ActionError;
///
/// fn parse_limit(raw: &str) -> Result<u32, ActionError> {
///     raw.parse().map_err(ActionError::from_error)
/// }
///
/// assert!(parse_limit("ten").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ActionError {
    /// A context-pull handler could not find a named attribute it requires.
    #[error("missing required parameter '{name}'")]
    MissingParameter { name: String },

    /// Domain-level failure raised by handler code.
    #[error("{message}")]
    Domain {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ActionError {
    /// Creates a missing-parameter error for the named attribute.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Creates a domain error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps any error as a domain error, keeping it as the cause.
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Domain {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    /// Wraps an error with additional context.
    pub fn context<E>(message: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Domain {
            message: message.into(),
            source: Some(Box::new(error)),
        }
    }
}

impl From<BoxError> for ActionError {
    fn from(source: BoxError) -> Self {
        Self::Domain {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

impl From<std::io::Error> for ActionError {
    fn from(error: std::io::Error) -> Self {
        Self::from_error(error)
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(error: serde_json::Error) -> Self {
        Self::from_error(error)
    }
}

/// Result type for handler bodies.
pub type ActionResult<T> = Result<T, ActionError>;
