//! Invocation outcomes: payloads on success, tagged failures otherwise.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::error::ActionError;

/// Opaque success payload; front ends decide how to serialise it.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The handler produced nothing.
    Empty,
    /// Plain text (CLI stdout, `text/plain` bodies).
    Text(String),
    /// Structured data.
    Json(Value),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Payload {
    /// Renders text and JSON payloads as a string.
    ///
    /// Returns `None` for [`Bytes`](Self::Bytes) that are not valid UTF-8.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => Some(String::new()),
            Self::Text(text) => Some(text.clone()),
            Self::Json(value) => Some(value.to_string()),
            Self::Bytes(bytes) => String::from_utf8(bytes.clone()).ok(),
        }
    }

    /// Returns `true` for [`Empty`](Self::Empty).
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Failure taxonomy. Every kind is terminal from the engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No action's literal prefix matches the requested name.
    NotFound,
    /// Two or more actions tie after full resolution.
    AmbiguousMatch,
    /// The name matched but no action accepts the observed mode.
    ModeRejected,
    /// A required parameter was absent.
    MissingParameter,
    /// A segment failed conversion, or unconsumed segments remained.
    BindingTypeMismatch,
    /// The handler ran and raised a domain error.
    HandlerThrew,
}

impl FailureKind {
    /// Returns a stable snake-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AmbiguousMatch => "ambiguous_match",
            Self::ModeRejected => "mode_rejected",
            Self::MissingParameter => "missing_parameter",
            Self::BindingTypeMismatch => "binding_type_mismatch",
            Self::HandlerThrew => "handler_threw",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged dispatch failure.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {detail}")]
pub struct Failure {
    kind: FailureKind,
    detail: String,
    #[source]
    cause: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Failure {
    /// Creates a failure without a cause.
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            cause: None,
        }
    }

    /// Attaches the original error.
    pub fn with_cause(
        mut self,
        cause: impl Into<Arc<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound, detail)
    }

    pub fn ambiguous(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::AmbiguousMatch, detail)
    }

    pub fn mode_rejected(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::ModeRejected, detail)
    }

    pub fn missing_parameter(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::MissingParameter, detail)
    }

    pub fn type_mismatch(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::BindingTypeMismatch, detail)
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the human-readable detail.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns the preserved cause, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl From<ActionError> for Failure {
    fn from(error: ActionError) -> Self {
        match error {
            ActionError::MissingParameter { name } => {
                Failure::missing_parameter(format!("missing required parameter '{name}'"))
            }
            ActionError::Domain { message, source } => {
                let failure = Failure::new(FailureKind::HandlerThrew, message);
                match source {
                    Some(source) => failure.with_cause(Arc::from(source)),
                    None => failure,
                }
            }
        }
    }
}

/// The single outcome of one dispatch.
#[derive(Debug, Clone)]
pub enum InvocationResult {
    Success(Payload),
    Failure(Failure),
}

impl InvocationResult {
    /// Returns `true` on success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.kind()),
        }
    }

    /// Returns the payload, if this is a success.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<Payload, Failure> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl From<Result<Payload, Failure>> for InvocationResult {
    fn from(result: Result<Payload, Failure>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(failure) => Self::Failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn domain_errors_become_handler_threw_with_cause() {
        let err = ActionError::context("query failed", std::io::Error::other("connection reset"));
        let failure = Failure::from(err);
        assert_eq!(failure.kind(), FailureKind::HandlerThrew);
        assert_eq!(failure.detail(), "query failed");
        assert_eq!(
            failure.source().map(ToString::to_string).as_deref(),
            Some("connection reset")
        );
    }

    #[test]
    fn missing_parameter_is_propagated_unchanged() {
        let failure = Failure::from(ActionError::missing("--words"));
        assert_eq!(failure.kind(), FailureKind::MissingParameter);
        assert!(failure.detail().contains("--words"));
        assert!(failure.cause().is_none());
    }

    #[test]
    fn display_includes_kind_and_detail() {
        let failure = Failure::not_found("no action named 'nope'");
        assert_eq!(failure.to_string(), "not_found: no action named 'nope'");
    }

    #[test]
    fn json_payload_renders_as_text() {
        let payload = Payload::Json(serde_json::json!({"id": 1}));
        assert_eq!(payload.as_text().as_deref(), Some(r#"{"id":1}"#));
        assert_eq!(Payload::Bytes(vec![0xff]).as_text(), None);
    }
}
