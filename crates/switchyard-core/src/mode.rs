//! Invocation modes.
//!
//! Every [`InvocationRequest`](crate::InvocationRequest) is tagged with the
//! mode it was *observed* in (a command-line invocation or one HTTP verb),
//! and every action declares the mode it *accepts*. [`InvocationMode::Any`]
//! only makes sense on the accepting side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The surface an invocation arrived through, or the surface an action accepts.
///
/// Modes are disjoint tags: there is no relationship between the HTTP verbs
/// and [`Cli`](Self::Cli) beyond the [`Any`](Self::Any) wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvocationMode {
    /// Descriptor wildcard; accepts every observed mode.
    Any,
    /// Command-line invocation.
    Cli,
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl InvocationMode {
    /// All modes that may be observed on an incoming request.
    pub const OBSERVABLE: [InvocationMode; 8] = [
        Self::Cli,
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Options,
    ];

    /// Parses an HTTP method name (case-insensitive).
    ///
    /// Returns `None` for methods outside the seven supported verbs.
    pub fn from_http_method(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }

    /// Returns the canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Cli => "CLI",
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Returns `true` for the [`Any`](Self::Any) wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns `true` if an action declared with `self` may serve a request
    /// observed in `observed` mode.
    pub fn admits(&self, observed: InvocationMode) -> bool {
        self.is_wildcard() || *self == observed
    }
}

impl fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invocation mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for InvocationMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ANY" => Ok(Self::Any),
            "CLI" => Ok(Self::Cli),
            other => Self::from_http_method(other).ok_or_else(|| UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_admits_everything() {
        for mode in InvocationMode::OBSERVABLE {
            assert!(InvocationMode::Any.admits(mode));
        }
    }

    #[test]
    fn verbs_and_cli_are_disjoint() {
        assert!(InvocationMode::Get.admits(InvocationMode::Get));
        assert!(!InvocationMode::Get.admits(InvocationMode::Post));
        assert!(!InvocationMode::Cli.admits(InvocationMode::Get));
        assert!(!InvocationMode::Get.admits(InvocationMode::Cli));
    }

    #[test]
    fn parses_http_methods_case_insensitively() {
        assert_eq!(
            InvocationMode::from_http_method("patch"),
            Some(InvocationMode::Patch)
        );
        assert_eq!(InvocationMode::from_http_method("TRACE"), None);
        assert_eq!("cli".parse::<InvocationMode>(), Ok(InvocationMode::Cli));
        assert!("bogus".parse::<InvocationMode>().is_err());
    }

    #[test]
    fn serde_uses_upper_case_names() {
        let json = serde_json::to_string(&InvocationMode::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let mode: InvocationMode = serde_json::from_str("\"CLI\"").unwrap();
        assert_eq!(mode, InvocationMode::Cli);
    }
}
