//! The normalized invocation request handed to the dispatcher.

use std::collections::BTreeMap;

use crate::error::RequestError;
use crate::mode::InvocationMode;

/// One invocation, already tokenized by a front end.
///
/// The request is immutable once built. The full candidate path seen by the
/// pattern matcher is the slash-split `name` followed by the positional
/// segments, so `tool users/123` and `tool users 123` resolve identically.
///
/// # Example
///
/// ```rust
/// use switchyard_core::{InvocationMode, InvocationRequest};
///
/// let request = InvocationRequest::builder("say", InvocationMode::Cli)
///     .arg("Hello")
///     .attr("--loud", "true")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.path(), vec!["say", "Hello"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    name: String,
    positional: Vec<String>,
    named: BTreeMap<String, String>,
    mode: InvocationMode,
}

impl InvocationRequest {
    /// Starts building a request for `name` observed in `mode`.
    pub fn builder(name: impl Into<String>, mode: InvocationMode) -> RequestBuilder {
        RequestBuilder {
            name: name.into(),
            positional: Vec::new(),
            named: BTreeMap::new(),
            mode,
        }
    }

    /// Returns the symbolic name exactly as the front end supplied it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the positional segments supplied after the name.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Returns all named attributes, keyed exactly as supplied.
    pub fn named(&self) -> &BTreeMap<String, String> {
        &self.named
    }

    /// Looks up a named attribute by its literal key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Returns the observed invocation mode (never [`InvocationMode::Any`]).
    pub fn mode(&self) -> InvocationMode {
        self.mode
    }

    /// Returns the candidate path: name segments followed by positional segments.
    pub fn path(&self) -> Vec<&str> {
        self.name
            .split('/')
            .filter(|s| !s.is_empty())
            .chain(self.positional.iter().map(String::as_str))
            .collect()
    }
}

/// Builder for [`InvocationRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    name: String,
    positional: Vec<String>,
    named: BTreeMap<String, String>,
    mode: InvocationMode,
}

impl RequestBuilder {
    /// Appends one positional segment.
    pub fn arg(mut self, segment: impl Into<String>) -> Self {
        self.positional.push(segment.into());
        self
    }

    /// Appends several positional segments in order.
    pub fn args<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional.extend(segments.into_iter().map(Into::into));
        self
    }

    /// Sets a named attribute; a repeated key overwrites the earlier value.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// - [`RequestError::WildcardMode`] if the mode is [`InvocationMode::Any`].
    /// - [`RequestError::EmptyName`] if the name has no non-empty segment.
    pub fn build(self) -> Result<InvocationRequest, RequestError> {
        if self.mode.is_wildcard() {
            return Err(RequestError::WildcardMode);
        }
        if self.name.split('/').all(str::is_empty) {
            return Err(RequestError::EmptyName);
        }
        Ok(InvocationRequest {
            name: self.name,
            positional: self.positional,
            named: self.named,
            mode: self.mode,
        })
    }
}
