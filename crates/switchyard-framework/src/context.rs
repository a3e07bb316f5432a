//! The explicit invocation context handed to handlers.
//!
//! A [`Context`] is created once per dispatch, after resolution, and is the
//! only way a handler reaches anything beyond its declared segment
//! parameters: the request's named attributes, the observed mode, and the
//! application's shared state. Cloning is cheap; every clone shares the same
//! inner data.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use switchyard_core::{ActionError, ActionResult, InvocationMode, InvocationRequest};

/// Type-keyed map of application-provided shared values.
///
/// Populated before the registry starts and read-only afterwards; handlers
/// reach it through [`Context::state`] or the [`State`](crate::State)
/// extractor.
#[derive(Default)]
pub struct StateMap {
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl StateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing any earlier value of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Arc::new(value));
    }

    /// Stores an already shared value.
    pub fn insert_arc<T: Send + Sync + 'static>(&mut self, value: Arc<T>) {
        self.values.insert(TypeId::of::<T>(), value);
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for StateMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMap")
            .field("len", &self.values.len())
            .finish()
    }
}

struct ContextInner {
    request: InvocationRequest,
    action: String,
    controller: String,
    state: Arc<StateMap>,
}

/// Per-invocation context.
///
/// # Example
///
/// ```rust
/// use switchyard_core::ActionResult;
/// use switchyard_framework::Context;
///
/// async fn say(ctx: Context) -> ActionResult<String> {
///     Ok(ctx.require("--words")?.to_string())
/// }
/// ```
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    pub(crate) fn new(
        request: InvocationRequest,
        action: impl Into<String>,
        controller: impl Into<String>,
        state: Arc<StateMap>,
    ) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                request,
                action: action.into(),
                controller: controller.into(),
                state,
            }),
        }
    }

    /// Returns the request being served.
    pub fn request(&self) -> &InvocationRequest {
        &self.inner.request
    }

    /// Returns the observed mode.
    pub fn mode(&self) -> InvocationMode {
        self.inner.request.mode()
    }

    /// Returns the name of the selected action.
    pub fn action(&self) -> &str {
        &self.inner.action
    }

    /// Returns the controller that owns the selected action.
    pub fn controller(&self) -> &str {
        &self.inner.controller
    }

    /// Looks up a named attribute.
    ///
    /// `"words"` and `"--words"` address the same attribute. The key style of
    /// the observed mode is tried first (`--words` on the command line, bare
    /// `words` for HTTP query keys), then the other style. Absence is `None`;
    /// there is no implicit default.
    pub fn attr(&self, key: &str) -> Option<&str> {
        let bare = key.trim_start_matches("--");
        let flag = format!("--{bare}");
        let request = &self.inner.request;
        let (first, second) = if request.mode() == InvocationMode::Cli {
            (flag.as_str(), bare)
        } else {
            (bare, flag.as_str())
        };
        request.attr(first).or_else(|| request.attr(second))
    }

    /// Like [`attr`](Self::attr), but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingParameter`] naming `key` when the
    /// attribute is absent in both key styles.
    pub fn require(&self, key: &str) -> ActionResult<&str> {
        self.attr(key).ok_or_else(|| ActionError::missing(key))
    }

    /// Looks up a named attribute, falling back to `default` when absent.
    pub fn attr_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.attr(key).unwrap_or(default)
    }

    /// Parses a named attribute with [`FromStr`](std::str::FromStr).
    ///
    /// Returns `Ok(None)` when absent and a domain error when present but
    /// unparseable.
    pub fn attr_parsed<T>(&self, key: &str) -> ActionResult<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.attr(key) {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|e: T::Err| {
                ActionError::msg(format!("attribute '{key}' has invalid value '{raw}': {e}"))
            }),
        }
    }

    /// Returns `true` if the attribute is present in either key style.
    pub fn has(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Returns the shared value of type `T`, if the application registered one.
    pub fn state<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.inner.state.get::<T>()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("action", &self.inner.action)
            .field("controller", &self.inner.controller)
            .field("request", &self.inner.request)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn context_for(request: InvocationRequest) -> Context {
        Context::new(request, "test", "tests", Arc::new(StateMap::new()))
    }

    #[test]
    fn cli_context_accepts_both_key_styles() {
        let request = InvocationRequest::builder("say", InvocationMode::Cli)
            .attr("--words", "Hi")
            .build()
            .unwrap();
        let ctx = context_for(request);
        assert_eq!(ctx.attr("--words"), Some("Hi"));
        assert_eq!(ctx.attr("words"), Some("Hi"));
    }

    #[test]
    fn observed_mode_style_wins_when_both_present() {
        let request = InvocationRequest::builder("say", InvocationMode::Get)
            .attr("--words", "flag")
            .attr("words", "query")
            .build()
            .unwrap();
        assert_eq!(context_for(request).attr("words"), Some("query"));

        let request = InvocationRequest::builder("say", InvocationMode::Cli)
            .attr("--words", "flag")
            .attr("words", "query")
            .build()
            .unwrap();
        assert_eq!(context_for(request).attr("words"), Some("flag"));
    }

    #[test]
    fn require_reports_missing_parameter() {
        let request = InvocationRequest::builder("say", InvocationMode::Cli)
            .build()
            .unwrap();
        let ctx = context_for(request);
        assert!(matches!(
            ctx.require("--words"),
            Err(ActionError::MissingParameter { name }) if name == "--words"
        ));
        assert_eq!(ctx.attr_or("--words", "hello"), "hello");
        assert!(!ctx.has("words"));
    }

    #[test]
    fn attr_parsed_fails_closed() {
        let request = InvocationRequest::builder("list", InvocationMode::Get)
            .attr("limit", "ten")
            .build()
            .unwrap();
        let ctx = context_for(request);
        assert!(ctx.attr_parsed::<u32>("limit").is_err());
        assert_eq!(ctx.attr_parsed::<u32>("offset").unwrap(), None);
    }

    #[test]
    fn state_is_looked_up_by_type() {
        let mut state = StateMap::new();
        state.insert(42_u64);
        let request = InvocationRequest::builder("x", InvocationMode::Cli)
            .build()
            .unwrap();
        let ctx = Context::new(request, "x", "tests", Arc::new(state));
        assert_eq!(ctx.state::<u64>().as_deref(), Some(&42));
        assert!(ctx.state::<String>().is_none());
    }
}
