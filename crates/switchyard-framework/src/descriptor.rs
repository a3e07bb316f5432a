//! Action descriptors and the builder that produces them.
//!
//! A descriptor is the declarative record binding a symbolic name, an
//! accepted mode, and a handler together. The handler's parameter list is
//! turned into a [`ParamSpec`] list when the descriptor is built, so
//! resolution never needs to inspect the handler itself.

use std::fmt;
use std::sync::Arc;

use switchyard_core::InvocationMode;

use crate::handler::{BoxedHandler, Handler, into_handler};
use crate::pattern::CompiledPattern;

/// A segment type: its display name plus a loose lexical check used by the
/// overload resolver before any conversion is attempted.
#[derive(Clone, Copy)]
pub struct SegmentType {
    pub name: &'static str,
    pub accepts: fn(&str) -> bool,
}

impl fmt::Debug for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl PartialEq for SegmentType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SegmentType {}

/// How a handler parameter is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Consumes the next captured positional segment.
    Segment(SegmentType),
    /// Supplied from the invocation context; never counts toward arity.
    Infrastructure(&'static str),
}

impl ParamKind {
    pub fn is_segment(&self) -> bool {
        matches!(self, Self::Segment(_))
    }

    /// Returns the type name shown in help and conflict messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Segment(ty) => ty.name,
            Self::Infrastructure(name) => name,
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
}

/// Immutable record of one registered action.
#[derive(Clone)]
pub struct ActionDescriptor {
    name: String,
    pattern: CompiledPattern,
    mode: InvocationMode,
    priority: i32,
    params: Vec<ParamSpec>,
    help: String,
    controller: String,
    handler: BoxedHandler,
}

impl ActionDescriptor {
    /// Returns the literal action name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn mode(&self) -> InvocationMode {
        self.mode
    }

    /// Explicit priority; higher wins an otherwise tied resolution.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Every declared parameter, infrastructure ones included, in order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Segment parameters only, in order.
    pub fn segment_params(&self) -> impl Iterator<Item = (&str, SegmentType)> {
        self.params.iter().filter_map(|p| match p.kind {
            ParamKind::Segment(ty) => Some((p.name.as_str(), ty)),
            ParamKind::Infrastructure(_) => None,
        })
    }

    /// Number of positional segments this action consumes.
    pub fn arity(&self) -> usize {
        self.params.iter().filter(|p| p.kind.is_segment()).count()
    }

    /// The segment type list that identifies this overload, e.g. `"String, Integer"`.
    pub fn signature(&self) -> String {
        self.segment_params()
            .map(|(_, ty)| ty.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub(crate) fn handler(&self) -> &BoxedHandler {
        &self.handler
    }

    pub(crate) fn set_controller(&mut self, controller: &str) {
        if self.controller.is_empty() {
            self.controller = controller.to_string();
        }
    }

    /// One-line usage, e.g. `users <id:Integer> [GET] Fetch one user`.
    pub fn usage(&self) -> String {
        let mut line = self.pattern.to_string();
        for (name, ty) in self.segment_params() {
            line.push_str(&format!(" <{name}:{}>", ty.name));
        }
        line.push_str(&format!(" [{}]", self.mode));
        if !self.help.is_empty() {
            line.push(' ');
            line.push_str(&self.help);
        }
        line
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("priority", &self.priority)
            .field("params", &self.params)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// Starts building an action registered under `name`.
///
/// The mode defaults to [`InvocationMode::Any`].
///
/// # Example
///
/// ```rust
/// use switchyard_framework::action;
///
/// async fn get_user(id: i64) -> String {
///     format!("user {id}")
/// }
///
/// let descriptor = action("users")
///     .get()
///     .params(["id"])
///     .help("Fetch one user")
///     .handler(get_user);
///
/// assert_eq!(descriptor.arity(), 1);
/// assert_eq!(descriptor.usage(), "users <id:Integer> [GET] Fetch one user");
/// ```
pub fn action(name: impl Into<String>) -> ActionBuilder {
    ActionBuilder {
        name: name.into(),
        mode: InvocationMode::Any,
        priority: 0,
        names: Vec::new(),
        help: String::new(),
    }
}

/// Builder for [`ActionDescriptor`]; finished by [`handler`](Self::handler).
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    name: String,
    mode: InvocationMode,
    priority: i32,
    names: Vec<String>,
    help: String,
}

impl ActionBuilder {
    pub fn mode(mut self, mode: InvocationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn cli(self) -> Self {
        self.mode(InvocationMode::Cli)
    }

    pub fn get(self) -> Self {
        self.mode(InvocationMode::Get)
    }

    pub fn post(self) -> Self {
        self.mode(InvocationMode::Post)
    }

    pub fn put(self) -> Self {
        self.mode(InvocationMode::Put)
    }

    pub fn delete(self) -> Self {
        self.mode(InvocationMode::Delete)
    }

    pub fn patch(self) -> Self {
        self.mode(InvocationMode::Patch)
    }

    pub fn head(self) -> Self {
        self.mode(InvocationMode::Head)
    }

    pub fn options(self) -> Self {
        self.mode(InvocationMode::Options)
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Names the segment parameters in order; unnamed ones become `argN`.
    pub fn params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Finishes the descriptor with `handler`.
    pub fn handler<H, T>(self, handler: H) -> ActionDescriptor
    where
        H: Handler<T>,
        T: 'static,
    {
        let mut segment_index = 0;
        let params = H::params()
            .into_iter()
            .map(|kind| {
                let name = match kind {
                    ParamKind::Segment(_) => {
                        let name = self
                            .names
                            .get(segment_index)
                            .cloned()
                            .unwrap_or_else(|| format!("arg{segment_index}"));
                        segment_index += 1;
                        name
                    }
                    ParamKind::Infrastructure(ty) => ty.to_ascii_lowercase(),
                };
                ParamSpec { name, kind }
            })
            .collect();

        ActionDescriptor {
            pattern: CompiledPattern::compile(&self.name),
            name: self.name,
            mode: self.mode,
            priority: self.priority,
            params,
            help: self.help,
            controller: String::new(),
            handler: into_handler(handler),
        }
    }
}

/// Convenience for sharing one descriptor between snapshots.
pub type SharedDescriptor = Arc<ActionDescriptor>;
