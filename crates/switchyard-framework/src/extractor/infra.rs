//! Infrastructure parameters: supplied by the context, never by segments.

use std::any::type_name;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

use switchyard_core::InvocationMode;

use crate::context::Context;
use crate::descriptor::ParamKind;
use crate::error::{BindError, BindResult};

use super::core::{BindCursor, FromInvocation};

impl FromInvocation for Context {
    fn kind() -> ParamKind {
        ParamKind::Infrastructure("Context")
    }

    fn from_invocation(cursor: &mut BindCursor<'_>) -> BindResult<Self> {
        Ok(cursor.context().clone())
    }
}

impl FromInvocation for InvocationMode {
    fn kind() -> ParamKind {
        ParamKind::Infrastructure("Mode")
    }

    fn from_invocation(cursor: &mut BindCursor<'_>) -> BindResult<Self> {
        Ok(cursor.context().mode())
    }
}

/// Read-only copy of the request's named attributes, keyed as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes(pub BTreeMap<String, String>);

impl Attributes {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl Deref for Attributes {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromInvocation for Attributes {
    fn kind() -> ParamKind {
        ParamKind::Infrastructure("Attributes")
    }

    fn from_invocation(cursor: &mut BindCursor<'_>) -> BindResult<Self> {
        Ok(Attributes(cursor.context().request().named().clone()))
    }
}

/// Application-provided shared state of type `T`.
///
/// Binding fails with a missing-parameter failure when the application
/// registered no value of type `T`.
///
/// ```rust
/// use switchyard_framework::State;
///
/// struct Greeting {
///     text: &'static str,
/// }
///
/// async fn greet(greeting: State<Greeting>, name: String) -> String {
///     format!("{}, {name}", greeting.text)
/// }
/// ```
#[derive(Debug)]
pub struct State<T>(pub Arc<T>);

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for State<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Send + Sync + 'static> FromInvocation for State<T> {
    fn kind() -> ParamKind {
        ParamKind::Infrastructure("State")
    }

    fn from_invocation(cursor: &mut BindCursor<'_>) -> BindResult<Self> {
        cursor
            .context()
            .state::<T>()
            .map(State)
            .ok_or(BindError::MissingState {
                type_name: type_name::<T>(),
            })
    }
}
