//! # Switchyard Framework
//!
//! The dispatch engine. This layer provides:
//! - Pattern compiler and action descriptors
//! - Axum-style handlers whose parameter lists declare their overload shape
//! - Action registry with lock-free snapshot publication
//! - Mode and overload resolution, parameter binding, and the [`Dispatcher`]
//! - Controllers and the [`define_controller!`] manifest macro
//! - Shell-style command-line splitting (with `command` feature)
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use switchyard_core::{InvocationMode, InvocationRequest, Payload};
//! use switchyard_framework::{ActionRegistry, Dispatcher, RegistryBuilder, action};
//!
//! async fn say_words(words: String) -> String {
//!     words
//! }
//!
//! let mut builder = RegistryBuilder::new();
//! builder.register(action("say").cli().handler(say_words)).unwrap();
//! let dispatcher = Dispatcher::new(Arc::new(ActionRegistry::with_snapshot(builder.build())));
//!
//! let request = InvocationRequest::builder("say", InvocationMode::Cli)
//!     .arg("Hello")
//!     .build()
//!     .unwrap();
//! let result = tokio_test::block_on(dispatcher.dispatch(request));
//! assert_eq!(result.payload(), Some(&Payload::Text("Hello".into())));
//! ```

pub mod context;
pub mod controller;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod handler;
pub mod pattern;
pub mod registry;
pub mod resolver;

#[cfg(feature = "command")]
pub mod command;

pub use context::{Context, StateMap};
pub use controller::{Controller, ControllerDescriptor, ControllerMetadata, Manifest};
pub use descriptor::{
    ActionBuilder, ActionDescriptor, ParamKind, ParamSpec, SegmentType, SharedDescriptor, action,
};
pub use dispatcher::Dispatcher;
pub use error::{BindError, BindResult, RegistrationError, RegistrationResult};
pub use extractor::{Attributes, BindCursor, FromInvocation, State};
pub use handler::{BoxFuture, BoxedHandler, Handler, IntoOutcome, Json, Outcome, into_handler};
pub use pattern::CompiledPattern;
pub use registry::{ActionRegistry, Candidate, RegistryBuilder, RegistrySnapshot};
pub use resolver::Resolution;

#[cfg(feature = "command")]
pub use command::{SplitError, shell_split};

/// Common imports for declaring controllers and actions.
pub mod prelude {
    pub use crate::define_controller;
    pub use crate::{
        Attributes, Context, ControllerDescriptor, Dispatcher, Json, Manifest, State, action,
    };
    pub use switchyard_core::{
        ActionError, ActionResult, InvocationMode, InvocationRequest, InvocationResult, Payload,
    };
}
