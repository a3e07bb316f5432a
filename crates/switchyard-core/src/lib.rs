//! # Switchyard Core
//!
//! The data model shared by every layer of Switchyard:
//!
//! - [`InvocationMode`]: the surface a request arrived through (CLI or an
//!   HTTP verb), or the wildcard an action accepts.
//! - [`InvocationRequest`]: the normalized, already-tokenized invocation a
//!   front end hands to the dispatcher.
//! - [`InvocationResult`]: the single outcome of a dispatch, either a
//!   [`Payload`] or a tagged [`Failure`].
//! - [`ActionError`]: the error type handlers return.
//!
//! This crate has no knowledge of registries or handlers; it only defines the
//! shapes that cross the boundary between the engine and its collaborators.

pub mod error;
pub mod mode;
pub mod request;
pub mod result;

pub use error::{ActionError, ActionResult, BoxError, RequestError};
pub use mode::{InvocationMode, UnknownMode};
pub use request::{InvocationRequest, RequestBuilder};
pub use result::{Failure, FailureKind, InvocationResult, Payload};
