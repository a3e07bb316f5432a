//! Front-end adapters.
//!
//! Each adapter turns its surface's native input into an
//! [`InvocationRequest`](switchyard_core::InvocationRequest) and maps the
//! [`InvocationResult`](switchyard_core::InvocationResult) back. Resolution
//! itself never depends on which adapter built the request.

pub mod cli;
pub mod http;

use switchyard_core::RequestError;
use switchyard_framework::SplitError;
use thiserror::Error;

/// Input an adapter could not turn into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error("no action name given")]
    EmptyCommand,

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("invalid command line: {0}")]
    Split(#[from] SplitError),

    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

pub type FrontendResult<T> = Result<T, FrontendError>;
