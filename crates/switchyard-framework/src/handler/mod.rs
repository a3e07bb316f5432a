//! Handler system.
//!
//! Handlers are plain async functions. [`Handler`] is implemented for every
//! function of up to sixteen parameters whose parameter types implement
//! [`FromInvocation`](crate::extractor::FromInvocation) and whose output
//! implements [`IntoOutcome`]. The parameter list becomes the action's
//! overload shape; nothing is discovered at run time.

pub mod response;
pub mod traits;

pub use response::{IntoOutcome, Json, Outcome};
pub use traits::{BoxedHandler, Handler, into_handler};

pub use futures::future::BoxFuture;
