//! Action dispatcher.
//!
//! The [`Dispatcher`] is the single entry point front ends call. For each
//! request it:
//!
//! 1. Loads the current registry snapshot (once; the whole dispatch uses it)
//! 2. Resolves the request to one action and its captured segments
//! 3. Binds every handler parameter, failing before the handler starts if
//!    any binding fails
//! 4. Invokes the handler and wraps its outcome in an [`InvocationResult`]
//!
//! Every failure comes back as a tagged [`Failure`]. A panicking handler is
//! not caught.
//!
//! # Tower Service Integration
//!
//! `Dispatcher` implements `tower::Service<InvocationRequest>` with
//! `Error = Infallible`, so hosts can stack middleware on it:
//!
//! ```rust,ignore
//! use tower::ServiceBuilder;
//! use tower::timeout::TimeoutLayer;
//! use std::time::Duration;
//!
//! let service = ServiceBuilder::new()
//!     .layer(TimeoutLayer::new(Duration::from_secs(5)))
//!     .service(dispatcher);
//! ```

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Poll;

use switchyard_core::{Failure, InvocationRequest, InvocationResult, Payload};
use tower::Service;
use tracing::{Instrument, debug, debug_span};

use crate::context::{Context, StateMap};
use crate::registry::ActionRegistry;
use crate::resolver::{Resolution, resolve};

/// Routes invocation requests to registered actions.
///
/// Cheap to clone; clones share the registry and the state map.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ActionRegistry>,
    state: Arc<StateMap>,
    explain: bool,
}

impl Dispatcher {
    /// Creates a dispatcher reading from `registry`.
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self {
            registry,
            state: Arc::new(StateMap::new()),
            explain: false,
        }
    }

    /// Sets the shared state handed to every invocation.
    pub fn with_state(mut self, state: Arc<StateMap>) -> Self {
        self.state = state;
        self
    }

    /// When set, resolution failures list the overloads that were considered.
    pub fn explain_failures(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    /// Resolves `request` without invoking anything.
    ///
    /// Resolving the same request against an unchanged registry always
    /// selects the same action.
    pub fn resolve(&self, request: &InvocationRequest) -> Result<Resolution, Failure> {
        resolve(&self.registry.load(), request, self.explain)
    }

    /// Dispatches one request.
    pub async fn dispatch(&self, request: InvocationRequest) -> InvocationResult {
        let span = debug_span!(
            "dispatch",
            action = %request.name(),
            mode = %request.mode()
        );
        self.run(request).instrument(span).await.into()
    }

    async fn run(&self, request: InvocationRequest) -> Result<Payload, Failure> {
        let snapshot = self.registry.load();
        let Resolution {
            descriptor,
            captures,
        } = resolve(&snapshot, &request, self.explain).inspect_err(|failure| {
            debug!(kind = %failure.kind(), detail = failure.detail(), "Resolution failed");
        })?;

        let ctx = Context::new(
            request,
            descriptor.name(),
            descriptor.controller(),
            Arc::clone(&self.state),
        );
        let result = (descriptor.handler())(ctx, captures).await;

        match &result {
            Ok(_) => debug!(action = descriptor.name(), "Action completed"),
            Err(failure) => debug!(
                action = descriptor.name(),
                kind = %failure.kind(),
                detail = failure.detail(),
                "Action failed"
            ),
        }
        result
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("state", &self.state)
            .field("explain", &self.explain)
            .finish()
    }
}

impl Service<InvocationRequest> for Dispatcher {
    type Response = InvocationResult;
    type Error = Infallible;
    type Future =
        Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: InvocationRequest) -> Self::Future {
        let dispatcher = self.clone();
        Box::pin(async move { Ok(dispatcher.dispatch(request).await) })
    }
}
