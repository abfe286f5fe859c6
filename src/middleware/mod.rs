//! Middleware layer.
//!
//! Middleware intercepts every request before routing reaches a handler and
//! sees the response on the way back. It is the place for cross-cutting
//! concerns: request tracing and session resolution.
//!
//! Layers run in registration order, outermost first:
//!
//! ```text
//! Router::new().layer(Trace).layer(guard)
//!
//!   request ─► Trace ─► SessionGuard ─► handler (or 404)
//!   response ◄─ Trace ◄─ SessionGuard ◄─┘
//! ```
//!
//! Unmatched paths still pass through every layer, so a guard can redirect
//! a request for a page that does not exist.
//!
//! Built-in middleware:
//! - [`Trace`] — per-request span with method, path, status, latency
//! - [`SessionGuard`] — resolves the session cookie and protects a path prefix

mod session;
mod trace;

use std::sync::Arc;

use crate::handler::{ResponseFuture, SharedEndpoint};
use crate::request::Request;

pub use session::{current_user, SessionGuard};
pub use trace::Trace;

/// A layer wrapped around every request.
///
/// Call [`Next::run`] to continue down the chain, or return a response
/// directly to short-circuit it.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> ResponseFuture;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// The remainder of the middleware chain plus the routed endpoint.
pub struct Next {
    layers: Arc<[BoxedMiddleware]>,
    index: usize,
    endpoint: SharedEndpoint,
}

impl Next {
    pub(crate) fn new(layers: Arc<[BoxedMiddleware]>, endpoint: SharedEndpoint) -> Self {
        Self { layers, index: 0, endpoint }
    }

    /// Passes `req` to the next layer, or to the endpoint once every layer ran.
    pub fn run(self, req: Request) -> ResponseFuture {
        match self.layers.get(self.index).cloned() {
            Some(layer) => {
                let next = Self { index: self.index + 1, ..self };
                layer.handle(req, next)
            }
            None => self.endpoint.call(req),
        }
    }
}
