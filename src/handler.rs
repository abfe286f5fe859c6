//! Route handlers and how the router stores them.
//!
//! A handler is any `Fn(Request) -> impl Future<Output = impl IntoResponse>`.
//! The router cannot keep a table of many unrelated closure types, so each
//! one is erased into an [`Endpoint`] trait object when it is registered:
//!
//! ```text
//! async fn list(req: Request) -> Json<…>          registered with router.get("/todos", list)
//!        ↓  Handler::into_endpoint
//! Arc<Erased<list>> as Arc<dyn Endpoint>           shared by every connection task
//!        ↓  endpoint.call(req) per request
//! Box::pin(async { list(req).await.into_response() })
//! ```
//!
//! Per request that costs one `Arc` clone, one virtual call and one boxed
//! future.
//!
//! # Handlers that need application state
//!
//! State is captured, not injected: [`with_state`] pairs a cloneable value
//! with a two-argument function and returns a one-argument handler that
//! clones the state into every call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The boxed future every endpoint and middleware returns.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A type-erased handler.
///
/// Public only because [`Handler::into_endpoint`] names it; nothing outside
/// this crate needs to implement it.
#[doc(hidden)]
pub trait Endpoint: Send + Sync + 'static {
    fn call(&self, req: Request) -> ResponseFuture;
}

#[doc(hidden)]
pub type SharedEndpoint = Arc<dyn Endpoint>;

/// Implemented for every function usable as a route handler:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// Sealed; the blanket impl below is the only implementation.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a route handler",
    note = "handlers are `async fn(Request) -> impl IntoResponse`; use `with_state` to pass state"
)]
pub trait Handler: sealed::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_endpoint(self) -> SharedEndpoint;
}

mod sealed {
    pub trait Sealed {}
}

impl<F, Fut> sealed::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn into_endpoint(self) -> SharedEndpoint {
        Arc::new(Erased(self))
    }
}

struct Erased<F>(F);

impl<F, Fut> Endpoint for Erased<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn call(&self, req: Request) -> ResponseFuture {
        let pending = (self.0)(req);
        Box::pin(async move { pending.await.into_response() })
    }
}

/// Binds `state` to a handler that takes it as its first argument.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use trellis::{handler::with_state, Request, Response, Router};
///
/// async fn hit(counter: Arc<AtomicU64>, _req: Request) -> Response {
///     Response::text(counter.fetch_add(1, Ordering::Relaxed).to_string())
/// }
///
/// let app = Router::new().get("/hits", with_state(Arc::new(AtomicU64::new(0)), hit));
/// ```
pub fn with_state<S, F, Fut>(state: S, f: F) -> impl Handler
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    move |req: Request| f(state.clone(), req)
}
