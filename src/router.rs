//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. The router also owns the
//! middleware chain, so a finished `Router` is the whole application: hand
//! it to [`Server::serve`](crate::Server::serve), or call
//! [`Router::respond`] to drive it in-process.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;

use crate::handler::{Handler, ResponseFuture, SharedEndpoint};
use crate::method::Method;
use crate::middleware::{BoxedMiddleware, Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup. Each registration returns `self` so calls
/// chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<SharedEndpoint>>,
    layers: Arc<[BoxedMiddleware]>,
    not_found: SharedEndpoint,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            layers: Arc::from(Vec::new()),
            not_found: not_found.into_endpoint(),
        }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use trellis::{Method, Request, Response, Router};
    /// # async fn get_memo(_: Request) -> Response { Response::text("") }
    /// # async fn create_memo(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/api/memos/{id}", get_memo)
    ///     .on(Method::Post, "/api/memos",      create_memo);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_endpoint())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    /// Wrap every request in `middleware`. Layers added first run outermost.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        let mut layers = self.layers.to_vec();
        layers.push(Arc::new(middleware));
        self.layers = layers.into();
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(SharedEndpoint, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes `req` and runs it through the middleware chain.
    ///
    /// Requests that match no route still traverse every layer before
    /// reaching the `404 Not Found` endpoint. `HEAD` runs the `GET` handler
    /// and drops the body, keeping status and headers.
    pub(crate) fn dispatch(&self, mut req: Request) -> ResponseFuture {
        let method = Method::try_from(&req.method).ok();
        let routed = method.and_then(|m| self.lookup(m.routed_as(), req.path()));

        let endpoint = match routed {
            Some((handler, params)) => {
                req.params = params;
                handler
            }
            None => Arc::clone(&self.not_found),
        };

        let pending = Next::new(Arc::clone(&self.layers), endpoint).run(req);
        if method != Some(Method::Head) {
            return pending;
        }
        Box::pin(async move {
            let mut res = pending.await;
            res.body = Bytes::new();
            res
        })
    }

    /// Serves one in-memory request without a socket.
    pub async fn respond(&self, req: http::Request<Bytes>) -> Response {
        self.dispatch(Request::from(req)).await
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

async fn not_found(_req: Request) -> Status {
    Status::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Middleware;

    fn get(uri: &str) -> http::Request<Bytes> {
        http::Request::builder().uri(uri).body(Bytes::new()).unwrap()
    }

    async fn echo_id(req: Request) -> Response {
        Response::text(req.param("id").unwrap_or("none").to_owned())
    }

    #[tokio::test]
    async fn path_params_reach_the_handler() {
        let app = Router::new().get("/items/{id}", echo_id);
        let res = app.respond(get("/items/42")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn unmatched_method_or_path_is_404() {
        let app = Router::new().get("/items/{id}", echo_id);
        assert_eq!(app.respond(get("/nope")).await.status_code(), 404);

        let post = http::Request::builder()
            .method("POST")
            .uri("/items/1")
            .body(Bytes::new())
            .unwrap();
        assert_eq!(app.respond(post).await.status_code(), 404);
    }

    #[tokio::test]
    async fn head_is_served_by_get_routes_without_a_body() {
        let app = Router::new().get("/items/{id}", echo_id);
        let head = http::Request::builder()
            .method("HEAD")
            .uri("/items/7")
            .body(Bytes::new())
            .unwrap();
        let res = app.respond(head).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert!(res.body().is_empty());
    }

    struct Tag(&'static str);

    impl Middleware for Tag {
        fn handle(&self, req: Request, next: Next) -> ResponseFuture {
            let tag = self.0;
            Box::pin(async move {
                let mut res = next.run(req).await;
                res.headers.push(("x-layer".to_owned(), tag.to_owned()));
                res
            })
        }
    }

    #[tokio::test]
    async fn layers_wrap_in_registration_order() {
        let app = Router::new()
            .get("/", |_req: Request| async { "hi" })
            .layer(Tag("outer"))
            .layer(Tag("inner"));
        let res = app.respond(get("/")).await;
        let tags: Vec<_> = res.headers().iter()
            .filter(|(k, _)| k == "x-layer")
            .map(|(_, v)| v.as_str())
            .collect();
        // The inner layer sees the response first.
        assert_eq!(tags, ["inner", "outer"]);
    }

    #[tokio::test]
    async fn layers_run_for_unmatched_paths() {
        let app = Router::new().layer(Tag("outer"));
        let res = app.respond(get("/missing")).await;
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.header("x-layer"), Some("outer"));
    }
}
