use std::sync::Arc;

use tracing::debug;

use super::{Middleware, Next};
use crate::handler::ResponseFuture;
use crate::request::Request;
use crate::response::Response;
use crate::session::{SessionStore, SessionUser};

/// Resolves the session cookie into a [`SessionUser`] and guards a path prefix.
///
/// On every request the cookie named `cookie_name` is looked up in the
/// store. A live session attaches its user to the request extensions, where
/// handlers read it with [`current_user`]. Requests under `protected_prefix`
/// without a user are answered with `302 Found` to `login_path` and never
/// reach their handler. Missing, unknown and expired tokens all mean
/// "not signed in"; none of them is an error.
#[derive(Clone)]
pub struct SessionGuard {
    inner: Arc<Inner>,
}

struct Inner {
    sessions: Arc<SessionStore>,
    cookie_name: String,
    protected_prefix: String,
    login_path: String,
}

impl SessionGuard {
    pub fn new(
        sessions: Arc<SessionStore>,
        cookie_name: impl Into<String>,
        protected_prefix: impl Into<String>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                sessions,
                cookie_name: cookie_name.into(),
                protected_prefix: protected_prefix.into(),
                login_path: login_path.into(),
            }),
        }
    }
}

impl Middleware for SessionGuard {
    fn handle(&self, mut req: Request, next: Next) -> ResponseFuture {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            if let Some(token) = req.cookie(&inner.cookie_name) {
                if let Some(user) = inner.sessions.resolve(&token).await {
                    req.extensions_mut().insert(user);
                }
            }

            if req.path().starts_with(&inner.protected_prefix) && current_user(&req).is_none() {
                debug!(path = %req.path(), "no session for protected path, redirecting");
                return Response::redirect(&inner.login_path);
            }

            next.run(req).await
        })
    }
}

/// The user attached by [`SessionGuard`], if the request carried a live session.
pub fn current_user(req: &Request) -> Option<&SessionUser> {
    req.extensions().get::<SessionUser>()
}
