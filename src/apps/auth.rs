//! Login, logout and the protected dashboard.
//!
//! The dashboard itself does no checking: [`SessionGuard`] has already
//! redirected anonymous requests to the login page before it runs.
//!
//! [`SessionGuard`]: crate::middleware::SessionGuard

use std::sync::Arc;

use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use serde_json::json;
use tracing::{info, warn};

use crate::handler::with_state;
use crate::middleware::current_user;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::session::{SessionStore, UserDirectory};
use crate::status::Status;

pub struct Auth {
    pub sessions: Arc<SessionStore>,
    pub users: UserDirectory,
    pub cookie_name: String,
    pub login_path: String,
    pub home_path: String,
}

impl Auth {
    /// Lives exactly as long as the session behind it.
    fn session_cookie(&self, token: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.sessions.ttl().as_secs()).unwrap_or(i64::MAX);
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .max_age(Duration::seconds(max_age))
            .build()
    }

    fn cleared_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .max_age(Duration::ZERO)
            .build()
    }
}

pub fn routes(router: Router, auth: Arc<Auth>) -> Router {
    router
        .get(&auth.login_path, with_state(Arc::clone(&auth), login_page))
        .post(&auth.login_path, with_state(Arc::clone(&auth), login))
        .post("/logout", with_state(Arc::clone(&auth), logout))
        .get(&auth.home_path, dashboard)
}

/// Already signed in? Go straight to the dashboard.
async fn login_page(auth: Arc<Auth>, req: Request) -> Response {
    if current_user(&req).is_some() {
        return Response::redirect(&auth.home_path);
    }
    Json(json!({})).into_response()
}

async fn login(auth: Arc<Auth>, req: Request) -> Response {
    let form = req.form();
    let email = form.get("email").unwrap_or_default();
    let password = form.get("password").unwrap_or_default();

    let Some(user) = auth.users.authenticate(email, password) else {
        warn!(%email, "login failed");
        return (Status::Unauthorized, Json(json!({ "email": email, "error": "invalid email or password" })))
            .into_response();
    };

    info!(user_id = %user.id, "login succeeded");
    let token = auth.sessions.create(user).await;
    Response::builder()
        .status(Status::Found)
        .header("location", &auth.home_path)
        .cookie(&auth.session_cookie(token))
        .no_body()
}

async fn logout(auth: Arc<Auth>, req: Request) -> Response {
    if let Some(token) = req.cookie(&auth.cookie_name) {
        auth.sessions.delete(&token).await;
    }
    Response::builder()
        .status(Status::Found)
        .header("location", &auth.login_path)
        .cookie(&auth.cleared_cookie())
        .no_body()
}

async fn dashboard(req: Request) -> Response {
    Json(json!({ "user": current_user(&req) })).into_response()
}
