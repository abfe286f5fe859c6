//! Read-only post listing: `GET /posts` → `{"posts": [...]}`.

use serde::Serialize;
use serde_json::json;

use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: &'static str,
    pub summary: &'static str,
    pub date: &'static str,
}

pub const POSTS: [Post; 3] = [
    Post { id: 1, title: "Runes and reactivity", summary: "An introduction to the new reactivity model", date: "2026-02-20" },
    Post { id: 2, title: "File-based routing", summary: "Everything about routes and layouts", date: "2026-02-18" },
    Post { id: 3, title: "Form actions", summary: "A new pattern for talking to the server", date: "2026-02-15" },
];

pub fn routes(router: Router) -> Router {
    router.get("/posts", list)
}

async fn list(_req: Request) -> Response {
    Json(json!({ "posts": POSTS })).into_response()
}
