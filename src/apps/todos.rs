//! Todo list: form actions over one collection.
//!
//! | Route | Form fields | Success |
//! |---|---|---|
//! | `GET /todos` | | `{"todos": [...]}` |
//! | `POST /todos/create` | `text` | `{"success": true}` |
//! | `POST /todos/toggle` | `id` | `{"toggled": true}` |
//! | `POST /todos/delete` | `id` | `{"deleted": true}` |
//! | `POST /todos/clear-done` | | `{"cleared": true}` |
//!
//! A rejected `create` answers `400` with `{"text", "error"}`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{char_len, storage_failure};
use crate::handler::with_state;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{Record, Repository};

pub const MIN_TEXT_LEN: usize = 2;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

pub struct NewTodo {
    pub text: String,
}

impl Record for Todo {
    type Draft = NewTodo;

    fn id(&self) -> u64 { self.id }

    fn from_draft(id: u64, draft: NewTodo) -> Self {
        Self { id, text: draft.text, done: false }
    }
}

pub type Todos = Arc<dyn Repository<Todo>>;

pub fn seed() -> Vec<Todo> {
    [
        (1, "Learn the routing basics", true),
        (2, "Understand form actions", true),
        (3, "Practice session cookies", false),
        (4, "Finish the todo app", false),
    ]
    .into_iter()
    .map(|(id, text, done)| Todo { id, text: text.to_owned(), done })
    .collect()
}

/// Trims `raw` and checks its length. On failure the trimmed input comes
/// back alongside the message so the form can be refilled.
pub fn validate_text(raw: Option<&str>) -> Result<String, (Option<String>, &'static str)> {
    let text = raw.map(str::trim);
    match text {
        Some(t) if char_len(t) >= MIN_TEXT_LEN => Ok(t.to_owned()),
        _ => Err((text.map(str::to_owned), "todo text must be at least 2 characters")),
    }
}

pub fn routes(router: Router, todos: Todos) -> Router {
    router
        .get("/todos", with_state(Arc::clone(&todos), list))
        .post("/todos/create", with_state(Arc::clone(&todos), create))
        .post("/todos/toggle", with_state(Arc::clone(&todos), toggle))
        .post("/todos/delete", with_state(Arc::clone(&todos), delete))
        .post("/todos/clear-done", with_state(todos, clear_done))
}

async fn list(todos: Todos, _req: Request) -> Response {
    Json(json!({ "todos": todos.list().await })).into_response()
}

async fn create(todos: Todos, req: Request) -> Response {
    let form = req.form();
    let text = match validate_text(form.get("text")) {
        Ok(text) => text,
        Err((text, error)) => {
            return (Status::BadRequest, Json(json!({ "text": text, "error": error })))
                .into_response();
        }
    };
    match todos.insert(NewTodo { text }).await {
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => storage_failure("todos", e),
    }
}

// An id that does not exist (or does not parse) is ignored, as is the
// response: the list is simply reloaded.
async fn toggle(todos: Todos, req: Request) -> Response {
    if let Some(id) = super::form_id(&req) {
        if let Err(e) = todos.update(id, &|t: &mut Todo| t.done = !t.done).await {
            return storage_failure("todos", e);
        }
    }
    Json(json!({ "toggled": true })).into_response()
}

async fn delete(todos: Todos, req: Request) -> Response {
    if let Some(id) = super::form_id(&req) {
        if let Err(e) = todos.remove(id).await {
            return storage_failure("todos", e);
        }
    }
    Json(json!({ "deleted": true })).into_response()
}

async fn clear_done(todos: Todos, _req: Request) -> Response {
    match todos.remove_where(&|t: &Todo| t.done).await {
        Ok(_) => Json(json!({ "cleared": true })).into_response(),
        Err(e) => storage_failure("todos", e),
    }
}
