//! Feedback board.
//!
//! `GET /feedback` lists entries; `POST /feedback/create` takes `name`,
//! `message` and `rating` form fields; `POST /feedback/delete` takes `id`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{char_len, form_id, storage_failure};
use crate::form::Form;
use crate::handler::with_state;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{Record, Repository};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_MESSAGE_LEN: usize = 5;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: u64,
    pub name: String,
    pub message: String,
    pub rating: i64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewFeedback {
    pub name: String,
    pub message: String,
    pub rating: i64,
}

impl Record for Feedback {
    type Draft = NewFeedback;

    fn id(&self) -> u64 { self.id }

    fn from_draft(id: u64, d: NewFeedback) -> Self {
        Self { id, name: d.name, message: d.message, rating: d.rating }
    }
}

pub type Feedbacks = Arc<dyn Repository<Feedback>>;

pub fn seed() -> Vec<Feedback> {
    vec![Feedback {
        id: 1,
        name: "Hong Gildong".into(),
        message: "Form actions are great!".into(),
        rating: 5,
    }]
}

/// A rejected submission: what was sent, and why it was refused.
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct Rejected {
    pub name: Option<String>,
    pub message: Option<String>,
    pub rating: Option<i64>,
    pub error: &'static str,
}

/// Checks name, then message, then rating; the first failure wins.
pub fn validate(form: &Form) -> Result<NewFeedback, Rejected> {
    let name = form.get("name");
    let message = form.get("message");
    let rating = form.int("rating");

    let reject = |error| Rejected {
        name: name.map(str::to_owned),
        message: message.map(str::to_owned),
        rating,
        error,
    };

    let name = match name {
        Some(n) if char_len(n) >= MIN_NAME_LEN => n,
        _ => return Err(reject("name must be at least 2 characters")),
    };
    let message = match message {
        Some(m) if char_len(m) >= MIN_MESSAGE_LEN => m,
        _ => return Err(reject("message must be at least 5 characters")),
    };
    let Some(rating) = rating else {
        return Err(reject("rating must be a whole number"));
    };

    Ok(NewFeedback { name: name.to_owned(), message: message.to_owned(), rating })
}

pub fn routes(router: Router, feedback: Feedbacks) -> Router {
    router
        .get("/feedback", with_state(Arc::clone(&feedback), list))
        .post("/feedback/create", with_state(Arc::clone(&feedback), create))
        .post("/feedback/delete", with_state(feedback, delete))
}

async fn list(feedback: Feedbacks, _req: Request) -> Response {
    Json(json!({ "feedbacks": feedback.list().await })).into_response()
}

async fn create(feedback: Feedbacks, req: Request) -> Response {
    let draft = match validate(&req.form()) {
        Ok(draft) => draft,
        Err(rejected) => return (Status::BadRequest, Json(rejected)).into_response(),
    };
    match feedback.insert(draft).await {
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => storage_failure("feedback", e),
    }
}

async fn delete(feedback: Feedbacks, req: Request) -> Response {
    if let Some(id) = form_id(&req) {
        if let Err(e) = feedback.remove(id).await {
            return storage_failure("feedback", e);
        }
    }
    Json(json!({ "deleted": true })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_submission() {
        let form = Form::parse(b"name=Kim&message=Nice+work&rating=4");
        assert_eq!(
            validate(&form),
            Ok(NewFeedback { name: "Kim".into(), message: "Nice work".into(), rating: 4 }),
        );
    }

    #[test]
    fn short_name_is_reported_before_short_message() {
        let rejected = validate(&Form::parse(b"name=K&message=hi&rating=3")).unwrap_err();
        assert_eq!(rejected.error, "name must be at least 2 characters");
        assert_eq!(rejected.name.as_deref(), Some("K"));
        assert_eq!(rejected.message.as_deref(), Some("hi"));
        assert_eq!(rejected.rating, Some(3));
    }

    #[test]
    fn short_message_is_rejected() {
        let rejected = validate(&Form::parse(b"name=Kim&message=hey&rating=3")).unwrap_err();
        assert_eq!(rejected.error, "message must be at least 5 characters");
    }

    #[test]
    fn non_numeric_rating_is_rejected() {
        let rejected = validate(&Form::parse(b"name=Kim&message=Nice+work&rating=five")).unwrap_err();
        assert_eq!(rejected.error, "rating must be a whole number");
        assert_eq!(rejected.rating, None);
    }
}
