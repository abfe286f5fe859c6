//! Memo JSON API.
//!
//! - `GET /api/memos?q=…` → `{"memos": [...], "total": n}`; `q` filters by
//!   case-sensitive substring, an empty `q` lists everything.
//! - `POST /api/memos` with `{"text": "…"}` → `201 {"memo": {...}}`, or
//!   `400 {"error": "…"}`.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{char_len, storage_failure};
use crate::handler::with_state;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{Record, Repository};

pub const MIN_TEXT_LEN: usize = 2;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: u64,
    pub text: String,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
}

/// RFC 3339 in UTC with exactly three fractional digits:
/// `2026-02-20T10:00:00.000Z`. Any RFC 3339 timestamp is accepted on load.
mod millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(d)
    }
}

pub struct NewMemo {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Memo {
    type Draft = NewMemo;

    fn id(&self) -> u64 { self.id }

    fn from_draft(id: u64, draft: NewMemo) -> Self {
        Self { id, text: draft.text, created_at: draft.created_at }
    }
}

pub type Memos = Arc<dyn Repository<Memo>>;

pub fn seed() -> Vec<Memo> {
    let at = |hour| Utc.with_ymd_and_hms(2026, 2, 20, hour, 0, 0).single().unwrap_or_default();
    vec![
        Memo { id: 1, text: "Study the router".into(), created_at: at(10) },
        Memo { id: 2, text: "Understand API routes".into(), created_at: at(11) },
    ]
}

#[derive(Deserialize)]
struct CreateMemo {
    #[serde(default)]
    text: Option<String>,
}

pub fn routes(router: Router, memos: Memos) -> Router {
    router
        .get("/api/memos", with_state(Arc::clone(&memos), list))
        .post("/api/memos", with_state(memos, create))
}

/// Memos whose text contains `q`. `None` or an empty query keeps everything.
pub fn filter(memos: Vec<Memo>, q: Option<&str>) -> Vec<Memo> {
    match q {
        Some(q) if !q.is_empty() => memos.into_iter().filter(|m| m.text.contains(q)).collect(),
        _ => memos,
    }
}

async fn list(memos: Memos, req: Request) -> Response {
    let q = req.query_param("q");
    let results = filter(memos.list().await, q.as_deref());
    Json(json!({ "total": results.len(), "memos": results })).into_response()
}

async fn create(memos: Memos, req: Request) -> Response {
    let body: CreateMemo = match req.json() {
        Ok(body) => body,
        Err(e) => {
            debug!("rejecting memo body: {e}");
            return (Status::BadRequest, Json(json!({ "error": "request body must be a JSON object" })))
                .into_response();
        }
    };

    let text = body.text.as_deref().map(str::trim).unwrap_or_default();
    if char_len(text) < MIN_TEXT_LEN {
        return (Status::BadRequest, Json(json!({ "error": "memo must be at least 2 characters" })))
            .into_response();
    }

    let draft = NewMemo { text: text.to_owned(), created_at: Utc::now() };
    match memos.insert(draft).await {
        Ok(memo) => (Status::Created, Json(json!({ "memo": memo }))).into_response(),
        Err(e) => storage_failure("memos", e),
    }
}
