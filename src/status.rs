//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted — `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use trellis::{Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::BadRequest);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/api/memos/3")
//!     .json(br#"{"id":3}"#.to_vec());
//!
//! // return Status directly from a handler — trellis wraps it
//! async fn missing(_req: trellis::Request) -> Status {
//!     Status::NotFound
//! }
//! ```
//!
//! Only the codes the applications and the framework itself emit are listed.

/// HTTP status codes used by trellis and its applications.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    Created,             // 201

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    Found,               // 302

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    Unauthorized,        // 401
    NotFound,            // 404

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::Found               => 302,
            Status::BadRequest          => 400,
            Status::Unauthorized        => 401,
            Status::NotFound            => 404,
            Status::InternalServerError => 500,
        }
    }
}
