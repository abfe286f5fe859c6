//! # trellis
//!
//! A minimal HTTP framework for services behind a reverse proxy, and the
//! small applications built on it: a todo list, a feedback board, a memo
//! JSON API, a post listing and a cookie-session login guarding a dashboard.
//!
//! ## The framework
//!
//! - Radix-tree routing via [`matchit`], one tree per method
//! - hyper for HTTP/1.1 and HTTP/2, tokio for I/O
//! - Ordered [middleware](middleware) around every request
//! - Graceful shutdown: SIGTERM / Ctrl-C drains in-flight requests
//! - Request accessors for path params, query strings, cookies, urlencoded
//!   forms and JSON bodies; responses with JSON, redirects and `Set-Cookie`
//!
//! TLS, rate limiting and body-size limits belong to the proxy in front.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use trellis::{Request, Response, Router, Server, Status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trellis::Error> {
//!     let app = Router::new()
//!         .get("/memos/{id}", get_memo)
//!         .post("/memos",     create_memo);
//!
//!     Server::bind("0.0.0.0:3000".parse().unwrap()).serve(app).await
//! }
//!
//! async fn get_memo(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//!
//! async fn create_memo(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(Status::BadRequest);
//!     }
//!     Response::builder()
//!         .status(Status::Created)
//!         .header("location", "/memos/99")
//!         .json(br#"{"id":"99"}"#.to_vec())
//! }
//! ```
//!
//! ## The applications
//!
//! [`apps::App::build`] wires every application into one router from a
//! [`Config`]. See the `apps` submodules for their routes.

mod error;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod apps;
pub mod config;
pub mod form;
pub mod handler;
pub mod health;
pub mod middleware;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
