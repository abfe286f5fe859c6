#![allow(dead_code)]

use bytes::Bytes;
use serde_json::Value;
use trellis::apps::App;
use trellis::{Config, Response};

pub async fn app() -> App {
    App::build(&Config::default()).await.unwrap()
}

fn request(method: &str, uri: &str, cookie: Option<&str>, content_type: &str, body: &str) -> http::Request<Bytes> {
    let mut builder = http::Request::builder().method(method).uri(uri);
    if let Some(token) = cookie {
        builder = builder.header("cookie", format!("session={token}"));
    }
    if !body.is_empty() {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Bytes::from(body.to_owned())).unwrap()
}

pub async fn get(app: &App, uri: &str, cookie: Option<&str>) -> Response {
    app.router.respond(request("GET", uri, cookie, "", "")).await
}

pub async fn head(app: &App, uri: &str) -> Response {
    app.router.respond(request("HEAD", uri, None, "", "")).await
}

pub async fn post_form(app: &App, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let req = request("POST", uri, cookie, "application/x-www-form-urlencoded", body);
    app.router.respond(req).await
}

pub async fn post_json(app: &App, uri: &str, body: &str) -> Response {
    app.router.respond(request("POST", uri, None, "application/json", body)).await
}

pub fn json(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

/// The token from a `Set-Cookie: session=…` header.
pub fn session_token(res: &Response) -> Option<String> {
    res.headers()
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("set-cookie"))
        .find_map(|(_, v)| v.strip_prefix("session="))
        .and_then(|rest| rest.split(';').next())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}
