//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{Extensions, HeaderMap};
use serde::de::DeserializeOwned;

use cookie::Cookie;

use crate::form::Form;

/// An incoming HTTP request with its body already buffered.
///
/// Besides the wire data, a request carries **extensions**: typed values
/// that middleware attaches for handlers further down the chain (the
/// session guard stores the signed-in user there).
pub struct Request {
    pub(crate) method: http::Method,
    pub(crate) uri: http::Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) extensions: Extensions,
}

impl Request {
    pub(crate) fn new(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params: HashMap::new(),
            extensions: parts.extensions,
        }
    }

    pub fn method(&self) -> &str { self.method.as_str() }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn query(&self) -> Option<&str> { self.uri.query() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a decoded query-string parameter: `?q=a+b` gives `Some("a b")`.
    pub fn query_param(&self, key: &str) -> Option<String> {
        let query = self.query()?;
        Form::parse(query.as_bytes()).get(key).map(str::to_owned)
    }

    /// Looks `name` up across every `Cookie` header on the request.
    ///
    /// The first occurrence wins. Malformed pairs are skipped and values are
    /// returned without surrounding quotes.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(http::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(|parsed| parsed.ok())
            .find(|c| c.name() == name)
            .map(|c| c.value_trimmed().to_owned())
    }

    /// Decodes the body as urlencoded form fields.
    pub fn form(&self) -> Form {
        Form::parse(&self.body)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn extensions(&self) -> &Extensions { &self.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.extensions }
}

/// Builds a request from an `http::Request` whose body is already in memory.
/// Useful for driving a [`Router`](crate::Router) without a socket.
impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self::new(parts, body)
    }
}
