//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, Uri, header};
use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// An incoming HTTP request with its body fully read.
///
/// Path parameters are installed by the router right before the handler runs.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        // Invalid UTF-8 after decoding becomes U+FFFD rather than a 400.
        let path = percent_decode_str(uri.path()).decode_utf8_lossy().into_owned();
        Self { method, uri, path, headers, body, params: HashMap::new() }
    }

    pub fn method(&self) -> &Method { &self.method }

    /// The percent-decoded request path. Routing and path parameters see
    /// this form; [`uri`](Request::uri) keeps the raw one.
    pub fn path(&self) -> &str { &self.path }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Returns a path parameter.
    ///
    /// For a route `/users/:id`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`. For `/static/*filepath` on `/static/css/a.css`,
    /// `req.param("filepath")` returns `Some("css/a.css")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// First value of `key` in the URL query string, percent-decoded.
    ///
    /// `/hello?name=geek` → `req.query("name") == Some("geek")`.
    pub fn query(&self, key: &str) -> Option<String> {
        lookup(self.uri.query()?.as_bytes(), key)
    }

    /// Form value for `key`.
    ///
    /// For `POST`, `PUT` and `PATCH` with an
    /// `application/x-www-form-urlencoded` body, the body is consulted first.
    /// The URL query string is the fallback, and the only source for every
    /// other method.
    pub fn form(&self, key: &str) -> Option<String> {
        if self.has_form_body() {
            if let Some(value) = lookup(&self.body, key) {
                return Some(value);
            }
        }
        self.query(key)
    }

    fn has_form_body(&self) -> bool {
        matches!(self.method, Method::POST | Method::PUT | Method::PATCH)
            && self.is_form_encoded()
    }

    fn is_form_encoded(&self) -> bool {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .is_some_and(|mime| {
                mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded")
            })
    }
}

fn lookup(encoded: &[u8], key: &str) -> Option<String> {
    form_urlencoded::parse(encoded)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
