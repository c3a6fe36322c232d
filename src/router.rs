//! Trie-based request router.
//!
//! One segment trie per HTTP method, plus the handler for every registered
//! `(method, pattern)` pair. Build it once at startup; hand it to
//! [`Server::serve`](crate::Server::serve). Registration takes `self` by
//! value, so once the router is shared with request tasks it can no longer
//! change.
//!
//! Patterns are `/`-delimited. `:name` captures one segment, `*name`
//! captures the rest of the path and must come last.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use tracing::{debug, warn};

use crate::handler::{BoxedHandler, Handler, boxed};
use crate::pattern::compile;
use crate::request::Request;
use crate::response::Response;
use crate::trie::Node;

/// The application router.
///
/// Children are matched first-come in registration order, so a literal
/// segment registered after a `:name` sibling at the same depth is captured
/// by the `:name` branch. Register literal routes first.
pub struct Router {
    roots: HashMap<Method, Node>,
    handlers: HashMap<Method, HashMap<String, BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { roots: HashMap::new(), handlers: HashMap::new() }
    }

    /// Register a handler for a method + pattern pair. Returns `self` for
    /// chaining.
    ///
    /// ```rust,no_run
    /// # use sprig::{Method, Request, Response, Router};
    /// # async fn doc(_: Request) -> Response { Response::text("") }
    /// # async fn login(_: Request) -> Response { Response::text("") }
    /// # async fn assets(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::GET,  "/p/:lang/doc",      doc)
    ///     .on(Method::POST, "/login",            login)
    ///     .on(Method::GET,  "/assets/*filepath", assets);
    /// ```
    ///
    /// Registering the same pair again replaces the handler.
    pub fn on(self, method: Method, pattern: &str, handler: impl Handler) -> Self {
        self.add(method, pattern, handler)
    }

    pub fn get(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::GET, pattern, handler)
    }

    pub fn post(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::POST, pattern, handler)
    }

    pub fn put(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::PUT, pattern, handler)
    }

    pub fn patch(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::PATCH, pattern, handler)
    }

    pub fn delete(self, pattern: &str, handler: impl Handler) -> Self {
        self.add(Method::DELETE, pattern, handler)
    }

    fn add(mut self, method: Method, pattern: &str, handler: impl Handler) -> Self {
        // "" and "/" both name the root route.
        let pattern = if pattern.is_empty() { "/" } else { pattern };
        let parts = compile(pattern);
        let owner = self
            .roots
            .entry(method.clone())
            .or_default()
            .insert(pattern, &parts, 0);

        if owner != pattern {
            warn!(%method, pattern, shadowed_by = owner, "route is unreachable, ignoring");
            return self;
        }

        debug!(%method, pattern, "route registered");
        self.handlers
            .entry(method)
            .or_default()
            .insert(pattern.to_owned(), boxed(handler));
        self
    }

    /// Resolves `method` + `path` to a handler and the path parameters it
    /// captured.
    ///
    /// `None` when no route is registered for the method, or when none of
    /// its patterns match the path.
    pub fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let parts = compile(path);
        let node = self.roots.get(method)?.search(&parts, 0)?;
        let pattern = node.pattern()?;

        let mut params = HashMap::new();
        for (index, part) in compile(pattern).into_iter().enumerate() {
            if let Some(name) = part.strip_prefix(':') {
                if let Some(value) = parts.get(index) {
                    params.insert(name.to_owned(), (*value).to_owned());
                }
            } else if let Some(name) = part.strip_prefix('*') {
                if !name.is_empty() {
                    let rest = parts.get(index..).unwrap_or_default();
                    params.insert(name.to_owned(), rest.join("/"));
                }
                break;
            }
        }

        let handler = Arc::clone(self.handlers.get(method)?.get(pattern)?);
        Some((handler, params))
    }

    /// Routes one request: installs the captured parameters and runs the
    /// matching handler, or answers `404 NOT FOUND: <path>`.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(&req.method, req.path()) {
            Some((handler, params)) => {
                req.params = params;
                handler(req).await
            }
            None => {
                debug!(method = %req.method, path = req.path(), "no route");
                Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .text(format!("404 NOT FOUND: {}\n", req.path()))
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
