//! # sprig
//!
//! A small async HTTP framework built around a per-method trie router.
//!
//! ## Routing
//!
//! Patterns are `/`-delimited segments:
//!
//! - `hello` matches the literal segment `hello`
//! - `:lang` matches any one segment and captures it as `lang`
//! - `*filepath` matches the rest of the path (at least one segment) and
//!   captures it, joined by `/`, as `filepath`; nothing after it is read
//!
//! Each method gets its own trie. Lookups walk the trie depth-first and the
//! first registered route that matches wins: there is no "most specific
//! route" ranking. A literal registered after a `:name` sibling at the same
//! depth is unreachable, so register literals first.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sprig::{Json, Request, Response, Router, Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sprig::Error> {
//!     let app = Router::new()
//!         .get("/",                  index)
//!         .get("/hello/:name",       hello)
//!         .get("/assets/*filepath",  assets)
//!         .post("/login",            login);
//!
//!     Server::from_config(&ServerConfig::from_env()).serve(app).await
//! }
//!
//! async fn index(_req: Request) -> Response {
//!     Response::html("<h1>Hello sprig</h1>")
//! }
//!
//! async fn hello(req: Request) -> String {
//!     format!("hello {}, you're at {}\n", req.param("name").unwrap_or(""), req.path())
//! }
//!
//! async fn assets(req: Request) -> Json<std::collections::HashMap<String, String>> {
//!     Json(req.params().clone())
//! }
//!
//! async fn login(req: Request) -> Json<[Option<String>; 2]> {
//!     Json([req.form("username"), req.form("password")])
//! }
//! ```
//!
//! Unmatched requests get `404 NOT FOUND: <path>` as plain text.

mod config;
mod error;
mod handler;
mod pattern;
mod request;
mod response;
mod router;
mod server;
mod trie;

pub use config::ServerConfig;
pub use error::Error;
pub use handler::{BoxedHandler, Handler, HandlerFuture};
pub use http::{Method, StatusCode};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
