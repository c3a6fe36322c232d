//! Route handlers.
//!
//! A handler turns a [`Request`], with its path parameters already
//! installed, into a [`Response`]. Two shapes are accepted:
//!
//! - any `async fn` or closure `Fn(Request) -> impl Future<Output = impl IntoResponse>`
//! - your own type implementing [`Handler`], for handlers that carry state
//!
//! ```rust
//! use sprig::{Handler, Request, Response, Router};
//!
//! struct Greeter { greeting: String }
//!
//! impl Handler for Greeter {
//!     async fn handle(&self, req: Request) -> Response {
//!         Response::text(format!("{} {}", self.greeting, req.param("name").unwrap_or("")))
//!     }
//! }
//!
//! let app = Router::new().get("/hello/:name", Greeter { greeting: "hi".into() });
//! ```
//!
//! Routes of different handler types live in the same table, so each one is
//! boxed into a [`BoxedHandler`] when it is registered.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The future a stored handler returns.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A handler as stored in the route table: call it with the request.
pub type BoxedHandler = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync + 'static>;

/// Something that can answer a routed request.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: Request) -> impl Future<Output = Response> + Send;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    fn handle(&self, req: Request) -> impl Future<Output = Response> + Send {
        let fut = (self)(req);
        async move { fut.await.into_response() }
    }
}

/// Erases the handler's concrete type.
pub(crate) fn boxed<H: Handler>(handler: H) -> BoxedHandler {
    let handler = Arc::new(handler);
    Arc::new(move |req: Request| -> HandlerFuture {
        let handler = Arc::clone(&handler);
        Box::pin(async move { Handler::handle(&*handler, req).await })
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use http::{HeaderMap, Method};

    use super::*;

    fn request(path: &str) -> Request {
        Request::new(Method::GET, path.parse().unwrap(), HeaderMap::new(), Bytes::new())
    }

    struct Counter {
        hits: AtomicUsize,
    }

    impl Handler for Counter {
        async fn handle(&self, _req: Request) -> Response {
            let n = self.hits.fetch_add(1, Ordering::Relaxed) + 1;
            Response::text(n.to_string())
        }
    }

    #[tokio::test]
    async fn closures_convert_their_output() {
        let handler = boxed(|req: Request| async move { format!("at {}", req.path()) });

        let res = handler(request("/x")).await;
        assert_eq!(res.body(), b"at /x");
    }

    #[tokio::test]
    async fn stateful_handlers_keep_state_across_calls() {
        let handler = boxed(Counter { hits: AtomicUsize::new(0) });

        assert_eq!(handler(request("/")).await.body(), b"1");
        assert_eq!(handler(request("/")).await.body(), b"2");
    }
}
