//! Minimal sprig example — HTML, text, JSON, path parameters and form data.
//!
//! Run with:
//!   SPRIG_ADDR=127.0.0.1:9999 SPRIG_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:9999/
//!   curl 'http://localhost:9999/hello?name=geek'
//!   curl http://localhost:9999/hello/geek
//!   curl http://localhost:9999/assets/css/site.css
//!   curl -X POST http://localhost:9999/login -d 'username=alice&password=1234'
//!   curl http://localhost:9999/missing

use std::collections::HashMap;

use sprig::{IntoResponse, Json, Request, Response, Router, Server, ServerConfig, StatusCode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), sprig::Error> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log))
        .init();

    // Literal routes go before dynamic siblings at the same depth.
    let app = Router::new()
        .get("/",                 index)
        .get("/hello",            hello_query)
        .get("/hello/:name",      hello_param)
        .get("/assets/*filepath", assets)
        .post("/login",           login);

    Server::from_config(&config).serve(app).await
}

async fn index(_req: Request) -> Response {
    Response::html("<h1>Hello sprig</h1>")
}

// GET /hello?name=geek
async fn hello_query(req: Request) -> String {
    let name = req.query("name").unwrap_or_default();
    format!("hello {name}, you're at {}\n", req.path())
}

// GET /hello/:name
async fn hello_param(req: Request) -> String {
    format!("hello {}, you're at {}\n", req.param("name").unwrap_or(""), req.path())
}

// GET /assets/*filepath
async fn assets(req: Request) -> Json<HashMap<String, String>> {
    Json(req.params().clone())
}

// POST /login
async fn login(req: Request) -> Response {
    let (Some(username), Some(password)) = (req.form("username"), req.form("password")) else {
        return Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .text("username and password are required\n");
    };

    let mut body = HashMap::new();
    body.insert("username", username);
    body.insert("password", password);
    Json(body).into_response()
}
