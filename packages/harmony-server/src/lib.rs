// harmony_server: HTTP API for the harmony engine.
//
// Module overview:
// - `config.rs`:  Listen address and allowed CORS origins.
// - `http.rs`:    Owned request/response values and `tiny_http` conversions.
// - `cors.rs`:    Origin checks and CORS response/preflight headers.
// - `schema.rs`:  JSON request and response bodies.
// - `routes.rs`:  Endpoint handlers; a pure `Request -> Response` function.
// - `server.rs`:  `tiny_http` server and the fixed worker pool.
//
// The server can run as a standalone binary (`main.rs`) or be embedded via
// `start_server`.

pub mod config;
pub mod cors;
pub mod error;
pub mod http;
pub mod routes;
pub mod schema;
pub mod server;

pub use config::ServerConfig;
pub use error::ServerError;
pub use server::{start_server, ServerHandle};
