//! # HTTP API
//!
//! Axum-based REST surface for the notes store: CRUD handlers, error
//! mapping, security headers, CORS, and the server loop.

mod error;
mod handlers;
mod routes;
mod security;
mod server;

pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use security::apply_security_headers;
pub use server::start_api_server;
