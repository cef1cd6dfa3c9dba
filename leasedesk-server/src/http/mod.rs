//! HTTP server layer
//!
//! Axum server with:
//! - CORS open to all origins
//! - Request tracing
//! - Graceful shutdown
//! - JSON envelope error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
