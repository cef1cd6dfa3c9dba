//! leasedesk-server: HTTP service for lease/rent inquiries
//!
//! Exposes list/create/update/delete over the `inquiries` table and a
//! password-gated admin login backed by the `admin` table.

pub mod auth;
pub mod db;
pub mod http;

pub use db::{create_pool, migrations};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
