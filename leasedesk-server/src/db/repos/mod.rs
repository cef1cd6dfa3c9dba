//! Repository implementations for database access
//!
//! Each repository borrows the pool and issues exactly one statement per
//! operation; consistency relies on single-statement atomicity.

pub mod admin;
pub mod inquiries;

pub use admin::{AdminCredentials, AdminRepo};
pub use inquiries::InquiryRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("invalid {column} in row {id}: '{value}'")]
    InvalidRow {
        id: i64,
        column: &'static str,
        value: String,
    },
}
