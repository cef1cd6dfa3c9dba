//! Validation error types
//!
//! Every inbound request body is checked before it reaches the store.
//! Invalid input returns ValidationError, not panic.

use thiserror::Error;

/// Validation error for inquiry and admin requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A single required field is absent or empty
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// One or more required inquiry fields are absent or empty
    #[error("Required fields are missing: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// An update request that changes nothing
    #[error("status or memo is required")]
    NothingToUpdate,

    /// String doesn't match required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },
}
