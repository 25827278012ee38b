//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and pricing operations.
///
/// Only contract violations are represented here. Referencing a missing line
/// item, an unknown finish, or an unreadable snapshot are handled in place and
/// never become an `Err`.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Module id is not in the catalog.
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// Checkout was attempted on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
