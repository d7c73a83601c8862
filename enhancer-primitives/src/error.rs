//! Shared error definitions for enhancer primitives.

use thiserror::Error;

/// Result alias used throughout the enhancer crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The credential was rejected before any request was made.
    #[error("invalid credential: {reason}")]
    InvalidCredential {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
