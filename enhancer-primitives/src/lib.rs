//! Core shared types for the prompt enhancer.

#![warn(missing_docs, clippy::pedantic)]

mod components;
mod credential;
mod error;
mod ids;

/// The three user-supplied fields an enhancement is built from.
pub use components::PromptComponents;
/// In-memory API key for the remote text-generation service.
pub use credential::Credential;
/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Per-submission identifier used to correlate log lines.
pub use ids::RequestId;
