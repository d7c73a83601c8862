//! Shared text-generation traits and data structures.

use std::time::Duration;

use async_trait::async_trait;
use enhancer_primitives::Credential;
use thiserror::Error;

/// Result alias used by adapters.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Error type shared by adapter implementations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Adapter is misconfigured.
    #[error("adapter not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The supplied request could not be encoded for the provider.
    #[error("invalid generation request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be processed.
        reason: String,
    },

    /// Transport-level failures (network, timeout, TLS).
    ///
    /// Displays the underlying reason unadorned.
    #[error("{reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The provider rejected the request due to rate limiting.
    #[error("adapter rate limited (retry after {})", describe_retry_after(.retry_after))]
    RateLimited {
        /// Suggested delay before retrying, when the provider sent one.
        retry_after: Option<Duration>,
    },

    /// The provider returned an error status or a malformed response.
    #[error("adapter response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl AdapterError {
    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

fn describe_retry_after(retry_after: &Option<Duration>) -> String {
    retry_after.map_or_else(|| "unspecified".to_owned(), |delay| format!("{}s", delay.as_secs()))
}

/// Minimal metadata describing an adapter instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterMetadata {
    provider: &'static str,
    model: String,
}

impl AdapterMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: &'static str, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Returns the provider identifier (e.g., "gemini").
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Capability implemented by every text-generation backend.
///
/// One call issues exactly one request and resolves once the full text is
/// available. Implementations do not retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns basic metadata describing the generator.
    fn metadata(&self) -> &AdapterMetadata;

    /// Generates text for `prompt`, authenticating with `credential`.
    async fn generate(&self, credential: &Credential, prompt: &str) -> AdapterResult<String>;
}
