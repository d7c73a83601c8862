//! Completion client: one prompt in, generated text or a generation error out.

use std::fmt;
use std::sync::Arc;

use enhancer_adapters::traits::{AdapterError, AdapterMetadata, TextGenerator};
use enhancer_primitives::Credential;
use thiserror::Error;
use tracing::{debug, warn};

/// The single failure kind surfaced to callers.
///
/// Every underlying cause (network, authentication, quota, malformed
/// response) collapses into this type; `details` keeps the cause's message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Error generating enhanced prompt: {details}")]
pub struct GenerationError {
    details: String,
}

impl GenerationError {
    /// Creates an error with the supplied cause description.
    #[must_use]
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }

    /// Returns the description of the underlying cause.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }
}

impl From<AdapterError> for GenerationError {
    fn from(err: AdapterError) -> Self {
        Self::new(err.to_string())
    }
}

/// Sends a built prompt to a [`TextGenerator`].
///
/// Stateless: each call is one independent request with no retry.
#[derive(Clone)]
pub struct CompletionClient {
    generator: Arc<dyn TextGenerator>,
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("metadata", self.generator.metadata())
            .finish()
    }
}

impl CompletionClient {
    /// Wraps a generator.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Returns metadata of the wrapped generator.
    #[must_use]
    pub fn metadata(&self) -> &AdapterMetadata {
        self.generator.metadata()
    }

    /// Generates text for `prompt`.
    ///
    /// The generated text is returned unmodified, whatever it contains.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] for any failure of the underlying generator.
    pub async fn generate(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        match self.generator.generate(credential, prompt).await {
            Ok(text) => {
                debug!(chars = text.chars().count(), "generation succeeded");
                Ok(text)
            }
            Err(err) => {
                warn!(error = %err, "generation failed");
                Err(err.into())
            }
        }
    }

    /// Like [`generate`](Self::generate), but folds the outcome into one
    /// displayable string: the generated text, or the error message.
    pub async fn generate_text(&self, credential: &Credential, prompt: &str) -> String {
        self.generate(credential, prompt)
            .await
            .unwrap_or_else(|err| err.to_string())
    }
}
