//! Builds the enhancement instruction and runs it through the completion client.

use std::fmt;
use std::sync::Arc;

use enhancer_adapters::traits::TextGenerator;
use enhancer_primitives::{Credential, PromptComponents, RequestId};
use enhancer_prompts::EnhancementTemplate;
use tracing::{Instrument, debug, info_span};

use crate::client::{CompletionClient, GenerationError};

/// Outcome of one enhancement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnhancedPrompt {
    /// Text returned by the model, unmodified.
    Generated(String),
    /// The generator failed.
    Failed(GenerationError),
}

impl EnhancedPrompt {
    /// Returns `true` when the generator failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the text to show the user: the generated prompt, or the error
    /// message in its place.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.to_string()
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`GenerationError`] when generation failed.
    pub fn into_result(self) -> Result<String, GenerationError> {
        self.into()
    }
}

impl fmt::Display for EnhancedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated(text) => f.write_str(text),
            Self::Failed(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<Result<String, GenerationError>> for EnhancedPrompt {
    fn from(result: Result<String, GenerationError>) -> Self {
        match result {
            Ok(text) => Self::Generated(text),
            Err(err) => Self::Failed(err),
        }
    }
}

impl From<EnhancedPrompt> for Result<String, GenerationError> {
    fn from(prompt: EnhancedPrompt) -> Self {
        match prompt {
            EnhancedPrompt::Generated(text) => Ok(text),
            EnhancedPrompt::Failed(err) => Err(err),
        }
    }
}

/// Turns [`PromptComponents`] into an [`EnhancedPrompt`].
#[derive(Clone, Debug)]
pub struct Enhancer {
    template: EnhancementTemplate,
    client: CompletionClient,
}

impl Enhancer {
    /// Creates an enhancer backed by `generator`.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_client(CompletionClient::new(generator))
    }

    /// Creates an enhancer around an existing client.
    #[must_use]
    pub fn with_client(client: CompletionClient) -> Self {
        Self {
            template: EnhancementTemplate::new(),
            client,
        }
    }

    /// Returns the completion client in use.
    #[must_use]
    pub const fn client(&self) -> &CompletionClient {
        &self.client
    }

    /// Builds the instruction text for `components` without sending it.
    #[must_use]
    pub fn build_prompt(&self, components: &PromptComponents) -> String {
        self.template.render(components)
    }

    /// Builds the prompt and issues exactly one generation request.
    ///
    /// Never fails: generator errors come back as [`EnhancedPrompt::Failed`].
    pub async fn enhance(
        &self,
        credential: &Credential,
        components: &PromptComponents,
    ) -> EnhancedPrompt {
        let metadata = self.client.metadata();
        let span = info_span!(
            "enhance",
            request_id = %RequestId::random(),
            provider = metadata.provider(),
            model = metadata.model()
        );

        async {
            let prompt = self.build_prompt(components);
            debug!(prompt_chars = prompt.chars().count(), "built enhancement prompt");
            EnhancedPrompt::from(self.client.generate(credential, &prompt).await)
        }
        .instrument(span)
        .await
    }
}
