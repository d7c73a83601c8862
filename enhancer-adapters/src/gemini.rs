//! Google Gemini text generator.

use std::{env, fmt, time::Duration};

use async_trait::async_trait;
use enhancer_primitives::Credential;
use hyper::header::{HeaderMap, HeaderName, RETRY_AFTER};
use hyper::{StatusCode, Uri};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::{HyperClient, RawResponse, build_https_client, post_json};
use crate::traits::{AdapterError, AdapterMetadata, AdapterResult, TextGenerator};

/// Environment variable consulted by [`credential_from_env`].
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Public Gemini API root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Reads the API key from the `GEMINI_API_KEY` environment variable.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`] if the variable is unset or blank.
pub fn credential_from_env() -> AdapterResult<Credential> {
    let key = env::var(GEMINI_API_KEY_ENV)
        .map_err(|_| AdapterError::configuration(format!("{GEMINI_API_KEY_ENV} is not set")))?;
    Credential::new(key).map_err(|err| AdapterError::configuration(err.to_string()))
}

/// Configuration for the Gemini generator.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    model: String,
    base_url: String,
    timeout: Option<Duration>,
    default_temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GEMINI_MODEL)
    }
}

impl GeminiConfig {
    /// Creates a configuration using the supplied model identifier.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            timeout: None,
            default_temperature: None,
            max_output_tokens: None,
        }
    }

    /// Overrides the base URL used for API calls.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> AdapterResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Bounds how long a single request may take. Unbounded by default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the sampling temperature sent with every request.
    #[must_use]
    pub fn with_default_temperature(mut self, temperature: f32) -> Self {
        self.default_temperature = Some(temperature);
        self
    }

    /// Caps the number of generated tokens.
    #[must_use]
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Returns the configured model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the configured base URL (always ends with `/`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Gemini generator calling `generateContent` over HTTPS.
pub struct GeminiGenerator {
    client: HyperClient,
    endpoint: Uri,
    metadata: AdapterMetadata,
    timeout: Option<Duration>,
    generation_config: Option<GenerationConfig>,
}

impl fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("model", &self.metadata.model())
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    /// Constructs a generator with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the model name is empty or
    /// does not form a valid endpoint URI.
    pub fn new(config: GeminiConfig) -> AdapterResult<Self> {
        if config.model.trim().is_empty() {
            return Err(AdapterError::configuration("Gemini model name cannot be empty"));
        }

        let endpoint = format!(
            "{}v1beta/models/{}:generateContent",
            config.base_url, config.model
        )
        .parse::<Uri>()
        .map_err(|err| AdapterError::configuration(format!("invalid Gemini endpoint: {err}")))?;

        let generation_config =
            if config.default_temperature.is_some() || config.max_output_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: config.default_temperature,
                    max_output_tokens: config.max_output_tokens,
                })
            } else {
                None
            };

        Ok(Self {
            client: build_https_client(),
            endpoint,
            metadata: AdapterMetadata::new("gemini", config.model),
            timeout: config.timeout,
            generation_config,
        })
    }

    /// Returns the `generateContent` endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: self.generation_config.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn generate(&self, credential: &Credential, prompt: &str) -> AdapterResult<String> {
        let payload = self.build_request(prompt);
        let body = serde_json::to_vec(&payload).map_err(|err| {
            AdapterError::invalid_request(format!("failed to encode Gemini request: {err}"))
        })?;

        debug!(
            model = self.metadata.model(),
            prompt_chars = prompt.chars().count(),
            "sending Gemini generateContent request"
        );

        let response = post_json(
            &self.client,
            "Gemini",
            self.endpoint.clone(),
            &[(HeaderName::from_static(API_KEY_HEADER), credential.expose())],
            body,
            self.timeout,
        )
        .await?;

        debug!(status = %response.status, bytes = response.body.len(), "Gemini response received");
        extract_text(&response)
    }
}

fn extract_text(response: &RawResponse) -> AdapterResult<String> {
    if response.status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AdapterError::RateLimited {
            retry_after: retry_after(&response.headers),
        });
    }

    if !response.status.is_success() {
        let reason = serde_json::from_slice::<ErrorEnvelope>(&response.body).map_or_else(
            |_| String::from_utf8_lossy(&response.body).into_owned(),
            |envelope| envelope.error.message,
        );
        return Err(AdapterError::response(format!(
            "Gemini returned {}: {reason}",
            response.status
        )));
    }

    let decoded: GenerateContentResponse = serde_json::from_slice(&response.body)
        .map_err(|err| AdapterError::response(format!("failed to decode Gemini response: {err}")))?;

    let Some(candidate) = decoded.candidates.into_iter().next() else {
        let reason = decoded
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map_or_else(
                || "Gemini returned no candidates".to_owned(),
                |block| format!("Gemini blocked the prompt: {block}"),
            );
        return Err(AdapterError::response(reason));
    };

    let parts = candidate.content.map(|content| content.parts).unwrap_or_default();
    if parts.is_empty() {
        let finish = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(AdapterError::response(format!(
            "Gemini candidate has no text (finish reason: {finish})"
        )));
    }

    Ok(parts.into_iter().map(|part| part.text).collect())
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn sanitize_base_url(input: &str) -> AdapterResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(AdapterError::configuration(
            "Gemini base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| AdapterError::configuration(format!("invalid Gemini base URL: {err}")))?;
    Ok(base)
}
