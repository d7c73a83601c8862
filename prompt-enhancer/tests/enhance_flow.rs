use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use prompt_enhancer::adapters::traits::{AdapterError, AdapterMetadata, AdapterResult, TextGenerator};
use prompt_enhancer::{
    Credential, EnhancedPrompt, Enhancer, PlainTextRenderer, PromptComponents, PromptRenderer,
    build_prompt,
};

/// Records every prompt it sees and answers with a fixed outcome.
struct RecordingGenerator {
    metadata: AdapterMetadata,
    reply: Result<String, String>,
    seen: Mutex<Vec<(String, String)>>,
}

impl RecordingGenerator {
    fn replying(text: &str) -> Arc<Self> {
        Self::with(Ok(text.to_owned()))
    }

    fn failing(reason: &str) -> Arc<Self> {
        Self::with(Err(reason.to_owned()))
    }

    fn with(reply: Result<String, String>) -> Arc<Self> {
        Arc::new(Self {
            metadata: AdapterMetadata::new("recording", "stub-model"),
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn generate(&self, credential: &Credential, prompt: &str) -> AdapterResult<String> {
        self.seen
            .lock()
            .unwrap()
            .push((credential.expose().to_owned(), prompt.to_owned()));
        self.reply.clone().map_err(AdapterError::transport)
    }
}

#[tokio::test]
async fn senior_engineer_test_plan_round_trip() {
    let generator = RecordingGenerator::replying("Certainly, here is a plan...");
    let enhancer = Enhancer::new(generator.clone());
    let credential = Credential::new("secret-key").unwrap();
    let components = PromptComponents::new("Senior Software Engineer", "", "Write a test plan");

    let enhanced = enhancer.enhance(&credential, &components).await;

    assert_eq!(
        enhanced,
        EnhancedPrompt::Generated("Certainly, here is a plan...".to_owned())
    );
    assert_eq!(enhanced.display_text(), "Certainly, here is a plan...");

    let seen = generator.seen();
    assert_eq!(seen.len(), 1);
    let (key, prompt) = &seen[0];
    assert_eq!(key, "secret-key");
    assert_eq!(
        prompt,
        &build_prompt("Senior Software Engineer", "", "Write a test plan")
    );
    for needle in [
        "Senior Software Engineer",
        "Write a test plan",
        "Maintains the original intent",
        "format requirements",
        "clarification of assumptions",
        "context or background information",
        "constraints or limitations",
    ] {
        assert!(prompt.contains(needle), "prompt lacks {needle:?}");
    }
}

#[tokio::test]
async fn failure_becomes_displayable_error() {
    let enhancer = Enhancer::new(RecordingGenerator::failing("timeout"));
    let credential = Credential::new("k").unwrap();

    let enhanced = enhancer
        .enhance(&credential, &PromptComponents::default())
        .await;

    assert!(enhanced.is_error());
    assert_eq!(
        enhanced.display_text(),
        "Error generating enhanced prompt: timeout"
    );

    let err = enhanced.into_result().expect_err("failed");
    assert_eq!(err.details(), "timeout");
}

#[tokio::test]
async fn blank_components_are_sent_anyway() {
    let generator = RecordingGenerator::replying("OK");
    let enhancer = Enhancer::new(generator.clone());

    let enhanced = enhancer
        .enhance(&Credential::new("k").unwrap(), &PromptComponents::default())
        .await;

    assert_eq!(enhanced.into_result().unwrap(), "OK");
    assert_eq!(generator.seen()[0].1, build_prompt("", "", ""));
}

#[tokio::test]
async fn rendered_output_shows_result_or_error_in_same_place() {
    let components = PromptComponents::new("r", "c", "t");
    let renderer = PlainTextRenderer::new();

    let ok = Enhancer::new(RecordingGenerator::replying("Enhanced!"))
        .enhance(&Credential::new("k").unwrap(), &components)
        .await;
    let failed = Enhancer::new(RecordingGenerator::failing("quota exceeded"))
        .enhance(&Credential::new("k").unwrap(), &components)
        .await;

    assert_eq!(
        renderer.render(&components, &ok),
        "Enhanced Prompt\n---------------\nEnhanced!\n"
    );
    assert_eq!(
        renderer.render(&components, &failed),
        "Enhanced Prompt\n---------------\nError generating enhanced prompt: quota exceeded\n"
    );
}
