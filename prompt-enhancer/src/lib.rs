//! Prompt enhancer facade.
//!
//! Builds an instruction from a role, context and task, sends it to a text
//! generator once, and hands back either the generated prompt or a single
//! "generation failed" error.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use prompt_enhancer::adapters::gemini::{GeminiConfig, GeminiGenerator};
//! use prompt_enhancer::{Credential, Enhancer, PromptComponents};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = GeminiGenerator::new(GeminiConfig::default())?;
//! let enhancer = Enhancer::new(Arc::new(generator));
//! let credential = Credential::new("my-api-key")?;
//!
//! let components = PromptComponents::new("Senior Software Engineer", "", "Write a test plan");
//! let enhanced = enhancer.enhance(&credential, &components).await;
//! println!("{enhanced}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::pedantic)]

mod client;
mod enhancer;
mod render;

pub use client::{CompletionClient, GenerationError};
pub use enhancer::{EnhancedPrompt, Enhancer};
pub use render::{PlainTextRenderer, PromptRenderer};

/// Re-export shared primitives for convenience.
pub use enhancer_primitives::{Credential, PromptComponents, RequestId};
/// Re-export the template builder.
pub use enhancer_prompts::build_prompt;

/// Text-generation adapters.
pub use enhancer_adapters as adapters;
/// Primitive types and errors.
pub use enhancer_primitives as primitives;
/// Prompt templates.
pub use enhancer_prompts as prompts;
