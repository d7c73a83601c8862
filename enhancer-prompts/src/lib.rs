//! Prompt construction for the enhancer.
//!
//! [`template`] holds a small `{{variable}}` substitution engine;
//! [`build_prompt`] applies the fixed enhancement template on top of it.

#![warn(missing_docs, clippy::pedantic)]

mod enhancement;
pub mod template;

pub use enhancement::{ENHANCEMENT_TEMPLATE, EnhancementTemplate, build_prompt};
pub use template::{PromptTemplate, TemplateBuilder, TemplateError, TemplateResult};
