//! Text-generation adapters used by the enhancer.
//!
//! Each provider module implements the [`traits::TextGenerator`] capability:
//! one prompt in, one fully generated text out.

#![warn(missing_docs, clippy::pedantic)]

pub mod gemini;
pub mod traits;

mod http_client;
