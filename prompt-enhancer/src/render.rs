//! Display rendering for enhancement results.

use enhancer_primitives::PromptComponents;

use crate::enhancer::EnhancedPrompt;

/// Capability that turns a submission and its outcome into display output.
pub trait PromptRenderer {
    /// Rendered form, e.g. a `String` for terminals.
    type Output;

    /// Renders `enhanced`, produced from `components`.
    fn render(&self, components: &PromptComponents, enhanced: &EnhancedPrompt) -> Self::Output;
}

/// Plain-text renderer for terminals and logs.
///
/// Failures are printed in the same slot as generated text; only the wording
/// tells them apart.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextRenderer {
    show_input: bool,
}

impl PlainTextRenderer {
    /// Creates a renderer that prints only the result.
    #[must_use]
    pub const fn new() -> Self {
        Self { show_input: false }
    }

    /// Also prints the submitted components above the result.
    #[must_use]
    pub const fn with_input(mut self) -> Self {
        self.show_input = true;
        self
    }
}

impl PromptRenderer for PlainTextRenderer {
    type Output = String;

    fn render(&self, components: &PromptComponents, enhanced: &EnhancedPrompt) -> String {
        let mut out = String::new();

        if self.show_input {
            section(&mut out, "Input Components");
            out.push_str(&format!("Role: {}\n", components.role));
            out.push_str(&format!("Context: {}\n", components.context));
            out.push_str(&format!("Task: {}\n\n", components.task));
        }

        section(&mut out, "Enhanced Prompt");
        out.push_str(&enhanced.display_text());
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

fn section(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.chars().count()));
    out.push('\n');
}
