//! The fixed instruction template that turns role, context and task into a
//! request for an enhanced prompt.

use std::collections::HashMap;

use enhancer_primitives::PromptComponents;

use crate::template::PromptTemplate;

/// Instruction text sent to the model, with `{{role}}`, `{{context}}` and
/// `{{task}}` placeholders.
pub const ENHANCEMENT_TEMPLATE: &str = "\
As an AI prompt expert, enhance the following prompt components into a comprehensive prompt.
Add specific format instructions for the response and include requirements for clarifying assumptions.

Original Components:
Role: {{role}}
Context: {{context}}
Task: {{task}}

Create a well-structured prompt that:
1. Maintains the original intent
2. Adds specific format requirements for the response
3. Requires clarification of assumptions before proceeding
4. Includes any necessary context or background information
5. Specifies any constraints or limitations
";

/// Renders [`ENHANCEMENT_TEMPLATE`] for a set of [`PromptComponents`].
#[derive(Clone, Debug)]
pub struct EnhancementTemplate {
    template: PromptTemplate,
}

impl Default for EnhancementTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancementTemplate {
    /// Creates the renderer around the built-in template text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            template: PromptTemplate::new(ENHANCEMENT_TEMPLATE),
        }
    }

    /// Builds the instruction text. Never fails; empty fields leave their
    /// section blank.
    #[must_use]
    pub fn render(&self, components: &PromptComponents) -> String {
        let vars = HashMap::from([
            ("role".to_owned(), components.role.clone()),
            ("context".to_owned(), components.context.clone()),
            ("task".to_owned(), components.task.clone()),
        ]);
        self.template.fill(&vars)
    }
}

/// Builds the enhancement instruction for a role, context and task.
///
/// Inputs are embedded verbatim: nothing is trimmed, escaped or truncated.
#[must_use]
pub fn build_prompt(role: &str, context: &str, task: &str) -> String {
    EnhancementTemplate::new().render(&PromptComponents::new(role, context, task))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTRUCTIONS: [&str; 5] = [
        "1. Maintains the original intent",
        "2. Adds specific format requirements for the response",
        "3. Requires clarification of assumptions before proceeding",
        "4. Includes any necessary context or background information",
        "5. Specifies any constraints or limitations",
    ];

    #[test]
    fn embeds_components_verbatim() {
        let prompt = build_prompt("Senior Software Engineer", "", "Write a test plan");

        assert!(prompt.contains("Role: Senior Software Engineer\n"));
        assert!(prompt.contains("Context: \n"));
        assert!(prompt.contains("Task: Write a test plan\n"));
        for line in INSTRUCTIONS {
            assert!(prompt.contains(line), "missing instruction: {line}");
        }
    }

    #[test]
    fn empty_inputs_keep_instructions() {
        let prompt = build_prompt("", "", "");

        assert!(!prompt.is_empty());
        assert!(prompt.contains("Role: \nContext: \nTask: \n"));
        for line in INSTRUCTIONS {
            assert!(prompt.contains(line));
        }
    }

    #[test]
    fn output_is_deterministic() {
        let a = build_prompt("r", "c", "t");
        let b = build_prompt("r", "c", "t");
        assert_eq!(a, b);
    }

    #[test]
    fn placeholder_like_input_is_not_expanded() {
        let prompt = build_prompt("{{task}}", "  padded  ", "<b>&amp;</b>");

        assert!(prompt.contains("Role: {{task}}\n"));
        assert!(prompt.contains("Context:   padded  \n"));
        assert!(prompt.contains("Task: <b>&amp;</b>\n"));
    }

    #[test]
    fn multiline_input_is_kept_whole() {
        let context = "line one\nline two\n\nline four";
        let prompt = build_prompt("", context, "");
        assert!(prompt.contains(context));
    }

    #[test]
    fn template_references_all_components() {
        let placeholders = PromptTemplate::new(ENHANCEMENT_TEMPLATE).placeholders();
        assert_eq!(placeholders, vec!["role", "context", "task"]);
    }
}
