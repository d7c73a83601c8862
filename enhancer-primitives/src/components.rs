//! User-supplied prompt components.

use serde::{Deserialize, Serialize};

/// The role, context and task a user wants turned into a fuller prompt.
///
/// No field is validated. Empty strings are legitimate input and simply leave
/// the corresponding section of the enhancement template blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptComponents {
    /// Persona the downstream model should adopt, e.g. "Senior Software Engineer".
    #[serde(default)]
    pub role: String,
    /// Background or situation the task sits in.
    #[serde(default)]
    pub context: String,
    /// What needs to be accomplished.
    #[serde(default)]
    pub task: String,
}

impl PromptComponents {
    /// Creates components from the three fields.
    #[must_use]
    pub fn new(
        role: impl Into<String>,
        context: impl Into<String>,
        task: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            context: context.into(),
            task: task.into(),
        }
    }

    /// Returns `true` when all three fields are empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.role.is_empty() && self.context.is_empty() && self.task.is_empty()
    }
}
