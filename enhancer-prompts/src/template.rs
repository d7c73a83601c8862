//! Code-based prompt template system with variable substitution.

use std::collections::HashMap;

/// Result alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A required variable was not provided.
    #[error("missing required variable: {name}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// A required variable is declared but never referenced by the template.
    #[error("required variable `{name}` does not appear in the template")]
    UnreferencedVariable {
        /// Name of the declared variable.
        name: String,
    },
}

/// A code-based prompt template with variable substitution.
///
/// Templates use `{{variable}}` placeholders. Substitution happens in a single
/// left-to-right pass: text inserted for one placeholder is never scanned for
/// further placeholders, so values are always reproduced verbatim. An opening
/// `{{` without a matching `}}` is copied through unchanged, as is `{{}}`.
///
/// # Examples
///
/// ```
/// use enhancer_prompts::template::PromptTemplate;
///
/// let template = PromptTemplate::builder("You are {{role}}. {{task}}")
///     .with_variable("role", "a helpful assistant")
///     .with_variable("task", "Answer questions concisely.")
///     .build()
///     .unwrap();
///
/// let rendered = template.render().unwrap();
/// assert!(rendered.contains("helpful assistant"));
/// ```
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    template: String,
    variables: HashMap<String, String>,
    required_variables: Vec<String>,
}

impl PromptTemplate {
    /// Creates a new template with the supplied text.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            variables: HashMap::new(),
            required_variables: Vec::new(),
        }
    }

    /// Returns a builder for constructing templates.
    #[must_use]
    pub fn builder(template: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder::new(template)
    }

    /// Renders the template with the current variables.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] if a required variable is not set.
    pub fn render(&self) -> TemplateResult<String> {
        self.render_with(&HashMap::new())
    }

    /// Renders the template with additional runtime variables.
    ///
    /// Runtime variables override template variables.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] if a required variable is not set.
    pub fn render_with(&self, runtime_vars: &HashMap<String, String>) -> TemplateResult<String> {
        if let Some(name) = self
            .required_variables
            .iter()
            .find(|name| !runtime_vars.contains_key(*name) && !self.variables.contains_key(*name))
        {
            return Err(TemplateError::MissingVariable { name: name.clone() });
        }

        Ok(self.fill(runtime_vars))
    }

    /// Renders the template, substituting the empty string for any placeholder
    /// that has no value. Required-variable declarations are not checked.
    #[must_use]
    pub fn fill(&self, runtime_vars: &HashMap<String, String>) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            let name = after[..end].trim();
            if name.is_empty() {
                out.push_str(&rest[start..start + 2 + end + 2]);
            } else if let Some(value) = runtime_vars
                .get(name)
                .or_else(|| self.variables.get(name))
            {
                out.push_str(value);
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        out
    }

    /// Returns the placeholder names referenced by the template, in order of
    /// appearance. Repeated placeholders are listed once per occurrence.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        extract_variable_refs(&self.template)
    }
}

/// Builder for constructing prompt templates.
pub struct TemplateBuilder {
    template: String,
    variables: HashMap<String, String>,
    required_variables: Vec<String>,
}

impl TemplateBuilder {
    /// Creates a new builder with the supplied template text.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            variables: HashMap::new(),
            required_variables: Vec::new(),
        }
    }

    /// Sets a variable with a default value.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Declares a required variable (must be provided at render time).
    #[must_use]
    pub fn with_required_variable(mut self, name: impl Into<String>) -> Self {
        self.required_variables.push(name.into());
        self
    }

    /// Builds the template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnreferencedVariable`] if a required variable
    /// never appears as a placeholder in the template text.
    pub fn build(self) -> TemplateResult<PromptTemplate> {
        let referenced = extract_variable_refs(&self.template);
        if let Some(name) = self
            .required_variables
            .iter()
            .find(|name| !referenced.contains(*name))
        {
            return Err(TemplateError::UnreferencedVariable { name: name.clone() });
        }

        Ok(PromptTemplate {
            template: self.template,
            variables: self.variables,
            required_variables: self.required_variables,
        })
    }
}

/// Extracts variable names from a template string.
fn extract_variable_refs(template: &str) -> Vec<String> {
    let mut vars = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim();
        if !name.is_empty() {
            vars.push(name.to_owned());
        }
        rest = &after[end + 2..];
    }

    vars
}
