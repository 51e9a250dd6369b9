//! Prompt templates with `{{ name }}` placeholders.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::error::RunError;
use super::pool::VariablePool;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is a valid regex")
});

/// An immutable prompt blueprint.
///
/// Placeholders are written `{{ name }}` (whitespace inside the braces is
/// optional) and are collected once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
    placeholders: Vec<String>,
}

impl PromptTemplate {
    /// Creates a template from `text`, collecting its placeholders.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut placeholders: Vec<String> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&text) {
            let name = &caps[1];
            if !placeholders.iter().any(|p| p == name) {
                placeholders.push(name.to_string());
            }
        }
        Self { text, placeholders }
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Returns the raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitutes every placeholder with its value from `pool`.
    ///
    /// All placeholders are checked before anything is substituted, and values
    /// are inserted verbatim: a value that itself looks like `{{ x }}` is not
    /// expanded again.
    pub fn render(&self, pool: &VariablePool) -> Result<String, RunError> {
        if let Some(missing) = self.placeholders.iter().find(|p| !pool.contains(p)) {
            return Err(RunError::MissingVariable(missing.clone()));
        }

        let rendered = PLACEHOLDER.replace_all(&self.text, |caps: &Captures| {
            pool.get(&caps[1]).unwrap_or_default().to_string()
        });
        Ok(rendered.into_owned())
    }
}
