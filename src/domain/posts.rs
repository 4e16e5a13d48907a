//! Post input rules shared by every write path.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// Upper bound on the title, counted in characters rather than bytes.
pub const TITLE_MAX_CHARS: usize = 255;

pub const TITLE_FIELD: &str = "title";
pub const CONTENT_FIELD: &str = "content";

/// Field-level validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.field(field).first().map(String::as_str)
    }

    /// First message, followed by a count of the remaining ones.
    pub fn summary(&self) -> String {
        let Some(first) = self.fields.values().flatten().next() else {
            return "The given data was invalid.".to_string();
        };

        match self.len() - 1 {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            rest => format!("{first} (and {rest} more errors)"),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

/// A validated title/content pair ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: Option<String>,
}

impl PostDraft {
    /// Trim the submitted values and enforce the title rules.
    ///
    /// Blank content is normalised to `None`.
    pub fn parse(title: Option<&str>, content: Option<&str>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = title.map(str::trim).unwrap_or_default();
        if title.is_empty() {
            errors.add(TITLE_FIELD, "The title field is required.");
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.add(
                TITLE_FIELD,
                format!("The title field must not be greater than {TITLE_MAX_CHARS} characters."),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let content = content
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Self {
            title: title.to_string(),
            content,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn into_parts(self) -> (String, Option<String>) {
        (self.title, self.content)
    }
}
