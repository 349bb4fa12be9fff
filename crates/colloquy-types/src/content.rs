use serde::{Deserialize, Serialize};

/// Message content as returned by the remote service.
///
/// The service is inconsistent about content shape: older responses carry a
/// plain string, newer ones a structured list of parts whose text may itself
/// be a plain string or a nested `{ "value": ... }` object. All shapes
/// deserialize here and flatten through [`MessageContent::as_text`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),

    /// Structured content list
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: TextValue,
    },

    /// Non-text parts (images, tool output) are preserved but contribute no text
    #[serde(other)]
    Other,
}

/// The text payload of a content part, plain or nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Nested { value: String },
}

impl TextValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) => s,
            Self::Nested { value } => value,
        }
    }
}

impl MessageContent {
    /// Create text content
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Flatten to plain text. Multiple text parts are joined with newlines.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::Other => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
