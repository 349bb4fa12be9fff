use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::FileRef;
use super::content::MessageContent;

/// Message author role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// A message as the remote service returns it: structured content and an
/// epoch-seconds creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteMessage {
    pub role: Role,

    #[serde(default)]
    pub content: MessageContent,

    /// Creation time in epoch seconds
    #[serde(default)]
    pub created_at: i64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<FileRef>,
}

/// A transcript entry ready for display: flattened text, ordered attachment
/// references, concrete timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<FileRef>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message stamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attachments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant message stamped now
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            attachments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<FileRef>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Convert a remote message, flattening content and resolving the
    /// epoch-seconds timestamp. Out-of-range timestamps fall back to now.
    pub fn from_remote(remote: RemoteMessage) -> Self {
        let created_at =
            DateTime::<Utc>::from_timestamp(remote.created_at, 0).unwrap_or_else(Utc::now);
        Self {
            role: remote.role,
            content: remote.content.as_text(),
            attachments: remote.attachments,
            created_at,
        }
    }
}
