use serde::{Deserialize, Serialize};

use super::message::RemoteMessage;

/// Remote run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    RequiresAction,
}

impl RunStatus {
    /// True for statuses from which no further transition occurs.
    /// `requires_action` counts: the client does not resolve tool calls,
    /// so the run will never progress from it.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Queued | Self::InProgress)
    }
}

/// Identifiers assigned by the remote service on submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    pub thread_id: String,
    pub run_id: String,
}

/// One status-poll response: the status itself plus, on completion, the
/// latest messages and, on failure, an error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatusReport {
    pub status: RunStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<RemoteMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunStatusReport {
    pub fn status_only(status: RunStatus) -> Self {
        Self {
            status,
            messages: Vec::new(),
            error: None,
        }
    }
}
