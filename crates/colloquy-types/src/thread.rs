use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thread listing entry as returned by the remote service. Threads are not
/// persisted locally; the list is re-derived from the service per assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,

    #[serde(default)]
    pub run_count: u32,
}

impl ThreadSummary {
    /// Short display title derived from the thread id
    pub fn title(&self) -> String {
        let prefix: String = self.thread_id.chars().take(8).collect();
        format!("Conversation {prefix}...")
    }

    /// Relative age label for list views. Takes `now` explicitly so the
    /// output is deterministic.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let Some(last) = self.last_activity else {
            return "recent".to_string();
        };
        let hours = (now - last).num_hours();
        if hours < 1 {
            "just now".to_string()
        } else if hours < 24 {
            format!("{hours}h ago")
        } else {
            format!("{}d ago", hours / 24)
        }
    }
}
