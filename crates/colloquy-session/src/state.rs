/// Lifecycle of one conversation turn. Anything but `Idle` holds the run
/// slot; submission is gated on `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Uploading,
    Submitting,
    AwaitingRun,
    Polling,
}

impl SessionState {
    pub fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// How a run ended, as a typed union. Expected terminal conditions live
/// here; `Err` is reserved for transport/API failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run produced an assistant message
    Completed { text: String },

    /// The service reported failure, with its reason when it gave one
    Failed { reason: String },

    /// The run was cancelled remotely
    Cancelled { reason: String },

    /// The attempt bound was exhausted before a terminal status
    TimedOut,

    /// The run stopped in `requires_action`; tool-call resolution is not
    /// supported by this client
    Unsupported,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// User-visible message for every non-completed outcome
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed { reason } | Self::Cancelled { reason } => Some(reason.clone()),
            Self::TimedOut => Some("Timed out waiting for the run to complete.".to_string()),
            Self::Unsupported => Some(
                "The run requires a tool action this client does not support.".to_string(),
            ),
        }
    }
}
