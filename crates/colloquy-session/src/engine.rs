use std::time::Duration;

use tracing::{debug, warn};

use colloquy_client::AssistantBackend;
use colloquy_types::{Role, RunHandle, RunStatus, RunStatusReport};

use crate::error::{EngineError, Result};
use crate::state::RunOutcome;

/// Status query cadence and bound. The defaults give a run roughly three
/// minutes to reach a terminal state.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 60,
        }
    }
}

/// Submit a message, implicitly creating a thread when `thread_id` is
/// `None`. The caller must adopt the returned thread id immediately:
/// follow-up messages in the same conversation reuse it.
pub async fn submit<B: AssistantBackend + ?Sized>(
    backend: &B,
    assistant_id: &str,
    thread_id: Option<&str>,
    text: &str,
    file_ids: &[String],
) -> Result<RunHandle> {
    backend
        .create_run(assistant_id, thread_id, text, file_ids)
        .await
        .map_err(EngineError::Submission)
}

/// Poll a run to a terminal state.
///
/// One status query per attempt, a fixed pause between attempts. Expected
/// endings come back as [`RunOutcome`] variants, including exhausting the
/// attempt bound, which is `TimedOut`, never a silent stop. Only transport
/// and API failures are `Err`.
pub async fn poll_run<B: AssistantBackend + ?Sized>(
    backend: &B,
    assistant_id: &str,
    handle: &RunHandle,
    config: &PollConfig,
) -> Result<RunOutcome> {
    for attempt in 1..=config.max_attempts {
        let report = backend
            .run_status(assistant_id, &handle.run_id, Some(&handle.thread_id))
            .await?;

        match report.status {
            RunStatus::Queued | RunStatus::InProgress => {
                debug!(run_id = %handle.run_id, attempt, status = ?report.status, "run still pending");
            }
            RunStatus::Completed => {
                let text = newest_assistant_text(&report).unwrap_or_else(|| {
                    warn!(run_id = %handle.run_id, "completed run carried no assistant message");
                    String::new()
                });
                return Ok(RunOutcome::Completed { text });
            }
            RunStatus::Failed => {
                let reason = report
                    .error
                    .unwrap_or_else(|| "The run failed without a reason from the service.".to_string());
                return Ok(RunOutcome::Failed { reason });
            }
            RunStatus::Cancelled => {
                let reason = report
                    .error
                    .unwrap_or_else(|| "The run was cancelled.".to_string());
                return Ok(RunOutcome::Cancelled { reason });
            }
            RunStatus::RequiresAction => return Ok(RunOutcome::Unsupported),
        }

        if attempt < config.max_attempts {
            tokio::time::sleep(config.interval).await;
        }
    }

    Ok(RunOutcome::TimedOut)
}

/// Extract the newest assistant message's plain text from a status report.
/// The report's own ordering is not trusted.
fn newest_assistant_text(report: &RunStatusReport) -> Option<String> {
    let mut messages: Vec<_> = report
        .messages
        .iter()
        .filter(|message| message.role == Role::Assistant)
        .collect();
    messages.sort_by_key(|message| message.created_at);
    messages.last().map(|message| message.content.as_text())
}
