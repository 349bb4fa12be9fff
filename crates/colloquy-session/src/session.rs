use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use colloquy_client::AssistantBackend;
use colloquy_types::{ChatMessage, RunHandle, UploadPart};

use crate::engine::{poll_run, submit, PollConfig};
use crate::error::{EngineError, Result};
use crate::history::fetch_history;
use crate::state::{RunOutcome, SessionState};

/// One conversation against one assistant: the transcript, the current
/// thread, and at most one in-flight run.
///
/// The run slot is the shared resource; [`ConversationSession::begin_turn`]
/// refuses while it is held. UIs that poll in a background task apply the
/// result through [`ConversationSession::apply_outcome`], which discards
/// outcomes whose run no longer matches (the run went stale because the user
/// switched thread or assistant, or cancelled).
pub struct ConversationSession<B: AssistantBackend + ?Sized> {
    backend: Arc<B>,
    assistant_id: String,
    thread_id: Option<String>,
    transcript: Vec<ChatMessage>,
    state: SessionState,
    active_run: Option<RunHandle>,
    banner: Option<String>,
    loading_history: bool,
    poll: PollConfig,
}

impl<B: AssistantBackend + ?Sized> ConversationSession<B> {
    pub fn new(backend: Arc<B>, assistant_id: impl Into<String>) -> Self {
        Self {
            backend,
            assistant_id: assistant_id.into(),
            thread_id: None,
            transcript: Vec::new(),
            state: SessionState::Idle,
            active_run: None,
            banner: None,
            loading_history: false,
            poll: PollConfig::default(),
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_loading_history(&self) -> bool {
        self.loading_history
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn active_run(&self) -> Option<&RunHandle> {
        self.active_run.as_ref()
    }

    /// Current dismissible error banner, if any
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Run one full turn: upload, submit, poll, apply. Convenience over
    /// [`Self::begin_turn`] + [`poll_run`] + [`Self::apply_outcome`] for
    /// callers that can await the whole turn in place.
    pub async fn send(
        &mut self,
        text: impl Into<String>,
        attachments: Vec<UploadPart>,
    ) -> Result<RunOutcome> {
        let handle = self.begin_turn(text, attachments).await?;

        let outcome =
            match poll_run(self.backend.as_ref(), &self.assistant_id, &handle, &self.poll).await {
                Ok(outcome) => outcome,
                Err(err) => return Err(self.fail(err)),
            };
        self.apply_outcome(&handle, &outcome);
        Ok(outcome)
    }

    /// Upload attachments (when present) and submit the message, leaving the
    /// session in `Polling` with the returned handle as its active run.
    ///
    /// Fails with [`EngineError::Busy`] while a run already holds the slot.
    pub async fn begin_turn(
        &mut self,
        text: impl Into<String>,
        attachments: Vec<UploadPart>,
    ) -> Result<RunHandle> {
        if self.state.is_busy() {
            return Err(EngineError::Busy);
        }
        let text = text.into();
        self.banner = None;
        self.transcript.push(ChatMessage::user(text.clone()));

        let refs = if attachments.is_empty() {
            Vec::new()
        } else {
            self.state = SessionState::Uploading;
            let target = self.upload_target();
            match self
                .backend
                .upload_files(&self.assistant_id, &target, attachments)
                .await
            {
                Ok(refs) => refs,
                Err(err) => return Err(self.fail(EngineError::Upload(err))),
            }
        };
        if !refs.is_empty() {
            if let Some(last) = self.transcript.last_mut() {
                last.attachments = refs.clone();
            }
        }

        self.state = SessionState::Submitting;
        let file_ids: Vec<String> = refs.into_iter().map(|reference| reference.file_id).collect();
        let handle = match submit(
            self.backend.as_ref(),
            &self.assistant_id,
            self.thread_id.as_deref(),
            &text,
            &file_ids,
        )
        .await
        {
            Ok(handle) => handle,
            Err(err) => return Err(self.fail(err)),
        };
        self.state = SessionState::AwaitingRun;

        // Adopt the returned thread immediately: the next message in this
        // conversation reuses it even when the service just created it.
        self.thread_id = Some(handle.thread_id.clone());
        self.active_run = Some(handle.clone());
        self.state = SessionState::Polling;
        Ok(handle)
    }

    /// Apply a finished run's outcome to the transcript. Returns `false`
    /// (and changes nothing) when the outcome's run is no longer this
    /// session's active run, i.e. a stale completion from before a
    /// thread/assistant switch or a cancellation.
    pub fn apply_outcome(&mut self, handle: &RunHandle, outcome: &RunOutcome) -> bool {
        if self.active_run.as_ref() != Some(handle) {
            debug!(run_id = %handle.run_id, "discarding stale run outcome");
            return false;
        }
        self.active_run = None;
        self.state = SessionState::Idle;

        match outcome {
            RunOutcome::Completed { text } => {
                self.transcript.push(ChatMessage::assistant(text.clone()));
            }
            other => {
                // Every non-completed ending shows up twice: inline in the
                // transcript and as a dismissible banner.
                let message = other
                    .failure_message()
                    .unwrap_or_else(|| "The run ended unexpectedly.".to_string());
                self.transcript
                    .push(ChatMessage::assistant(format!("Error: {message}")));
                self.banner = Some(message);
            }
        }
        true
    }

    /// Best-effort cancellation: ask the service to stop the active run and
    /// release the run slot either way. Never fails: a rejected cancel
    /// request is logged and the session still returns to idle.
    pub async fn cancel(&mut self) {
        let Some(handle) = self.active_run.take() else {
            self.state = SessionState::Idle;
            return;
        };
        if let Err(err) = self
            .backend
            .cancel_run(&self.assistant_id, &handle.run_id)
            .await
        {
            warn!(run_id = %handle.run_id, error = %err, "run cancellation request failed");
        }
        self.state = SessionState::Idle;
    }

    /// Switch to a past thread (`Some`) or a fresh conversation (`None`).
    ///
    /// Any in-flight run goes stale: its outcome will be discarded by
    /// [`Self::apply_outcome`]. History load failure leaves an empty
    /// transcript and a banner so the UI stays usable.
    pub async fn select_thread(&mut self, thread_id: Option<String>) -> Result<()> {
        self.active_run = None;
        self.state = SessionState::Idle;
        self.banner = None;
        self.thread_id = thread_id.clone();
        self.transcript.clear();

        let Some(thread_id) = thread_id else {
            return Ok(());
        };

        self.loading_history = true;
        let loaded = fetch_history(self.backend.as_ref(), &self.assistant_id, &thread_id).await;
        self.loading_history = false;

        match loaded {
            Ok(messages) => {
                self.transcript = messages;
                Ok(())
            }
            Err(err) => {
                self.banner = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Switch to a different assistant, resetting thread selection and
    /// transcript. The stale-run rule of [`Self::select_thread`] applies.
    pub fn select_assistant(&mut self, assistant_id: impl Into<String>) {
        self.assistant_id = assistant_id.into();
        self.thread_id = None;
        self.transcript.clear();
        self.active_run = None;
        self.banner = None;
        self.state = SessionState::Idle;
    }

    /// Record a failure: synthetic assistant-role error entry in the
    /// transcript, dismissible banner, run slot released. The session is
    /// always usable again afterwards.
    fn fail(&mut self, err: EngineError) -> EngineError {
        let message = err.to_string();
        self.transcript
            .push(ChatMessage::assistant(format!("Error: {message}")));
        self.banner = Some(message);
        self.state = SessionState::Idle;
        self.active_run = None;
        err
    }

    fn upload_target(&self) -> String {
        self.thread_id
            .clone()
            .unwrap_or_else(|| format!("pending-{}", Uuid::new_v4()))
    }
}
