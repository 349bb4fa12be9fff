#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use colloquy_client::{ApiError, AssistantBackend};
use colloquy_types::{
    Assistant, AssistantDraft, FileRef, MessageContent, RemoteMessage, Role, RunHandle, RunStatus,
    RunStatusReport, StoredFile, ThreadSummary, UploadPart,
};

/// Scripted in-process stand-in for the remote service. Status reports are
/// consumed front-to-back; call counters let tests assert exactly how many
/// requests the engine made.
#[derive(Default)]
pub struct MockBackend {
    pub handle: Mutex<Option<RunHandle>>,
    pub statuses: Mutex<VecDeque<RunStatusReport>>,
    /// Answer `in_progress` forever once the script runs out
    pub pending_forever: bool,
    pub history: Mutex<Vec<RemoteMessage>>,
    pub assistants: Mutex<Vec<Assistant>>,

    pub fail_create_run: bool,
    pub fail_upload: bool,
    pub fail_cancel: bool,
    pub fail_history: bool,

    pub status_queries: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub create_run_calls: AtomicUsize,
    pub cancel_calls: AtomicUsize,
    pub list_assistant_calls: AtomicUsize,

    pub last_submitted_thread: Mutex<Option<Option<String>>>,
    pub last_submitted_file_ids: Mutex<Vec<String>>,
    pub last_upload_target: Mutex<Option<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle(self, thread_id: &str, run_id: &str) -> Self {
        *self.handle.lock().unwrap() = Some(RunHandle {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        });
        self
    }

    pub fn with_statuses(self, reports: Vec<RunStatusReport>) -> Self {
        *self.statuses.lock().unwrap() = reports.into();
        self
    }

    pub fn with_history(self, messages: Vec<RemoteMessage>) -> Self {
        *self.history.lock().unwrap() = messages;
        self
    }

    pub fn with_assistants(self, assistants: Vec<Assistant>) -> Self {
        *self.assistants.lock().unwrap() = assistants;
        self
    }
}

pub fn completed_with(text: &str) -> RunStatusReport {
    RunStatusReport {
        status: RunStatus::Completed,
        messages: vec![RemoteMessage {
            role: Role::Assistant,
            content: MessageContent::text(text),
            created_at: 1_700_000_100,
            attachments: Vec::new(),
        }],
        error: None,
    }
}

pub fn remote_message(role: Role, text: &str, created_at: i64) -> RemoteMessage {
    RemoteMessage {
        role,
        content: MessageContent::text(text),
        created_at,
        attachments: Vec::new(),
    }
}

pub fn assistant(id: &str, name: &str) -> Assistant {
    Assistant {
        id: id.to_string(),
        name: name.to_string(),
        instructions: String::new(),
        model: None,
        tool_config: None,
    }
}

fn remote_error(status: u16, detail: &str) -> ApiError {
    ApiError::Status {
        status,
        detail: detail.to_string(),
    }
}

#[async_trait]
impl AssistantBackend for MockBackend {
    async fn create_run(
        &self,
        _assistant_id: &str,
        thread_id: Option<&str>,
        _text: &str,
        file_ids: &[String],
    ) -> Result<RunHandle, ApiError> {
        self.create_run_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_submitted_thread.lock().unwrap() = Some(thread_id.map(str::to_string));
        *self.last_submitted_file_ids.lock().unwrap() = file_ids.to_vec();

        if self.fail_create_run {
            return Err(remote_error(500, "submission rejected"));
        }
        Ok(self.handle.lock().unwrap().clone().unwrap_or(RunHandle {
            thread_id: "t1".to_string(),
            run_id: "r1".to_string(),
        }))
    }

    async fn run_status(
        &self,
        _assistant_id: &str,
        _run_id: &str,
        _thread_id: Option<&str>,
    ) -> Result<RunStatusReport, ApiError> {
        self.status_queries.fetch_add(1, Ordering::SeqCst);
        if let Some(report) = self.statuses.lock().unwrap().pop_front() {
            return Ok(report);
        }
        if self.pending_forever {
            return Ok(RunStatusReport::status_only(RunStatus::InProgress));
        }
        Err(ApiError::InvalidResponse("status script exhausted".to_string()))
    }

    async fn cancel_run(&self, _assistant_id: &str, _run_id: &str) -> Result<(), ApiError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_cancel {
            return Err(remote_error(500, "cancellation rejected"));
        }
        Ok(())
    }

    async fn upload_files(
        &self,
        _assistant_id: &str,
        target: &str,
        parts: Vec<UploadPart>,
    ) -> Result<Vec<FileRef>, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_upload_target.lock().unwrap() = Some(target.to_string());

        if self.fail_upload {
            return Err(remote_error(422, "upload rejected"));
        }
        Ok(parts
            .into_iter()
            .enumerate()
            .map(|(index, part)| {
                FileRef::new(format!("file-{index}")).with_filename(part.filename)
            })
            .collect())
    }

    async fn list_threads(&self, _assistant_id: &str) -> Result<Vec<ThreadSummary>, ApiError> {
        Ok(Vec::new())
    }

    async fn thread_messages(
        &self,
        _assistant_id: &str,
        _thread_id: &str,
    ) -> Result<Vec<RemoteMessage>, ApiError> {
        if self.fail_history {
            return Err(remote_error(500, "history unavailable"));
        }
        Ok(self.history.lock().unwrap().clone())
    }

    async fn list_assistants(&self) -> Result<Vec<Assistant>, ApiError> {
        self.list_assistant_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.assistants.lock().unwrap().clone())
    }

    async fn create_assistant(&self, draft: &AssistantDraft) -> Result<Assistant, ApiError> {
        Ok(Assistant {
            id: "a-created".to_string(),
            name: draft.name.clone(),
            instructions: draft.instructions.clone(),
            model: draft.model.clone(),
            tool_config: Some(draft.tool_config.to_json()),
        })
    }

    async fn update_assistant(
        &self,
        assistant_id: &str,
        draft: &AssistantDraft,
    ) -> Result<Assistant, ApiError> {
        Ok(Assistant {
            id: assistant_id.to_string(),
            name: draft.name.clone(),
            instructions: draft.instructions.clone(),
            model: draft.model.clone(),
            tool_config: Some(draft.tool_config.to_json()),
        })
    }

    async fn delete_assistant(&self, _assistant_id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn list_files(&self, _assistant_id: &str) -> Result<Vec<StoredFile>, ApiError> {
        Ok(Vec::new())
    }

    async fn delete_file(&self, _assistant_id: &str, _file_id: &str) -> Result<(), ApiError> {
        Ok(())
    }
}
