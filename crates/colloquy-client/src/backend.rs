use async_trait::async_trait;

use colloquy_types::{
    Assistant, AssistantDraft, FileRef, RemoteMessage, RunHandle, RunStatusReport, StoredFile,
    ThreadSummary, UploadPart,
};

use crate::error::Result;

/// The remote assistant execution service, abstracted.
///
/// The engine and session layers depend only on this trait; the HTTP
/// implementation lives in [`crate::http::HttpBackend`] and test doubles
/// script it in-process.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Submit a message against an assistant, creating a thread implicitly
    /// when `thread_id` is `None`. Returns the (possibly new) thread id and
    /// the run id to poll.
    async fn create_run(
        &self,
        assistant_id: &str,
        thread_id: Option<&str>,
        text: &str,
        file_ids: &[String],
    ) -> Result<RunHandle>;

    /// Query run status. Implementations may address the run through the
    /// thread when `thread_id` is known.
    async fn run_status(
        &self,
        assistant_id: &str,
        run_id: &str,
        thread_id: Option<&str>,
    ) -> Result<RunStatusReport>;

    /// Request run cancellation. Best-effort; the caller does not wait for
    /// the run to actually stop.
    async fn cancel_run(&self, assistant_id: &str, run_id: &str) -> Result<()>;

    /// Upload a batch of files for a thread (or a placeholder target when no
    /// thread exists yet). An empty batch must not reach the network.
    async fn upload_files(
        &self,
        assistant_id: &str,
        target: &str,
        parts: Vec<UploadPart>,
    ) -> Result<Vec<FileRef>>;

    async fn list_threads(&self, assistant_id: &str) -> Result<Vec<ThreadSummary>>;

    async fn thread_messages(
        &self,
        assistant_id: &str,
        thread_id: &str,
    ) -> Result<Vec<RemoteMessage>>;

    async fn list_assistants(&self) -> Result<Vec<Assistant>>;

    async fn create_assistant(&self, draft: &AssistantDraft) -> Result<Assistant>;

    async fn update_assistant(&self, assistant_id: &str, draft: &AssistantDraft)
        -> Result<Assistant>;

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()>;

    async fn list_files(&self, assistant_id: &str) -> Result<Vec<StoredFile>>;

    async fn delete_file(&self, assistant_id: &str, file_id: &str) -> Result<()>;
}
