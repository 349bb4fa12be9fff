use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use colloquy_types::{
    Assistant, AssistantDraft, FileRef, RemoteMessage, RunHandle, RunStatusReport, StoredFile,
    ThreadSummary, UploadPart,
};

use crate::backend::AssistantBackend;
use crate::config::RemoteConfig;
use crate::credentials::CredentialProvider;
use crate::error::{error_detail, ApiError, Result};

/// HTTP implementation of [`AssistantBackend`] against the remote service
pub struct HttpBackend {
    http: reqwest::Client,
    config: RemoteConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpBackend {
    pub fn new(config: RemoteConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: error_detail(status.as_u16(), &body),
            });
        }
        Ok(response.json().await?)
    }

    /// Like [`Self::execute`] for endpoints whose success body is empty or
    /// irrelevant.
    async fn execute_empty(&self, request: RequestBuilder) -> Result<()> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: error_detail(status.as_u16(), &body),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AssistantBackend for HttpBackend {
    async fn create_run(
        &self,
        assistant_id: &str,
        thread_id: Option<&str>,
        text: &str,
        file_ids: &[String],
    ) -> Result<RunHandle> {
        let mut body = json!({ "message": text });
        let payload = body.as_object_mut().unwrap();
        if let Some(thread_id) = thread_id {
            payload.insert("thread_id".to_string(), json!(thread_id));
        }
        if !file_ids.is_empty() {
            payload.insert("file_ids".to_string(), json!(file_ids));
        }

        let request = self
            .http
            .post(self.url(&format!("/assistants/{assistant_id}/runs")))
            .json(&body);
        self.execute(request).await
    }

    async fn run_status(
        &self,
        assistant_id: &str,
        run_id: &str,
        thread_id: Option<&str>,
    ) -> Result<RunStatusReport> {
        // Services expose run status under either addressing scheme. Prefer
        // the thread-qualified endpoint, fall back to the thread-agnostic
        // one on not-found.
        if let Some(thread_id) = thread_id {
            let qualified = self.url(&format!(
                "/assistants/{assistant_id}/threads/{thread_id}/runs/{run_id}"
            ));
            match self.execute(self.http.get(qualified)).await {
                Err(err) if err.is_not_found() => {
                    debug!(run_id, "thread-qualified status endpoint missing, falling back");
                }
                other => return other,
            }
        }

        let plain = self.url(&format!("/assistants/{assistant_id}/runs/{run_id}"));
        self.execute(self.http.get(plain)).await
    }

    async fn cancel_run(&self, assistant_id: &str, run_id: &str) -> Result<()> {
        let request = self
            .http
            .post(self.url(&format!("/assistants/{assistant_id}/runs/{run_id}/cancel")));
        self.execute_empty(request).await
    }

    async fn upload_files(
        &self,
        assistant_id: &str,
        target: &str,
        parts: Vec<UploadPart>,
    ) -> Result<Vec<FileRef>> {
        // Zero files is a no-op by contract, never a network call
        if parts.is_empty() {
            return Ok(Vec::new());
        }

        let mut form = Form::new().text("thread_id", target.to_string());
        for part in parts {
            form = form.part(
                "files",
                Part::bytes(part.bytes).file_name(part.filename),
            );
        }

        let request = self
            .http
            .post(self.url(&format!("/assistants/{assistant_id}/files")))
            .multipart(form);
        let envelope: FileListEnvelope = self.execute(request).await?;
        Ok(envelope.into_files())
    }

    async fn list_threads(&self, assistant_id: &str) -> Result<Vec<ThreadSummary>> {
        let request = self
            .http
            .get(self.url(&format!("/assistants/{assistant_id}/threads")));
        let envelope: ThreadListEnvelope = self.execute(request).await?;
        Ok(envelope.into_threads())
    }

    async fn thread_messages(
        &self,
        assistant_id: &str,
        thread_id: &str,
    ) -> Result<Vec<RemoteMessage>> {
        let request = self
            .http
            .get(self.url(&format!("/assistants/{assistant_id}/threads/{thread_id}")));
        let envelope: ConversationEnvelope = self.execute(request).await?;
        Ok(envelope.into_messages())
    }

    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        self.execute(self.http.get(self.url("/assistants"))).await
    }

    async fn create_assistant(&self, draft: &AssistantDraft) -> Result<Assistant> {
        let request = self.http.post(self.url("/assistants")).json(draft);
        self.execute(request).await
    }

    async fn update_assistant(
        &self,
        assistant_id: &str,
        draft: &AssistantDraft,
    ) -> Result<Assistant> {
        let request = self
            .http
            .put(self.url(&format!("/assistants/{assistant_id}")))
            .json(draft);
        self.execute(request).await
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&format!("/assistants/{assistant_id}")));
        self.execute_empty(request).await
    }

    async fn list_files(&self, assistant_id: &str) -> Result<Vec<StoredFile>> {
        self.execute(
            self.http
                .get(self.url(&format!("/assistants/{assistant_id}/files"))),
        )
        .await
    }

    async fn delete_file(&self, assistant_id: &str, file_id: &str) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&format!("/assistants/{assistant_id}/files/{file_id}")));
        self.execute_empty(request).await
    }
}

// ============================================================================
// WIRE ENVELOPES
//
// The service wraps list responses inconsistently; accept every shape it is
// known to produce.
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThreadListEnvelope {
    Wrapped {
        #[serde(default)]
        threads: Option<Vec<ThreadSummary>>,
        #[serde(default)]
        data: Option<Vec<ThreadSummary>>,
    },
    Bare(Vec<ThreadSummary>),
}

impl ThreadListEnvelope {
    fn into_threads(self) -> Vec<ThreadSummary> {
        match self {
            Self::Wrapped { threads, data } => threads.or(data).unwrap_or_default(),
            Self::Bare(threads) => threads,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConversationEnvelope {
    Wrapped {
        messages: Vec<RemoteMessage>,
    },
    Bare(Vec<RemoteMessage>),
}

impl ConversationEnvelope {
    fn into_messages(self) -> Vec<RemoteMessage> {
        match self {
            Self::Wrapped { messages } => messages,
            Self::Bare(messages) => messages,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileListEnvelope {
    Wrapped {
        files: Vec<FileRef>,
    },
    Bare(Vec<FileRef>),
}

impl FileListEnvelope {
    fn into_files(self) -> Vec<FileRef> {
        match self {
            Self::Wrapped { files } => files,
            Self::Bare(files) => files,
        }
    }
}
