pub mod assistant;
pub mod attachment;
pub mod content;
pub mod message;
pub mod run;
pub mod thread;

pub use assistant::{Assistant, AssistantDraft, Plan, ToolConfig};
pub use attachment::{FileRef, StoredFile, UploadPart};
pub use content::{ContentPart, MessageContent, TextValue};
pub use message::{ChatMessage, RemoteMessage, Role};
pub use run::{RunHandle, RunStatus, RunStatusReport};
pub use thread::ThreadSummary;
