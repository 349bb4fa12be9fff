use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned reference to an uploaded file. Runs reference files by
/// this id, never by local path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub file_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl FileRef {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// A locally selected file awaiting upload. The correlation id ties the
/// selection to the upload batch until the server assigns a [`FileRef`].
#[derive(Debug, Clone)]
pub struct UploadPart {
    pub correlation_id: Uuid,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadPart {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            filename: filename.into(),
            bytes,
        }
    }
}

/// Knowledge-base listing entry for files already attached to an assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    #[serde(alias = "fileId")]
    pub file_id: String,
    pub filename: String,
}
