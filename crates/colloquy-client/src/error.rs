use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("remote service error ({status}): {detail}")]
    Status { status: u16, detail: String },

    /// The request never completed. Treated by callers identically to a
    /// non-success status.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered 2xx but the body did not carry what it should
    #[error("unexpected response shape: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Pull a human-readable detail out of an error body. The service is not
/// consistent about the field name; fall back to the raw body, then to the
/// bare status code.
pub(crate) fn error_detail(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "detail", "message"] {
            if let Some(text) = value.get(key).and_then(Value::as_str) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}
