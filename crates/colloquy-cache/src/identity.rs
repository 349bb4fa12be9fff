use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use tracing::warn;

/// Claim names that may carry the user identity, in lookup order.
/// The first one present wins.
const IDENTITY_CLAIMS: &[&str] = &["user_id", "sub", "id", "userId"];

/// A validated session: the raw bearer credential together with the identity
/// extracted from it.
///
/// Cache operations take this explicitly instead of reading a "current user"
/// from ambient state, so two identities on one device can never alias. A
/// credential from which no identity can be extracted yields no context at
/// all; there is no unscoped fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: String,
    user_id: String,
}

impl SessionContext {
    /// Build a context from a bearer credential. Returns `None` when the
    /// credential is malformed or carries no recognizable identity claim.
    pub fn from_token(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let user_id = user_id_from_token(&token)?;
        Some(Self { token, user_id })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Extract the user identity from a JWT-shaped credential.
///
/// Fails closed: wrong segment count, undecodable payload, or a payload
/// without any candidate claim all return `None`, never panic.
pub fn user_id_from_token(token: &str) -> Option<String> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        warn!(segments = segments.len(), "credential is not a three-segment token");
        return None;
    }

    let payload = decode_segment(segments[1])?;
    let claims: Value = match serde_json::from_slice(&payload) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "credential payload is not valid JSON");
            return None;
        }
    };

    for claim in IDENTITY_CLAIMS {
        if let Some(id) = claims.get(claim).and_then(claim_as_string) {
            return Some(id);
        }
    }
    warn!("credential payload carries no identity claim");
    None
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    // Tokens in the wild carry both padded and unpadded base64url payloads
    let trimmed = segment.trim_end_matches('=');
    match URL_SAFE_NO_PAD.decode(trimmed) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!(error = %err, "credential payload is not decodable");
            None
        }
    }
}

fn claim_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
