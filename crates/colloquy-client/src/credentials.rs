/// Supplies the bearer credential attached to every remote request.
///
/// Credential acquisition (login, refresh) is outside this crate; the
/// provider only hands back whatever is currently valid, or `None` when the
/// user is logged out.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed-token provider for tools and tests
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
