use colloquy_cache::{KeyValueStore, UserCache};
use colloquy_client::CredentialProvider;

/// Bridges the user-scoped cache's stored credential into the HTTP client:
/// requests carry whatever credential is currently persisted, and none after
/// logout clears it.
pub struct CacheCredentials<S: KeyValueStore>(pub UserCache<S>);

impl<S: KeyValueStore> CredentialProvider for CacheCredentials<S> {
    fn bearer_token(&self) -> Option<String> {
        self.0.stored_credential()
    }
}
