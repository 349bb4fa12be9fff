use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use colloquy_types::Assistant;

use crate::error::Result;
use crate::identity::SessionContext;
use crate::store::KeyValueStore;

/// Where the bearer credential itself is stored. Not user-scoped: the
/// credential is what identity is derived from.
pub const CREDENTIAL_KEY: &str = "credential";

pub const ASSISTANTS_KEY: &str = "assistants";
pub const PROFILE_KEY: &str = "profile";
pub const LINKED_ACCOUNTS_KEY: &str = "linked_accounts";
pub const AUTH_METHOD_KEY: &str = "auth_method";
pub const PENDING_PROFILE_KEY: &str = "pending_profile";

/// The fixed set of logical keys that hold per-user data. Logout and
/// clear operations enumerate exactly this list.
const USER_KEYS: &[&str] = &[
    ASSISTANTS_KEY,
    PROFILE_KEY,
    LINKED_ACCOUNTS_KEY,
    AUTH_METHOD_KEY,
    PENDING_PROFILE_KEY,
];

/// Keys that existed before per-user scoping and are eligible for one-time
/// migration into a scoped namespace.
const MIGRATED_KEYS: &[&str] = &[ASSISTANTS_KEY, PROFILE_KEY];

/// Per-user scoped cache over an arbitrary [`KeyValueStore`].
///
/// Every value-bearing operation takes a [`SessionContext`]; the scoped key
/// is a pure function of (logical key, identity), so entries written under
/// one identity are unreachable from any other. Read failures are recovered
/// to the caller's default and never propagated.
#[derive(Debug, Clone)]
pub struct UserCache<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> UserCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deterministic scoped key for a logical key under one identity
    pub fn scoped_key(session: &SessionContext, key: &str) -> String {
        format!("{key}.user.{}", session.user_id())
    }

    /// Serialize and store a value under the session's scope
    pub fn write<T: Serialize>(&self, session: &SessionContext, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(&Self::scoped_key(session, key), raw)
    }

    /// Read a value from the session's scope. Absent or unparsable entries
    /// yield `default`; this never fails.
    pub fn read<T: DeserializeOwned>(&self, session: &SessionContext, key: &str, default: T) -> T {
        self.read_opt(session, key).unwrap_or(default)
    }

    /// Read a value, distinguishing absence (and corrupt data) as `None`
    pub fn read_opt<T: DeserializeOwned>(&self, session: &SessionContext, key: &str) -> Option<T> {
        let raw = self.store.get(&Self::scoped_key(session, key))?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "cached value is unparsable, falling back to default");
                None
            }
        }
    }

    /// Remove a value from the session's scope. Storage failures are logged,
    /// not propagated.
    pub fn remove(&self, session: &SessionContext, key: &str) {
        self.remove_raw(&Self::scoped_key(session, key));
    }

    /// Remove the enumerated per-user keys, both scoped and any leftover
    /// unscoped legacy twins. Safe no-op without a session.
    pub fn clear_for_user(&self, session: Option<&SessionContext>) {
        let Some(session) = session else {
            debug!("no session, skipping user cache clear");
            return;
        };
        for key in USER_KEYS {
            self.remove_raw(&Self::scoped_key(session, key));
            self.remove_raw(key);
        }
    }

    /// Logout path: drop the stored credential, then every per-user key for
    /// the identity it carried. Idempotent: a second call finds nothing.
    pub fn clear_all(&self) {
        let session = self.current_session();
        self.remove_raw(CREDENTIAL_KEY);
        self.clear_for_user(session.as_ref());
    }

    /// One-time upgrade moving pre-scoping unscoped entries into the
    /// session's namespace. A scoped entry always wins over a legacy one;
    /// the legacy key is removed either way.
    pub fn migrate_legacy_entries(&self, session: &SessionContext) {
        for key in MIGRATED_KEYS {
            let Some(legacy) = self.store.get(key) else {
                continue;
            };
            let scoped = Self::scoped_key(session, key);
            if self.store.get(&scoped).is_none() {
                if let Err(err) = self.store.set(&scoped, legacy) {
                    warn!(key, error = %err, "legacy cache migration failed");
                    continue;
                }
                debug!(key, "migrated legacy cache entry");
            }
            self.remove_raw(key);
        }
    }

    /// Persist the bearer credential
    pub fn store_credential(&self, token: &str) -> Result<()> {
        self.store.set(CREDENTIAL_KEY, token.to_string())
    }

    pub fn stored_credential(&self) -> Option<String> {
        self.store.get(CREDENTIAL_KEY)
    }

    /// Rebuild the session from the stored credential, if any identity can
    /// be extracted from it.
    pub fn current_session(&self) -> Option<SessionContext> {
        SessionContext::from_token(self.stored_credential()?)
    }

    /// True iff a credential is stored and an identity is extractable from
    /// it. Side-effect-free; gate cache reads on this to avoid serving one
    /// user another's (or a logged-out) state.
    pub fn has_valid_session(&self) -> bool {
        self.current_session().is_some()
    }

    pub fn cached_assistants(&self, session: &SessionContext) -> Option<Vec<Assistant>> {
        self.read_opt(session, ASSISTANTS_KEY)
    }

    pub fn store_assistants(&self, session: &SessionContext, assistants: &[Assistant]) {
        if let Err(err) = self.write(session, ASSISTANTS_KEY, &assistants) {
            warn!(error = %err, "failed to cache assistant list");
        }
    }

    pub fn clear_assistants(&self, session: &SessionContext) {
        self.remove(session, ASSISTANTS_KEY);
    }

    fn remove_raw(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            warn!(key, error = %err, "failed to remove cache entry");
        }
    }
}
