use std::sync::Arc;

use tracing::debug;

use colloquy_cache::{KeyValueStore, SessionContext, UserCache};
use colloquy_client::AssistantBackend;
use colloquy_types::{Assistant, AssistantDraft, Plan};

use crate::error::{EngineError, Result};

/// The user's assistants, kept consistent between the remote service and the
/// user-scoped cache: served from cache when present, fetched and cached
/// otherwise, and updated in the cache on every mutation.
pub struct AssistantDirectory<S: KeyValueStore, B: AssistantBackend + ?Sized> {
    cache: UserCache<S>,
    backend: Arc<B>,
}

impl<S: KeyValueStore, B: AssistantBackend + ?Sized> AssistantDirectory<S, B> {
    pub fn new(cache: UserCache<S>, backend: Arc<B>) -> Self {
        Self { cache, backend }
    }

    pub fn cache(&self) -> &UserCache<S> {
        &self.cache
    }

    /// Cache-first load: run the one-time legacy migration, serve the cached
    /// list when present, otherwise fetch and cache it.
    pub async fn hydrate(&self, session: &SessionContext) -> Result<Vec<Assistant>> {
        self.cache.migrate_legacy_entries(session);
        if let Some(cached) = self.cache.cached_assistants(session) {
            debug!(count = cached.len(), "assistant list served from cache");
            return Ok(cached);
        }
        self.refresh(session).await
    }

    /// Fetch from the service unconditionally and replace the cached list
    pub async fn refresh(&self, session: &SessionContext) -> Result<Vec<Assistant>> {
        let fetched = self.backend.list_assistants().await?;
        self.cache.store_assistants(session, &fetched);
        Ok(fetched)
    }

    /// Create an assistant, gated client-side by the account plan's limit
    pub async fn create(
        &self,
        session: &SessionContext,
        plan: Plan,
        draft: &AssistantDraft,
    ) -> Result<Assistant> {
        let existing = self.hydrate(session).await?;
        let limit = plan.max_assistants();
        if existing.len() >= limit {
            return Err(EngineError::PlanLimit { plan, limit });
        }

        let created = self.backend.create_assistant(draft).await?;
        let mut list = existing;
        list.push(created.clone());
        self.cache.store_assistants(session, &list);
        Ok(created)
    }

    pub async fn update(
        &self,
        session: &SessionContext,
        assistant_id: &str,
        draft: &AssistantDraft,
    ) -> Result<Assistant> {
        let updated = self.backend.update_assistant(assistant_id, draft).await?;

        let mut list = self.cache.cached_assistants(session).unwrap_or_default();
        match list.iter_mut().find(|assistant| assistant.id == assistant_id) {
            Some(entry) => *entry = updated.clone(),
            None => list.push(updated.clone()),
        }
        self.cache.store_assistants(session, &list);
        Ok(updated)
    }

    pub async fn delete(&self, session: &SessionContext, assistant_id: &str) -> Result<()> {
        self.backend.delete_assistant(assistant_id).await?;

        let mut list = self.cache.cached_assistants(session).unwrap_or_default();
        list.retain(|assistant| assistant.id != assistant_id);
        self.cache.store_assistants(session, &list);
        Ok(())
    }
}
