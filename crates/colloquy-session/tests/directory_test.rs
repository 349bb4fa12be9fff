mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use colloquy_cache::{MemoryStore, SessionContext, UserCache};
use colloquy_session::{AssistantDirectory, EngineError};
use colloquy_types::{AssistantDraft, Plan};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use support::{assistant, MockBackend};

fn session_for(user_id: &str) -> SessionContext {
    let payload = format!(r#"{{"sub":"{user_id}"}}"#);
    let token = format!(
        "header.{}.signature",
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    );
    SessionContext::from_token(token).expect("valid test token")
}

fn directory(
    backend: Arc<MockBackend>,
) -> AssistantDirectory<MemoryStore, MockBackend> {
    AssistantDirectory::new(UserCache::new(MemoryStore::new()), backend)
}

#[tokio::test]
async fn hydrate_fetches_once_then_serves_from_cache() {
    let backend = Arc::new(MockBackend::new().with_assistants(vec![assistant("a-1", "Bot")]));
    let directory = directory(backend.clone());
    let session = session_for("42");

    let first = directory.hydrate(&session).await.unwrap();
    let second = directory.hydrate(&session).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(backend.list_assistant_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hydrated_lists_are_isolated_per_identity() {
    let backend = Arc::new(MockBackend::new().with_assistants(vec![assistant("a-1", "Bot")]));
    let directory = directory(backend.clone());

    directory.hydrate(&session_for("alice")).await.unwrap();
    directory.hydrate(&session_for("bob")).await.unwrap();

    // Bob's hydrate could not see Alice's cache entry, so both fetched
    assert_eq!(backend.list_assistant_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn create_is_gated_by_the_plan_limit() {
    let backend = Arc::new(MockBackend::new().with_assistants(vec![assistant("a-1", "Bot")]));
    let directory = directory(backend);
    let session = session_for("42");

    let result = directory
        .create(&session, Plan::Free, &AssistantDraft::new("Second"))
        .await;

    assert!(matches!(
        result,
        Err(EngineError::PlanLimit {
            plan: Plan::Free,
            limit: 1
        })
    ));
}

#[tokio::test]
async fn create_within_the_limit_updates_the_cache() {
    let backend = Arc::new(MockBackend::new().with_assistants(vec![assistant("a-1", "Bot")]));
    let directory = directory(backend.clone());
    let session = session_for("42");

    let created = directory
        .create(&session, Plan::Starter, &AssistantDraft::new("Second"))
        .await
        .unwrap();
    assert_eq!(created.name, "Second");

    // Served from cache, including the new entry, with no extra fetch
    let list = directory.hydrate(&session).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(backend.list_assistant_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn update_replaces_the_cached_entry() {
    let backend = Arc::new(MockBackend::new().with_assistants(vec![assistant("a-1", "Bot")]));
    let directory = directory(backend);
    let session = session_for("42");

    directory.hydrate(&session).await.unwrap();
    let updated = directory
        .update(&session, "a-1", &AssistantDraft::new("Renamed"))
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");

    let list = directory.hydrate(&session).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Renamed");
}

#[tokio::test]
async fn delete_removes_the_cached_entry() {
    let backend = Arc::new(MockBackend::new().with_assistants(vec![assistant("a-1", "Bot")]));
    let directory = directory(backend);
    let session = session_for("42");

    directory.hydrate(&session).await.unwrap();
    directory.delete(&session, "a-1").await.unwrap();

    let list = directory.hydrate(&session).await.unwrap();
    assert!(list.is_empty());
}
