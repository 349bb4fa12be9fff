//! # Colloquy - Assistant Conversation Client for Rust
//!
//! Colloquy drives multi-turn conversations against a remote assistant
//! execution service:
//! - **Run orchestration** (submit a message, poll the run to a terminal
//!   state, render the answer incrementally)
//! - **Attachment upload** (batched multipart upload, referenced by id)
//! - **Per-user cache** (assistant metadata scoped by credential identity,
//!   safe across multiple accounts on one device)
//! - **Async/await** (built on Tokio; polling is tick-driven, never busy)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colloquy::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = UserCache::new(JsonFileStore::open("colloquy-cache.json")?);
//!     cache.store_credential(&std::env::var("COLLOQUY_TOKEN")?)?;
//!
//!     let backend = Arc::new(HttpBackend::new(
//!         RemoteConfig::from_env(),
//!         Arc::new(CacheCredentials(cache.clone())),
//!     )?);
//!
//!     let mut session = ConversationSession::new(backend, "assistant-id");
//!     let outcome = session.send("Hello!", Vec::new()).await?;
//!     if let RunOutcome::Completed { text } = outcome {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Colloquy consists of several composable crates:
//!
//! - **colloquy-types**: Core data model (messages, runs, assistants, files)
//! - **colloquy-cache**: Per-user scoped local cache with identity isolation
//! - **colloquy-client**: HTTP backend client behind the `AssistantBackend` seam
//! - **colloquy-session**: The run submission & polling engine, history
//!   loading and the typewriter renderer

// Re-export all public APIs
pub use colloquy_cache as cache;
pub use colloquy_client as client;
pub use colloquy_session as session;
pub use colloquy_types as types;

// Re-export commonly used types
pub use colloquy_cache::{JsonFileStore, MemoryStore, SessionContext, UserCache};
pub use colloquy_client::{AssistantBackend, HttpBackend, RemoteConfig};
pub use colloquy_session::{
    AssistantDirectory, CacheCredentials, ConversationSession, RunOutcome, Typewriter,
};
pub use colloquy_types::{Assistant, ChatMessage, Role, RunStatus};

/// Convenient prelude with commonly used types
pub mod prelude {
    pub use crate::cache::{JsonFileStore, MemoryStore, SessionContext, UserCache};
    pub use crate::client::{AssistantBackend, HttpBackend, RemoteConfig, StaticToken};
    pub use crate::session::{
        AssistantDirectory, CacheCredentials, ConversationSession, PollConfig, RunOutcome,
        SessionState, Typewriter,
    };
    pub use crate::types::{Assistant, AssistantDraft, ChatMessage, Plan, Role, UploadPart};
    pub use anyhow::Result;
}
