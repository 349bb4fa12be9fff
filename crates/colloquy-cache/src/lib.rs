pub mod cache;
pub mod error;
pub mod identity;
pub mod store;

pub use cache::{
    UserCache, ASSISTANTS_KEY, AUTH_METHOD_KEY, CREDENTIAL_KEY, LINKED_ACCOUNTS_KEY,
    PENDING_PROFILE_KEY, PROFILE_KEY,
};
pub use error::CacheError;
pub use identity::SessionContext;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
