pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;

pub use backend::AssistantBackend;
pub use config::RemoteConfig;
pub use credentials::{CredentialProvider, StaticToken};
pub use error::ApiError;
pub use http::HttpBackend;
