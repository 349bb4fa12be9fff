use anyhow::{Context, Result};
use chrono::Utc;
use colloquy::prelude::*;
use std::sync::Arc;

/// Hydrate the assistant list (cache-first) and show each assistant's recent
/// conversations.
///
/// Required environment:
///   COLLOQUY_TOKEN        bearer credential
///   COLLOQUY_API_URL      backend base URL (optional)
#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let token = std::env::var("COLLOQUY_TOKEN").context("COLLOQUY_TOKEN required")?;

    let cache = UserCache::new(JsonFileStore::open("colloquy-cache.json")?);
    cache.store_credential(&token)?;
    let session = cache
        .current_session()
        .context("credential carries no identity")?;

    let backend = Arc::new(HttpBackend::new(
        RemoteConfig::from_env(),
        Arc::new(CacheCredentials(cache.clone())),
    )?);

    let directory = AssistantDirectory::new(cache, backend.clone());
    let assistants = directory.hydrate(&session).await?;
    println!("{} assistant(s) for user {}", assistants.len(), session.user_id());

    let now = Utc::now();
    for assistant in assistants {
        println!("\n{} ({})", assistant.name, assistant.id);
        let threads = backend.list_threads(&assistant.id).await?;
        if threads.is_empty() {
            println!("  no recent conversations");
            continue;
        }
        for thread in threads.iter().take(5) {
            println!(
                "  {} | {} | {} run(s)",
                thread.title(),
                thread.age_label(now),
                thread.run_count
            );
        }
    }
    Ok(())
}
