use anyhow::{Context, Result};
use colloquy::prelude::*;
use colloquy::session::{reveal, DEFAULT_CHARS_PER_TICK, DEFAULT_TICK};
use std::io::Write;
use std::sync::Arc;

/// Send one message to an assistant and print the reply with the typewriter
/// effect.
///
/// Required environment:
///   COLLOQUY_TOKEN        bearer credential
///   COLLOQUY_ASSISTANT    assistant id to talk to
///   COLLOQUY_API_URL      backend base URL (optional)
#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let token = std::env::var("COLLOQUY_TOKEN").context("COLLOQUY_TOKEN required")?;
    let assistant_id =
        std::env::var("COLLOQUY_ASSISTANT").context("COLLOQUY_ASSISTANT required")?;
    let message = std::env::args().nth(1).unwrap_or_else(|| "Hello!".to_string());

    // Cache keyed by the credential's identity, persisted next to the binary
    let cache = UserCache::new(JsonFileStore::open("colloquy-cache.json")?);
    cache.store_credential(&token)?;
    anyhow::ensure!(cache.has_valid_session(), "credential carries no identity");

    let backend = Arc::new(HttpBackend::new(
        RemoteConfig::from_env(),
        Arc::new(CacheCredentials(cache.clone())),
    )?);

    let mut session = ConversationSession::new(backend, assistant_id);
    println!("> {message}");

    match session.send(message, Vec::new()).await? {
        RunOutcome::Completed { text } => {
            reveal(&text, DEFAULT_CHARS_PER_TICK, DEFAULT_TICK, |prefix| {
                print!("\r{prefix}");
                let _ = std::io::stdout().flush();
            })
            .await;
            println!();
        }
        other => {
            let message = other
                .failure_message()
                .unwrap_or_else(|| "run ended unexpectedly".to_string());
            eprintln!("run did not complete: {message}");
        }
    }

    if let Some(thread_id) = session.thread_id() {
        println!("(thread {thread_id})");
    }
    Ok(())
}
