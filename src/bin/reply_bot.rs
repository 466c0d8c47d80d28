//! Monitor the configured accounts and reply to at most one fresh,
//! high-engagement tweet per run.

use dugout_core::{BotConfig, CoreError, ErrorExt};
use llm_client::OpenRouterClient;
use reply_engine::{ReplyEngine, ReplyState, RunOutcome};
use std::time::Duration;
use x_client::XApiClient;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reply_engine=debug".to_string()),
        )
        .init();

    let config = BotConfig::from_env().map_err(|e| {
        e.log_error();
        e
    })?;

    jitter_sleep(config.jitter_max_secs).await;

    let social = XApiClient::new(config.x_access_token.clone())?;
    let generator =
        OpenRouterClient::new(config.openrouter_api_key.clone(), config.llm_model.clone())?;
    let mut state = ReplyState::load(&config.state_file);
    tracing::debug!("Loaded {} previously handled ids", state.len());

    let engine = ReplyEngine::new(&config, &social, &generator);
    match engine.run_once(&mut state).await.map_err(|e| {
        e.log_error();
        e
    })? {
        RunOutcome::Replied {
            target_id,
            author,
            reply_text,
            reply_id,
        } => match reply_id {
            Some(id) => {
                tracing::info!("Replied to @{} ({}) -> {}: {}", author, target_id, id, reply_text)
            }
            None => tracing::info!(
                "[dry-run] Reply to @{} ({}) simulated: {}",
                author,
                target_id,
                reply_text
            ),
        },
        RunOutcome::NoCandidate => {
            tracing::info!("No suitable high-traffic tweet found this run");
        }
    }

    Ok(())
}

async fn jitter_sleep(max_secs: u64) {
    if max_secs == 0 {
        return;
    }
    let delay = fastrand::u64(0..=max_secs);
    tracing::debug!("Sleeping {}s before evaluating targets", delay);
    tokio::time::sleep(Duration::from_secs(delay)).await;
}
