//! Generate one tweet in the house voice and post it.

use dugout_core::{BotConfig, CoreError, ErrorExt};
use llm_client::{style, voice, OpenRouterClient, TextGenerator};
use std::time::Duration;
use x_client::{SocialApi, XApiClient};

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,dugout=debug".to_string()),
        )
        .init();

    let config = BotConfig::from_env().map_err(|e| {
        e.log_error();
        e
    })?;

    // Jitter so scheduled runs feel human.
    jitter_sleep(config.post_jitter_max_secs).await;

    let generator =
        OpenRouterClient::new(config.openrouter_api_key.clone(), config.llm_model.clone())?;
    let raw = generator.complete(voice::post_request()).await?;
    let text = style::enforce_post_style(&raw);

    if config.dry_run {
        tracing::info!("[dry-run] Would post: {}", text);
        return Ok(());
    }

    let client = XApiClient::new(config.x_access_token.clone())?;
    let tweet_id = client.create_tweet(&text, None).await?;
    tracing::info!("Tweeted ({}): {}", tweet_id, text);

    Ok(())
}

async fn jitter_sleep(max_secs: u64) {
    if max_secs == 0 {
        return;
    }
    let delay = fastrand::u64(0..=max_secs);
    tracing::debug!("Sleeping {}s before posting", delay);
    tokio::time::sleep(Duration::from_secs(delay)).await;
}
