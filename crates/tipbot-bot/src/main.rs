//! Main entry point for Tip Ledger Bot.

use tipbot_bot::{BotResult, TipBot};
use tipbot_config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> BotResult<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tip Ledger Bot");

    let config = ConfigLoader::from_env().load().await?;
    config.validate()?;

    let bot = TipBot::new(config);

    if let Err(e) = bot.start().await {
        error!("Bot failed to start: {}", e);
        return Err(e);
    }

    Ok(())
}
