//! Core bot logic using the Poise framework.

use crate::error::{BotError, BotResult};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tipbot_commands::{create_framework, Data};
use tipbot_config::Config;
use tipbot_ledger::LedgerStore;
use tracing::info;

/// Main bot structure.
pub struct TipBot {
    config: Arc<Config>,
}

impl TipBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Starts the bot.
    pub async fn start(&self) -> BotResult<()> {
        let config = self.config.clone();
        let ledger = Arc::new(LedgerStore::new(&config.data.ledger_path));
        info!(path = %ledger.path().display(), "using ledger file");

        let guild_id = config.discord.guild_id;
        let framework = create_framework()
            .setup(move |ctx, _ready, framework| {
                Box::pin(async move {
                    match guild_id {
                        Some(id) => {
                            info!(guild_id = id, "registering commands in guild");
                            poise::builtins::register_in_guild(
                                ctx,
                                &framework.options().commands,
                                serenity::GuildId::new(id),
                            )
                            .await?;
                        }
                        None => {
                            info!("registering commands globally");
                            poise::builtins::register_globally(
                                ctx,
                                &framework.options().commands,
                            )
                            .await?;
                        }
                    }
                    Ok(Data { config, ledger })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(
            &self.config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework)
        .await
        .map_err(|e| BotError::Framework(format!("{e:?}")))?;

        client
            .start()
            .await
            .map_err(|e| BotError::Framework(format!("{e:?}")))?;
        Ok(())
    }
}
