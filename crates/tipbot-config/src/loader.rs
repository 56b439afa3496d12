//! Configuration loading: optional TOML file plus environment overrides.

use crate::schema::Config;
use std::env;
use std::path::PathBuf;
use tipbot_common::{Result, TipBotError};
use tracing::{debug, info};

/// Environment variable naming the config file path.
pub const CONFIG_PATH_VAR: &str = "TIPBOT_CONFIG";
/// Environment variable overriding the Discord token.
pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
/// Environment variable overriding the ledger file path.
pub const LEDGER_PATH_VAR: &str = "TIPBOT_LEDGER_PATH";
/// Environment variable overriding the registration guild.
pub const GUILD_ID_VAR: &str = "TIPBOT_GUILD_ID";

/// Configuration loader.
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader reading from the given TOML file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Creates a loader taking the config file path from `TIPBOT_CONFIG`,
    /// falling back to defaults plus environment overrides when unset.
    pub fn from_env() -> Self {
        Self {
            path: env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from),
        }
    }

    /// Loads the configuration: file first (when configured), then
    /// environment overrides on top.
    pub async fn load(&self) -> Result<Config> {
        let mut config = match &self.path {
            Some(path) => {
                info!(path = %path.display(), "loading configuration file");
                let raw = tokio::fs::read_to_string(path).await?;
                toml::from_str(&raw).map_err(|e| TipBotError::Config(e.to_string()))?
            }
            None => {
                debug!("no configuration file set, using defaults");
                Config::default()
            }
        };

        apply_env_overrides(&mut config)?;
        Ok(config)
    }
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(token) = env::var(TOKEN_VAR) {
        config.discord.token = token;
    }
    if let Ok(path) = env::var(LEDGER_PATH_VAR) {
        config.data.ledger_path = PathBuf::from(path);
    }
    if let Ok(guild) = env::var(GUILD_ID_VAR) {
        let id = guild
            .parse::<u64>()
            .map_err(|_| TipBotError::Config(format!("invalid {GUILD_ID_VAR}: {guild}")))?;
        config.discord.guild_id = Some(id);
    }
    Ok(())
}
