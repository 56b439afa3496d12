//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tipbot_common::{Result, TipBotError};

/// Main configuration structure for Tip Ledger Bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Data storage configuration.
    pub data: DataConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Guild to register slash commands in; registers globally when unset.
    pub guild_id: Option<u64>,
}

/// Data storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the JSON ledger file.
    pub ledger_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("tips_data.json"),
        }
    }
}

impl Config {
    /// Validates the configuration, rejecting values the bot cannot
    /// start with.
    pub fn validate(&self) -> Result<()> {
        if self.discord.token.is_empty() {
            return Err(TipBotError::Config(
                "Discord token is required".to_string(),
            ));
        }
        if self.data.ledger_path.as_os_str().is_empty() {
            return Err(TipBotError::Config(
                "Ledger file path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
