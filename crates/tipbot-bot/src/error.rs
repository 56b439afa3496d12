//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration or ledger error.
    #[error("TipBot error: {0}")]
    TipBot(#[from] tipbot_common::TipBotError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Poise framework error.
    #[error("Framework error: {0}")]
    Framework(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
