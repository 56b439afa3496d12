//! Error types and utilities for Tip Ledger Bot.

use thiserror::Error;

/// Result type alias for TipBot operations.
pub type Result<T> = std::result::Result<T, TipBotError>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum TipBotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Discord API error.
    #[error("Discord API error: {0}")]
    Discord(String),

    /// A draft or published tip ID that does not exist or is the wrong
    /// kind. The message is shown to the caller verbatim, so variants of
    /// this error carry the exact user-facing text.
    #[error("{0}")]
    InvalidId(String),

    /// A settlement was attempted on a tip that already has a result.
    #[error("Tip has already been settled")]
    AlreadySettled,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TipBotError {
    /// Invalid-id error for an unknown draft tip.
    pub fn invalid_tip_id() -> Self {
        Self::InvalidId("Invalid tip ID".to_string())
    }

    /// Invalid-id error for an unknown or single-kind multi-tip draft.
    pub fn invalid_multi_tip_id() -> Self {
        Self::InvalidId("Invalid multi-tip ID".to_string())
    }

    /// Invalid-id error for an unknown published message.
    pub fn invalid_message_id() -> Self {
        Self::InvalidId("Invalid message ID".to_string())
    }

    /// Whether this error should be reported to the caller as-is rather
    /// than treated as an internal failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidId(_) | Self::AlreadySettled)
    }
}
