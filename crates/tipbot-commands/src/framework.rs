//! Poise framework setup and command registration logic.

use std::sync::Arc;
use tipbot_config::Config;
use tipbot_ledger::LedgerStore;

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// The shared ledger store.
    pub ledger: Arc<LedgerStore>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Creates a new Poise framework with the tip commands registered.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: vec![crate::tips::tips()],
        ..Default::default()
    })
}
