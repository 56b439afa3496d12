//! # TipBot
//!
//! Discord bot for authoring, publishing, and settling sports-betting
//! tips with running profit/loss statistics.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;

pub use bot::TipBot;
pub use error::{BotError, BotResult};
