//! # TipBot Commands
//!
//! Discord slash command implementations using the Poise framework for
//! Tip Ledger Bot: the `/tips` command family for authoring, publishing,
//! and settling betting tips, plus embed rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod framework;
pub mod render;
pub mod tips;

pub use framework::*;
