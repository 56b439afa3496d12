//! # TipBot Config
//!
//! Type-safe configuration for Tip Ledger Bot: TOML file loading with
//! environment-variable overrides and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
