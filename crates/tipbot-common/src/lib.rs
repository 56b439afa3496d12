//! # TipBot Common
//!
//! Shared types, identifiers, and the application error type for
//! Tip Ledger Bot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
