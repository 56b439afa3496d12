//! # TipBot Ledger
//!
//! The domain core of Tip Ledger Bot: tip and multi-tip data model, the
//! ledger document holding drafts, published tips, and running statistics,
//! and the file-backed store that serializes access to the ledger.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod ledger;
pub mod stats;
pub mod store;
pub mod tip;

pub use ledger::*;
pub use stats::*;
pub use store::*;
pub use tip::*;
