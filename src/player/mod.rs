//! Player ledger: balance lifecycle built on the persistence contract.
//!
//! A [`PlayerEntry`] is a handle over one player's persisted record. Every
//! mutation opens a transaction, re-reads the current record, validates,
//! writes and commits; any failure rolls the transaction back and the
//! mutation is visibly a no-op.

pub mod entry;
pub mod errors;
pub mod models;

pub use entry::{PlayerEntry, adjust_balance};
pub use errors::{PlayerError, PlayerResult};
pub use models::{Player, PlayerId};
