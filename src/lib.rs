//! # Stakepool
//!
//! A points ledger and pooled-stake tournament settlement engine.
//!
//! Players hold point balances with two-decimal currency semantics. A
//! tournament is funded by pooled entries (one primary bidder plus any
//! number of backers splitting the announced deposit evenly) and settled
//! by splitting each winning entry's prize evenly between the winner and
//! its backers.
//!
//! Every mutation flows through an abstract persistence contract: the
//! operation opens a transaction, re-reads current state, validates,
//! writes and commits; any failure rolls the transaction back so partial
//! balance or tournament mutations never survive. Settlement operations
//! thread one open transaction through every nested balance adjustment,
//! making multi-player debits and credits all-or-nothing.
//!
//! ## Core Modules
//!
//! - [`points`]: the currency type and deterministic price rounding
//! - [`store`]: the persistence contract and the in-memory reference store
//!   with snapshot-based rollback
//! - [`player`]: per-player balance lifecycle (create-or-find, fund, take)
//! - [`tournament`]: pooled entries and prize distribution
//!
//! ## Example
//!
//! ```
//! use stakepool::{MemoryStore, PlayerEntry, TournamentEntry};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//!
//! let alice = PlayerEntry::create_or_find("alice", store.clone())?;
//! alice.fund(1000.0)?;
//!
//! let tournament = TournamentEntry::create_or_find(1, store.clone())?;
//! tournament.announce(300.0)?;
//! tournament.join(&[alice.id()])?;
//!
//! assert_eq!(alice.balance()?, 700.0);
//! # Ok(())
//! # }
//! ```

/// The currency type and price rounding utilities.
pub mod points;
pub use points::Points;

/// Persistence contract and the in-memory reference store.
pub mod store;
pub use store::{Controller, MemoryStore, Store, StoreError, StoreResult, Transact};

/// Player ledger.
pub mod player;
pub use player::{Player, PlayerEntry, PlayerError, PlayerId, PlayerResult};

/// Tournament settlement.
pub mod tournament;
pub use tournament::{
    Bidder, Tournament, TournamentEntry, TournamentError, TournamentId, TournamentResult,
};
