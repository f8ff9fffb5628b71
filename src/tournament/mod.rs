//! Tournament settlement: pooled entries and prize distribution.
//!
//! A group of participants, one primary bidder plus optional backers,
//! jointly funds an entry by splitting the announced deposit evenly. On
//! settlement, each winning entry's prize is split evenly between the
//! winner and its backers. Every operation runs inside a single
//! transaction that spans the tournament record and every participant
//! balance it touches.
//!
//! ## Example
//!
//! ```
//! use stakepool::{MemoryStore, PlayerEntry, TournamentEntry};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//!
//! let primary = PlayerEntry::create_or_find("primary", store.clone())?;
//! let backer = PlayerEntry::create_or_find("backer", store.clone())?;
//! primary.fund(500.0)?;
//! backer.fund(500.0)?;
//!
//! let tournament = TournamentEntry::create_or_find(1, store.clone())?;
//! tournament.announce(1000.0)?;
//! tournament.join(&[primary.id(), backer.id()])?;
//!
//! let winners = HashMap::from([(primary.id(), 3000.0)]);
//! tournament.result(&winners)?;
//!
//! assert_eq!(primary.balance()?, 1500.0);
//! assert_eq!(backer.balance()?, 1500.0);
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod errors;
pub mod models;

pub use entry::TournamentEntry;
pub use errors::{TournamentError, TournamentResult};
pub use models::{Bidder, Tournament, TournamentId};
