//! Persistence contract every conforming store must satisfy.
//!
//! The ledgers never talk to a concrete store type: they receive a
//! [`Controller`] at construction time and drive every mutation through a
//! transaction obtained from it. Any backend that implements these traits,
//! whether the in-memory [`MemoryStore`](super::MemoryStore) or a durable
//! store, can be injected interchangeably.

use crate::player::Player;
use crate::tournament::{Tournament, TournamentId};
use log::warn;
use thiserror::Error;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Create on a key that is already present
    #[error("Record already exists")]
    AlreadyExists,

    /// Find on an absent key
    #[error("Record not found")]
    NotFound,

    /// Backend-specific failure, surfaced verbatim
    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A scoped unit of work correlating reads and writes across player and
/// tournament records.
///
/// Exactly one of [`commit`](Transact::commit) or
/// [`rollback`](Transact::rollback) terminates the transaction; both consume
/// the handle, so it cannot be used afterwards.
pub trait Transact: Send {
    /// Confirms every change made since the transaction began.
    fn commit(self: Box<Self>) -> StoreResult<()>;

    /// Undoes every change made since the transaction began.
    fn rollback(self: Box<Self>) -> StoreResult<()>;
}

/// Record-level operations over players and tournaments.
///
/// Find and save calls accept an optional transaction for read/write
/// scoping; `None` is permitted for simple standalone reads that do not
/// participate in a broader mutation.
pub trait Controller: Send + Sync {
    /// Opens a new transaction bound to this store.
    fn begin_transaction(&self) -> StoreResult<Box<dyn Transact>>;

    /// Creates a zero-balance player record, failing with
    /// [`StoreError::AlreadyExists`] when the id is taken.
    fn create_player(&self, id: &str, tx: Option<&dyn Transact>) -> StoreResult<()>;

    /// Looks up a player record, failing with [`StoreError::NotFound`] when
    /// absent.
    fn find_player(&self, id: &str, tx: Option<&dyn Transact>) -> StoreResult<Player>;

    /// Overwrites the full player record keyed by its id.
    fn save_player(&self, player: &Player, tx: Option<&dyn Transact>) -> StoreResult<()>;

    /// Removes a player record. Management capability only; the ledgers
    /// never delete.
    fn delete_player(&self, id: &str, tx: Option<&dyn Transact>) -> StoreResult<()>;

    /// Creates an empty tournament record, failing with
    /// [`StoreError::AlreadyExists`] when the id is taken.
    fn create_tournament(&self, id: TournamentId, tx: Option<&dyn Transact>) -> StoreResult<()>;

    /// Looks up a tournament record, failing with [`StoreError::NotFound`]
    /// when absent.
    fn find_tournament(
        &self,
        id: TournamentId,
        tx: Option<&dyn Transact>,
    ) -> StoreResult<Tournament>;

    /// Overwrites the full tournament record keyed by its id.
    fn save_tournament(&self, tournament: &Tournament, tx: Option<&dyn Transact>)
    -> StoreResult<()>;

    /// Removes a tournament record. Management capability only.
    fn delete_tournament(&self, id: TournamentId, tx: Option<&dyn Transact>) -> StoreResult<()>;
}

/// Store lifecycle operations used by deployment and test wiring.
pub trait Store: Send + Sync {
    /// Reports whether the store can serve requests.
    fn ready(&self) -> bool;

    /// Reinitializes the store to an empty state.
    fn reset(&self) -> StoreResult<()>;

    /// Applies the store schema.
    fn migrate_up(&self) -> StoreResult<()>;

    /// Removes the store schema and data.
    fn migrate_down(&self) -> StoreResult<()>;
}

/// Rolls `tx` back, logging instead of failing when the rollback itself
/// errors, so the failure that triggered the abort stays the one the caller
/// sees.
pub(crate) fn abort(tx: Box<dyn Transact>) {
    if let Err(err) = tx.rollback() {
        warn!("transaction rollback failed: {err}");
    }
}
