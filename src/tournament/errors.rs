//! Tournament settlement error types.

use crate::player::PlayerError;
use crate::store::StoreError;
use thiserror::Error;

/// Tournament settlement errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// Mutation attempted on a settled tournament
    #[error("Tournament already finished")]
    AlreadyFinished,

    /// Re-announce attempted after players joined
    #[error("Could not re-announce the tournament, players already joined")]
    PlayersAlreadyJoined,

    /// The same primary player tried to join twice
    #[error("Could not join twice to the same tournament")]
    CouldNotJoinTwice,

    /// Settlement named a player who holds no primary slot
    #[error("Winner is not a tournament member")]
    WinnerIsNotMember,

    /// Failure surfaced unchanged from the player ledger
    #[error(transparent)]
    Player(#[from] PlayerError),

    /// Failure surfaced unchanged from the persistence contract
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
