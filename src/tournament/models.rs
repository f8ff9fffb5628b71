//! Tournament data models.

use crate::player::PlayerId;
use crate::points::Points;
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = u64;

/// One joined entry: a primary player plus the backers who co-funded it.
///
/// The prize stays zero until settlement. Backers are accepted as given and
/// are not deduplicated; the same player may back several entries or hold a
/// primary slot elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bidder {
    pub id: PlayerId,
    pub winner: bool,
    pub prize: Points,
    pub backers: Vec<PlayerId>,
}

/// Tournament record as persisted by a store.
///
/// The deposit may only change while the bidder list is empty; the bidder
/// list is append-only until settlement; `finished` is a one-way latch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub deposit: Points,
    pub finished: bool,
    pub bidders: Vec<Bidder>,
}

impl Tournament {
    /// Create an unannounced record with no bidders.
    pub fn new(id: TournamentId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}
