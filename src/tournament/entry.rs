//! Pooled-entry and prize-distribution logic.

use super::errors::{TournamentError, TournamentResult};
use super::models::{Bidder, Tournament, TournamentId};
use crate::player::{PlayerId, adjust_balance};
use crate::points::{self, Points};
use crate::store::{Controller, StoreError, abort};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Handle over one tournament's persisted record.
///
/// State machine: announced-pending (deposit 0, no bidders) → announced
/// (deposit set) → open (≥ 1 bidder) → finished. Each operation re-reads
/// the record inside its own transaction, so the cached copy is advisory
/// and refreshed only after a successful commit.
pub struct TournamentEntry {
    ctrl: Arc<dyn Controller>,
    record: RwLock<Tournament>,
}

impl TournamentEntry {
    /// Opens the tournament with `id`, creating an empty record when none
    /// exists yet.
    pub fn create_or_find(id: TournamentId, ctrl: Arc<dyn Controller>) -> TournamentResult<Self> {
        let tx = ctrl.begin_transaction()?;

        let tournament = match ctrl.find_tournament(id, Some(tx.as_ref())) {
            Ok(tournament) => tournament,
            Err(StoreError::NotFound) => {
                if let Err(err) = ctrl.create_tournament(id, Some(tx.as_ref())) {
                    abort(tx);
                    return Err(err.into());
                }
                Tournament::new(id)
            }
            Err(err) => {
                abort(tx);
                return Err(err.into());
            }
        };

        tx.commit()?;

        Ok(Self {
            ctrl,
            record: RwLock::new(tournament),
        })
    }

    /// Opens the tournament with `id`, failing when the record does not
    /// exist.
    pub fn find(id: TournamentId, ctrl: Arc<dyn Controller>) -> TournamentResult<Self> {
        let tx = ctrl.begin_transaction()?;

        let tournament = match ctrl.find_tournament(id, Some(tx.as_ref())) {
            Ok(tournament) => tournament,
            Err(err) => {
                abort(tx);
                return Err(err.into());
            }
        };

        tx.commit()?;

        Ok(Self {
            ctrl,
            record: RwLock::new(tournament),
        })
    }

    /// Sets the per-entry deposit. Allowed only while no one has joined and
    /// the tournament is not finished. The deposit is truncated to two
    /// decimals before it is stored.
    pub fn announce(&self, deposit: Points) -> TournamentResult<()> {
        let tx = self.ctrl.begin_transaction()?;

        let mut tournament = match self.ctrl.find_tournament(self.id(), Some(tx.as_ref())) {
            Ok(tournament) => tournament,
            Err(err) => {
                abort(tx);
                return Err(err.into());
            }
        };

        if tournament.finished {
            abort(tx);
            return Err(TournamentError::AlreadyFinished);
        }
        if !tournament.bidders.is_empty() {
            abort(tx);
            return Err(TournamentError::PlayersAlreadyJoined);
        }

        tournament.deposit = points::truncate_price(deposit);
        if let Err(err) = self.ctrl.save_tournament(&tournament, Some(tx.as_ref())) {
            abort(tx);
            return Err(err.into());
        }

        tx.commit()?;

        self.record
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .deposit = tournament.deposit;
        info!(
            "tournament {}: announced with deposit {}",
            tournament.id, tournament.deposit
        );

        Ok(())
    }

    /// Joins one entry: the first participant becomes the primary bidder,
    /// the rest become its backers. The announced deposit is split evenly
    /// across all participants and taken from each balance inside a single
    /// transaction, so a failed debit anywhere unwinds every earlier debit
    /// in the same call.
    pub fn join(&self, participants: &[PlayerId]) -> TournamentResult<()> {
        if participants.is_empty() {
            return Ok(());
        }

        let tx = self.ctrl.begin_transaction()?;

        let mut tournament = match self.ctrl.find_tournament(self.id(), Some(tx.as_ref())) {
            Ok(tournament) => tournament,
            Err(err) => {
                abort(tx);
                return Err(err.into());
            }
        };

        if tournament.finished {
            abort(tx);
            return Err(TournamentError::AlreadyFinished);
        }

        // Even split, no remainder handling: fractional cents from the
        // division are carried as-is into each debit, which truncates and
        // rounds independently.
        let contribute = tournament.deposit / participants.len() as Points;

        let mut bidder = Bidder::default();
        for (idx, id) in participants.iter().enumerate() {
            if let Err(err) = adjust_balance(self.ctrl.as_ref(), tx.as_ref(), id, -contribute) {
                abort(tx);
                return Err(err.into());
            }
            if idx == 0 {
                if tournament.bidders.iter().any(|member| member.id == *id) {
                    abort(tx);
                    return Err(TournamentError::CouldNotJoinTwice);
                }
                bidder.id = id.clone();
            } else {
                bidder.backers.push(id.clone());
            }
        }
        tournament.bidders.push(bidder);

        if let Err(err) = self.ctrl.save_tournament(&tournament, Some(tx.as_ref())) {
            abort(tx);
            return Err(err.into());
        }

        tx.commit()?;

        debug!(
            "tournament {}: joined {} participant(s), contribution {}",
            tournament.id,
            participants.len(),
            contribute
        );
        self.record
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .bidders = tournament.bidders;

        Ok(())
    }

    /// Settles the tournament. Every winner key must match a bidder's
    /// primary id; each matched prize is split evenly between the winner
    /// and its backers and credited inside the same transaction. On success
    /// the finished flag latches and no further mutation succeeds.
    pub fn result(&self, winners: &HashMap<PlayerId, Points>) -> TournamentResult<()> {
        let tx = self.ctrl.begin_transaction()?;

        let mut tournament = match self.ctrl.find_tournament(self.id(), Some(tx.as_ref())) {
            Ok(tournament) => tournament,
            Err(err) => {
                abort(tx);
                return Err(err.into());
            }
        };

        if tournament.finished {
            abort(tx);
            return Err(TournamentError::AlreadyFinished);
        }

        let mut unmatched: HashMap<&PlayerId, Points> =
            winners.iter().map(|(id, prize)| (id, *prize)).collect();

        for member in &mut tournament.bidders {
            let Some(prize) = unmatched.remove(&member.id) else {
                continue;
            };
            member.winner = true;
            member.prize = prize;

            // Even split across the winner and its backers, remainder
            // absorbed by the ledger write rounding.
            let share = prize / (member.backers.len() + 1) as Points;

            if let Err(err) = adjust_balance(self.ctrl.as_ref(), tx.as_ref(), &member.id, share) {
                abort(tx);
                return Err(err.into());
            }
            for backer in &member.backers {
                if let Err(err) = adjust_balance(self.ctrl.as_ref(), tx.as_ref(), backer, share) {
                    abort(tx);
                    return Err(err.into());
                }
            }
        }

        if !unmatched.is_empty() {
            abort(tx);
            return Err(TournamentError::WinnerIsNotMember);
        }

        tournament.finished = true;
        if let Err(err) = self.ctrl.save_tournament(&tournament, Some(tx.as_ref())) {
            abort(tx);
            return Err(err.into());
        }

        tx.commit()?;

        info!(
            "tournament {}: settled, {} winner(s)",
            tournament.id,
            winners.len()
        );
        let mut record = self.record.write().unwrap_or_else(PoisonError::into_inner);
        record.finished = true;
        record.bidders = tournament.bidders;

        Ok(())
    }

    /// Returns the tournament's identity. Never fails.
    pub fn id(&self) -> TournamentId {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .id
    }

    /// Cached deposit as of the last successful commit.
    pub fn deposit(&self) -> Points {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .deposit
    }

    /// Cached finished flag as of the last successful commit.
    pub fn is_finished(&self) -> bool {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .finished
    }

    /// Cached bidder list as of the last successful commit.
    pub fn bidders(&self) -> Vec<Bidder> {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .bidders
            .clone()
    }
}
