//! Player balance lifecycle over the persistence contract.

use super::errors::{PlayerError, PlayerResult};
use super::models::{Player, PlayerId};
use crate::points::{self, Points};
use crate::store::{Controller, StoreError, Transact, abort};
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};

/// Handle over one player's persisted record.
///
/// The cached record is refreshed only after a successful commit, so a
/// failed mutation leaves the handle consistent with the last persisted
/// state. Handles are `Send + Sync`; each protects its cache with its own
/// read/write lock.
pub struct PlayerEntry {
    ctrl: Arc<dyn Controller>,
    record: RwLock<Player>,
}

impl std::fmt::Debug for PlayerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerEntry").finish_non_exhaustive()
    }
}

impl PlayerEntry {
    /// Opens the player with `id`, creating a zero-balance record when none
    /// exists yet. An existing record is returned unchanged.
    pub fn create_or_find(id: &str, ctrl: Arc<dyn Controller>) -> PlayerResult<Self> {
        let tx = ctrl.begin_transaction()?;

        let player = match ctrl.find_player(id, Some(tx.as_ref())) {
            Ok(player) => player,
            Err(StoreError::NotFound) => {
                if let Err(err) = ctrl.create_player(id, Some(tx.as_ref())) {
                    abort(tx);
                    return Err(err.into());
                }
                Player::new(id)
            }
            Err(err) => {
                abort(tx);
                return Err(err.into());
            }
        };

        tx.commit()?;

        Ok(Self {
            ctrl,
            record: RwLock::new(player),
        })
    }

    /// Opens the player with `id`, failing when the record does not exist.
    pub fn find(id: &str, ctrl: Arc<dyn Controller>) -> PlayerResult<Self> {
        let tx = ctrl.begin_transaction()?;

        let player = match ctrl.find_player(id, Some(tx.as_ref())) {
            Ok(player) => player,
            Err(err) => {
                abort(tx);
                return Err(err.into());
            }
        };

        tx.commit()?;

        Ok(Self {
            ctrl,
            record: RwLock::new(player),
        })
    }

    /// Adds `amount` to the player's balance. There is no upper bound.
    pub fn fund(&self, amount: Points) -> PlayerResult<()> {
        self.apply(amount)
    }

    /// Withdraws `amount` from the player's balance. A take the balance
    /// cannot cover fails with [`PlayerError::InsufficientPoints`] before
    /// anything is written, so a rejected take is a guaranteed no-op.
    pub fn take(&self, amount: Points) -> PlayerResult<()> {
        self.apply(-amount)
    }

    fn apply(&self, delta: Points) -> PlayerResult<()> {
        let tx = self.ctrl.begin_transaction()?;

        let id = self.id();
        let balance = match adjust_balance(self.ctrl.as_ref(), tx.as_ref(), &id, delta) {
            Ok(balance) => balance,
            Err(err) => {
                abort(tx);
                return Err(err);
            }
        };

        tx.commit()?;

        self.record
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .balance = balance;
        debug!("player {id}: balance now {balance}");

        Ok(())
    }

    /// Reads the persisted balance outside any transaction and refreshes
    /// the cached record.
    pub fn balance(&self) -> PlayerResult<Points> {
        let player = self.ctrl.find_player(&self.id(), None)?;

        self.record
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .balance = player.balance;

        Ok(player.balance)
    }

    /// Returns the player's identity. Never fails.
    pub fn id(&self) -> PlayerId {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .id
            .clone()
    }
}

/// Applies `delta` to the stored balance of `id` inside `tx`, enforcing the
/// no-underflow rule and the truncate-on-input, round-on-write arithmetic.
///
/// Settlement calls this with the tournament's open transaction, so player
/// debits and credits commit or roll back together with the tournament
/// record.
pub fn adjust_balance(
    ctrl: &dyn Controller,
    tx: &dyn Transact,
    id: &str,
    delta: Points,
) -> PlayerResult<Points> {
    let mut player = ctrl.find_player(id, Some(tx))?;

    if delta < 0.0 && player.balance < delta.abs() {
        return Err(PlayerError::InsufficientPoints);
    }

    player.balance = points::round_price(player.balance + points::truncate_price(delta));
    ctrl.save_player(&player, Some(tx))?;

    Ok(player.balance)
}
