//! In-memory reference store.
//!
//! Transaction isolation is copy-on-begin, restore-on-abort: beginning a
//! transaction deep-copies both collections into a side buffer, interim
//! saves mutate the live collections directly, commit discards the buffer
//! and rollback overwrites the live collections from it. Concurrent
//! transactions are not isolated from each other's writes; the single
//! read/write lock exists for memory safety, and callers needing true
//! cross-transaction isolation must serialize at a higher layer.

use super::contract::{Controller, Store, StoreError, StoreResult, Transact};
use super::faults::{FaultInjector, FaultKind};
use crate::player::{Player, PlayerId};
use crate::tournament::{Tournament, TournamentId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct State {
    players: HashMap<PlayerId, Player>,
    tournaments: HashMap<TournamentId, Tournament>,
    snapshot: Snapshot,
}

/// Pre-transaction copy of both collections.
#[derive(Debug, Default)]
struct Snapshot {
    players: HashMap<PlayerId, Player>,
    tournaments: HashMap<TournamentId, Tournament>,
}

#[derive(Debug, Default)]
struct Inner {
    state: RwLock<State>,
    faults: FaultInjector,
}

/// In-memory store holding players and tournaments. Cloning is cheap and
/// clones share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store whose operations additionally consume queued failures
    /// from `faults`.
    pub fn with_faults(faults: FaultInjector) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::default(),
                faults,
            }),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, State>> {
        self.inner.state.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, State>> {
        self.inner.state.write().map_err(|_| lock_poisoned())
    }

    fn fault(&self, kind: FaultKind) -> StoreResult<()> {
        match self.inner.faults.take(kind) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

struct MemoryTransaction {
    store: MemoryStore,
}

impl MemoryTransaction {
    fn restore(&self) -> StoreResult<()> {
        let state = &mut *self.store.write()?;
        state.players = std::mem::take(&mut state.snapshot.players);
        state.tournaments = std::mem::take(&mut state.snapshot.tournaments);
        Ok(())
    }
}

impl Transact for MemoryTransaction {
    fn commit(self: Box<Self>) -> StoreResult<()> {
        // A commit that fails aborts: the snapshot is restored before the
        // error surfaces, so nothing from the transaction remains live.
        if let Err(err) = self.store.fault(FaultKind::Commit) {
            self.restore()?;
            return Err(err);
        }

        let mut state = self.store.write()?;
        state.snapshot.players.clear();
        state.snapshot.tournaments.clear();
        Ok(())
    }

    fn rollback(self: Box<Self>) -> StoreResult<()> {
        self.restore()?;
        self.store.fault(FaultKind::Rollback)
    }
}

impl Controller for MemoryStore {
    fn begin_transaction(&self) -> StoreResult<Box<dyn Transact>> {
        {
            let state = &mut *self.write()?;
            state.snapshot.players = state.players.clone();
            state.snapshot.tournaments = state.tournaments.clone();
        }
        self.fault(FaultKind::Begin)?;

        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
        }))
    }

    fn create_player(&self, id: &str, _tx: Option<&dyn Transact>) -> StoreResult<()> {
        {
            let mut state = self.write()?;
            if state.players.contains_key(id) {
                return Err(StoreError::AlreadyExists);
            }
            state.players.insert(id.to_string(), Player::new(id));
        }
        self.fault(FaultKind::Create)
    }

    fn find_player(&self, id: &str, _tx: Option<&dyn Transact>) -> StoreResult<Player> {
        let player = self
            .read()?
            .players
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        self.fault(FaultKind::Find)?;
        Ok(player)
    }

    fn save_player(&self, player: &Player, _tx: Option<&dyn Transact>) -> StoreResult<()> {
        self.write()?
            .players
            .insert(player.id.clone(), player.clone());
        self.fault(FaultKind::Save)
    }

    fn delete_player(&self, id: &str, _tx: Option<&dyn Transact>) -> StoreResult<()> {
        self.write()?.players.remove(id);
        self.fault(FaultKind::Delete)
    }

    fn create_tournament(&self, id: TournamentId, _tx: Option<&dyn Transact>) -> StoreResult<()> {
        {
            let mut state = self.write()?;
            if state.tournaments.contains_key(&id) {
                return Err(StoreError::AlreadyExists);
            }
            state.tournaments.insert(id, Tournament::new(id));
        }
        self.fault(FaultKind::Create)
    }

    fn find_tournament(
        &self,
        id: TournamentId,
        _tx: Option<&dyn Transact>,
    ) -> StoreResult<Tournament> {
        let tournament = self
            .read()?
            .tournaments
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        self.fault(FaultKind::Find)?;
        Ok(tournament)
    }

    fn save_tournament(
        &self,
        tournament: &Tournament,
        _tx: Option<&dyn Transact>,
    ) -> StoreResult<()> {
        self.write()?
            .tournaments
            .insert(tournament.id, tournament.clone());
        self.fault(FaultKind::Save)
    }

    fn delete_tournament(&self, id: TournamentId, _tx: Option<&dyn Transact>) -> StoreResult<()> {
        self.write()?.tournaments.remove(&id);
        self.fault(FaultKind::Delete)
    }
}

impl Store for MemoryStore {
    fn ready(&self) -> bool {
        true
    }

    fn reset(&self) -> StoreResult<()> {
        *self.write()? = State::default();
        self.fault(FaultKind::Reset)
    }

    /// The reference store has no real schema; migration is a full reset.
    fn migrate_up(&self) -> StoreResult<()> {
        self.reset()
    }

    fn migrate_down(&self) -> StoreResult<()> {
        self.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament_with_deposit(id: TournamentId, deposit: f32) -> Tournament {
        Tournament {
            deposit,
            ..Tournament::new(id)
        }
    }

    #[test]
    fn create_twice_fails() {
        let store = MemoryStore::new();
        store.create_player("p1", None).unwrap();
        assert_eq!(
            store.create_player("p1", None),
            Err(StoreError::AlreadyExists)
        );

        store.create_tournament(1, None).unwrap();
        assert_eq!(
            store.create_tournament(1, None),
            Err(StoreError::AlreadyExists)
        );
    }

    #[test]
    fn find_missing_fails() {
        let store = MemoryStore::new();
        assert_eq!(store.find_player("ghost", None), Err(StoreError::NotFound));
        assert_eq!(store.find_tournament(9, None), Err(StoreError::NotFound));
    }

    #[test]
    fn save_overwrites_full_record() {
        let store = MemoryStore::new();
        store.create_player("p1", None).unwrap();

        let mut player = store.find_player("p1", None).unwrap();
        player.balance = 42.0;
        store.save_player(&player, None).unwrap();

        assert_eq!(store.find_player("p1", None).unwrap().balance, 42.0);
    }

    #[test]
    fn commit_keeps_interim_writes() {
        let store = MemoryStore::new();
        store.create_player("p1", None).unwrap();

        let tx = store.begin_transaction().unwrap();
        let mut player = store.find_player("p1", Some(tx.as_ref())).unwrap();
        player.balance = 10.0;
        store.save_player(&player, Some(tx.as_ref())).unwrap();
        tx.commit().unwrap();

        assert_eq!(store.find_player("p1", None).unwrap().balance, 10.0);
    }

    #[test]
    fn rollback_restores_both_collections() {
        let store = MemoryStore::new();
        store.create_player("p1", None).unwrap();
        store.create_tournament(1, None).unwrap();

        let tx = store.begin_transaction().unwrap();
        let mut player = store.find_player("p1", Some(tx.as_ref())).unwrap();
        player.balance = 99.0;
        store.save_player(&player, Some(tx.as_ref())).unwrap();
        store
            .save_tournament(&tournament_with_deposit(1, 500.0), Some(tx.as_ref()))
            .unwrap();
        store.create_player("p2", Some(tx.as_ref())).unwrap();
        tx.rollback().unwrap();

        assert_eq!(store.find_player("p1", None).unwrap().balance, 0.0);
        assert_eq!(store.find_tournament(1, None).unwrap().deposit, 0.0);
        assert_eq!(store.find_player("p2", None), Err(StoreError::NotFound));
    }

    #[test]
    fn delete_is_silent_on_missing_records() {
        let store = MemoryStore::new();
        store.delete_player("ghost", None).unwrap();
        store.delete_tournament(7, None).unwrap();

        store.create_player("p1", None).unwrap();
        store.delete_player("p1", None).unwrap();
        assert_eq!(store.find_player("p1", None), Err(StoreError::NotFound));
    }

    #[test]
    fn reset_clears_everything() {
        let store = MemoryStore::new();
        store.create_player("p1", None).unwrap();
        store.create_tournament(1, None).unwrap();

        store.reset().unwrap();

        assert!(store.ready());
        assert_eq!(store.find_player("p1", None), Err(StoreError::NotFound));
        assert_eq!(store.find_tournament(1, None), Err(StoreError::NotFound));
    }

    #[test]
    fn migrations_delegate_to_reset() {
        let store = MemoryStore::new();
        store.create_player("p1", None).unwrap();
        store.migrate_up().unwrap();
        assert_eq!(store.find_player("p1", None), Err(StoreError::NotFound));

        store.create_player("p2", None).unwrap();
        store.migrate_down().unwrap();
        assert_eq!(store.find_player("p2", None), Err(StoreError::NotFound));
    }

    #[test]
    fn injected_fault_surfaces_after_effect() {
        let faults = FaultInjector::new();
        let store = MemoryStore::with_faults(faults.clone());
        store.create_player("p1", None).unwrap();

        faults.fail_next(FaultKind::Save, StoreError::Backend("disk full".into()));
        let mut player = store.find_player("p1", None).unwrap();
        player.balance = 5.0;
        assert_eq!(
            store.save_player(&player, None),
            Err(StoreError::Backend("disk full".into()))
        );
        // the save itself still happened
        assert_eq!(store.find_player("p1", None).unwrap().balance, 5.0);
    }

    #[test]
    fn failed_commit_restores_snapshot() {
        let faults = FaultInjector::new();
        let store = MemoryStore::with_faults(faults.clone());
        store.create_player("p1", None).unwrap();

        faults.fail_next(FaultKind::Commit, StoreError::Backend("commit lost".into()));
        let tx = store.begin_transaction().unwrap();
        let mut player = store.find_player("p1", Some(tx.as_ref())).unwrap();
        player.balance = 77.0;
        store.save_player(&player, Some(tx.as_ref())).unwrap();

        assert_eq!(
            tx.commit(),
            Err(StoreError::Backend("commit lost".into()))
        );
        assert_eq!(store.find_player("p1", None).unwrap().balance, 0.0);
    }

    #[test]
    fn injected_begin_fault_blocks_transaction() {
        let faults = FaultInjector::new();
        let store = MemoryStore::with_faults(faults.clone());

        faults.fail_next(FaultKind::Begin, StoreError::Backend("no connection".into()));
        assert!(store.begin_transaction().is_err());
        assert!(store.begin_transaction().is_ok());
    }
}
