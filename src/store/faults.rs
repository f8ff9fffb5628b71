//! Injectable fault policy for the reference store.
//!
//! Tests preload failures against specific operation kinds; the store pops
//! one queued failure per matching call and returns it after performing the
//! call's normal effect. Production stores carry no counterpart to this.

use super::contract::StoreError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Store operation kinds a fault can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    Begin,
    Commit,
    Rollback,
    Create,
    Find,
    Save,
    Delete,
    Reset,
}

/// Shared queues of preconfigured store failures.
///
/// Cloning shares the underlying queues, so a test keeps one handle while
/// the store under test consumes from the same plan.
#[derive(Debug, Clone, Default)]
pub struct FaultInjector {
    queues: Arc<Mutex<HashMap<FaultKind, Vec<StoreError>>>>,
}

impl FaultInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `error` to surface on the next operation of `kind`. Repeated
    /// calls stack; the most recently queued error surfaces first.
    pub fn fail_next(&self, kind: FaultKind, error: StoreError) {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push(error);
    }

    /// Pops the next queued failure for `kind`, if any.
    pub(crate) fn take(&self, kind: FaultKind) -> Option<StoreError> {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&kind)
            .and_then(Vec::pop)
    }

    /// True when no failures remain queued for any operation kind.
    pub fn is_drained(&self) -> bool {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .all(Vec::is_empty)
    }
}
