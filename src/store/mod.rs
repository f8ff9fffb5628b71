//! Persistence contract and the in-memory reference store.
//!
//! This module defines:
//! - The abstract operations every store must provide ([`Controller`],
//!   [`Transact`], [`Store`])
//! - The in-memory reference implementation with snapshot-based
//!   transaction rollback ([`MemoryStore`])
//! - An injectable fault policy for driving failure-path tests
//!   ([`FaultInjector`])

pub mod contract;
pub mod faults;
pub mod memory;

pub(crate) use contract::abort;
pub use contract::{Controller, Store, StoreError, StoreResult, Transact};
pub use faults::{FaultInjector, FaultKind};
pub use memory::MemoryStore;
