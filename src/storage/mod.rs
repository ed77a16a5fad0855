//! Vault snapshot persistence
//!
//! The ledger is the vault's audit trail; snapshots make it durable across
//! restarts.

pub mod persistence;

pub use persistence::{StorageError, StoreConfig, VaultStore};
