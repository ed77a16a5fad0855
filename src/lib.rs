//! Multisig-Vault: a quorum-gated shared custody vault in Rust
//!
//! This crate implements a multi-signature custody vault: a shared account
//! controlled by a fixed set of owners, where any value transfer requires a
//! quorum of owner confirmations and successful withdrawals are separated by
//! a mandatory vault-wide cooldown. Features:
//! - Fixed owner registry with M-of-N quorum threshold
//! - Append-only transaction ledger with per-owner confirmation tracking
//! - Cooldown-gated, replay-safe execution with atomic rollback
//! - Pluggable settlement seam (`TransferSink`) and time source (`Clock`)
//! - Typed audit events for every lifecycle transition
//! - JSON snapshot persistence
//! - Thread-safe wrapper for shared use across threads
//!
//! # Example
//!
//! ```rust
//! use multisig_vault::{Address, InMemoryBank, Vault};
//!
//! let owners: Vec<Address> = (1u8..=3).map(|n| Address::from_bytes([n; 20])).collect();
//! let recipient = Address::from_bytes([9; 20]);
//!
//! // 2-of-3 vault, no cooldown
//! let mut vault = Vault::new(owners.clone(), 2, 0).unwrap();
//! vault.deposit(1_000);
//!
//! // Propose a withdrawal (the proposal counts as the first confirmation)
//! let id = vault
//!     .create_transaction(&owners[0], recipient.clone(), 250, vec![])
//!     .unwrap();
//! vault.confirm_transaction(&owners[1], id).unwrap();
//!
//! // Quorum met: release the funds
//! let mut bank = InMemoryBank::new();
//! vault.execute_transaction(&owners[2], id, &mut bank).unwrap();
//! assert_eq!(bank.balance_of(&recipient), 250);
//! ```

pub mod clock;
pub mod service;
pub mod storage;
pub mod transfer;
pub mod vault;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use service::SharedVault;
pub use storage::{StorageError, StoreConfig, VaultStore};
pub use transfer::{InMemoryBank, TransferError, TransferSink};
pub use vault::{
    Address, OwnerRegistry, TransactionRecord, TxStatus, Vault, VaultError, VaultEvent,
};
