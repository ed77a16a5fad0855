//! Multi-signature custody vault core
//!
//! Three tightly coupled responsibilities over one shared store:
//! - **Owner registry**: fixed owner set and quorum threshold, immutable
//!   after construction ([`OwnerRegistry`])
//! - **Transaction ledger**: append-only proposals with per-owner
//!   confirmation tracking ([`TransactionRecord`])
//! - **Execution gate**: quorum check, vault-wide cooldown, and the single
//!   atomic transition that releases funds ([`Vault::execute_transaction`])
//!
//! # Example
//!
//! ```ignore
//! use multisig_vault::vault::{Address, Vault};
//!
//! // Create a 3-of-4 vault with a 60s withdrawal cooldown
//! let mut vault = Vault::new(owners, 3, 60)?;
//!
//! // Propose, confirm, execute
//! let id = vault.create_transaction(&owners[0], recipient, amount, data)?;
//! vault.confirm_transaction(&owners[1], id)?;
//! vault.confirm_transaction(&owners[2], id)?;
//! vault.execute_transaction(&owners[3], id, &mut sink)?;
//! ```

pub mod error;
pub mod events;
pub mod registry;
pub mod transaction;
pub mod vault;

pub use error::VaultError;
pub use events::VaultEvent;
pub use registry::{Address, AddressError, OwnerRegistry};
pub use transaction::{TransactionRecord, TxStatus};
pub use vault::Vault;
