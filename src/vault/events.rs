//! Audit events emitted by vault lifecycle transitions

use crate::vault::registry::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observable record of a successful state transition
///
/// Appended to the vault's event log and mirrored to the `log` facade;
/// consumers (indexers, wallets) read them through [`crate::Vault::events`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VaultEvent {
    /// A new transaction was proposed
    TransactionCreated {
        id: u64,
        creator: Address,
        recipient: Address,
        amount: u64,
        at: DateTime<Utc>,
    },
    /// An owner confirmed a pending transaction
    TransactionConfirmed {
        id: u64,
        owner: Address,
        /// Distinct confirmations after this one
        confirmations: u32,
        at: DateTime<Utc>,
    },
    /// A transaction was executed and value released
    TransactionExecuted {
        id: u64,
        recipient: Address,
        amount: u64,
        at: DateTime<Utc>,
    },
}

impl VaultEvent {
    /// Ledger id of the transaction this event concerns
    pub fn transaction_id(&self) -> u64 {
        match self {
            VaultEvent::TransactionCreated { id, .. }
            | VaultEvent::TransactionConfirmed { id, .. }
            | VaultEvent::TransactionExecuted { id, .. } => *id,
        }
    }
}
