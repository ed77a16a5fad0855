//! Transaction ledger records
//!
//! Each record is an append-only proposal to move value to a recipient with
//! optional call data. Records are created by proposal submission, mutated
//! only by confirmation and execution, and never deleted.

use crate::vault::registry::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Derived lifecycle status of a transaction record
///
/// `Proposed` and `QuorumMet` are not distinguished in storage, only derived
/// from the confirmation count against the threshold at read time.
/// `Executed` is terminal and irreversible.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxStatus {
    /// Waiting for more confirmations
    Proposed,
    /// Has enough confirmations, ready to execute
    QuorumMet,
    /// Funds released; terminal
    Executed,
}

/// A proposed value transfer awaiting quorum
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Position in the ledger; the record's permanent identifier
    pub id: u64,
    /// Owner who proposed the transfer
    pub creator: Address,
    /// Recipient of the transfer
    pub recipient: Address,
    /// Amount of native value to move
    pub amount: u64,
    /// Arbitrary call payload carried with the transfer
    pub data: Vec<u8>,
    /// Owners who have confirmed; bounded by the registry size
    confirmations: HashSet<Address>,
    /// Terminal flag; set once by execution, never unset
    pub executed: bool,
    /// Proposal timestamp
    pub created_at: DateTime<Utc>,
    /// Execution timestamp, once terminal
    pub executed_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    /// Create a new record at ledger position `id`
    ///
    /// The creator's proposal doubles as the first confirmation, so a fresh
    /// record starts with a confirmation count of 1.
    pub fn new(
        id: u64,
        creator: Address,
        recipient: Address,
        amount: u64,
        data: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut confirmations = HashSet::new();
        confirmations.insert(creator.clone());

        Self {
            id,
            creator,
            recipient,
            amount,
            data,
            confirmations,
            executed: false,
            created_at,
            executed_at: None,
        }
    }

    /// Check if an owner has already confirmed this record
    pub fn is_confirmed_by(&self, owner: &Address) -> bool {
        self.confirmations.contains(owner)
    }

    /// Record an owner's confirmation
    ///
    /// Returns `false` if the owner had already confirmed (no state change).
    pub(crate) fn confirm(&mut self, owner: Address) -> bool {
        self.confirmations.insert(owner)
    }

    /// Number of distinct confirmations collected
    pub fn confirmation_count(&self) -> u32 {
        self.confirmations.len() as u32
    }

    /// Owners who have confirmed, in stable (sorted) order
    pub fn confirmed_by(&self) -> Vec<&Address> {
        let mut owners: Vec<&Address> = self.confirmations.iter().collect();
        owners.sort();
        owners
    }

    /// Derive the lifecycle status against a quorum threshold
    pub fn status(&self, threshold: u32) -> TxStatus {
        if self.executed {
            TxStatus::Executed
        } else if self.confirmation_count() >= threshold {
            TxStatus::QuorumMet
        } else {
            TxStatus::Proposed
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tx {}: {} -> {} ({} confirmations{})",
            self.id,
            self.amount,
            self.recipient,
            self.confirmation_count(),
            if self.data.is_empty() {
                String::new()
            } else {
                format!(", data 0x{}", hex::encode(&self.data))
            }
        )
    }
}
