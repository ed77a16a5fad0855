//! Vault error taxonomy
//!
//! Every error aborts the triggering call with no partial state change.

use crate::transfer::TransferError;
use crate::vault::registry::Address;
use thiserror::Error;

/// Errors surfaced by vault operations
///
/// Kinds are mutually exclusive per call and carry enough detail for the
/// caller to distinguish them programmatically.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Caller is not in the owner set (applies to create/confirm/execute)
    #[error("caller {caller} is not a vault owner")]
    Unauthorized { caller: Address },

    /// Transaction id does not exist in the ledger
    #[error("unknown transaction id {id}")]
    InvalidId { id: u64 },

    /// Same owner confirming the same transaction twice
    #[error("owner {owner} already confirmed transaction {id}")]
    AlreadyConfirmed { id: u64, owner: Address },

    /// Confirm or execute called on a terminal (executed) transaction
    #[error("transaction {id} already executed")]
    AlreadyExecuted { id: u64 },

    /// Execute attempted before confirmations reach the threshold
    #[error("quorum not met for transaction {id}: have {have}, need {need}")]
    QuorumNotMet { id: u64, have: u32, need: u32 },

    /// Execute attempted before the vault-wide cooldown elapsed
    #[error("cooldown active: {remaining_secs}s until the next execution window")]
    CooldownActive { remaining_secs: u64 },

    /// The underlying value movement failed
    #[error("transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// Malformed owner set or threshold at initialization
    #[error("invalid vault construction: {0}")]
    ConstructionInvalid(String),
}
