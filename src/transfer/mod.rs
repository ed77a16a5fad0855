//! Settlement seam for executed transactions
//!
//! The execution gate moves value through the [`TransferSink`] trait so the
//! surrounding transport can supply the real settlement path. The crate
//! ships [`InMemoryBank`], an in-process implementation used by tests and
//! demos.

pub mod bank;

pub use bank::InMemoryBank;

use crate::vault::registry::Address;
use thiserror::Error;

/// Errors from the underlying value movement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The vault does not hold enough value to cover the transfer
    #[error("insufficient vault funds: have {have}, need {need}")]
    InsufficientFunds { have: u64, need: u64 },
    /// The recipient (or settlement layer) refused the transfer
    #[error("recipient rejected the transfer: {0}")]
    Rejected(String),
}

/// Destination for released vault funds
///
/// Implementations must be all-or-nothing: on `Err` no value may have moved,
/// since the vault rolls its own state back and reports the failure.
pub trait TransferSink {
    /// Move `amount` of native value to `recipient`, carrying `data`
    fn transfer(
        &mut self,
        recipient: &Address,
        amount: u64,
        data: &[u8],
    ) -> Result<(), TransferError>;
}
