//! In-process settlement for tests and demos

use crate::transfer::{TransferError, TransferSink};
use crate::vault::registry::Address;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// In-memory account book implementing [`TransferSink`]
///
/// Credits recipients on transfer; addresses can be marked as rejecting to
/// exercise the vault's rollback path.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryBank {
    /// Credited balances by recipient
    balances: HashMap<Address, u64>,
    /// Recipients that refuse incoming transfers
    rejecting: HashSet<Address>,
}

impl InMemoryBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Credited balance of a recipient (0 if never credited)
    pub fn balance_of(&self, recipient: &Address) -> u64 {
        self.balances.get(recipient).copied().unwrap_or(0)
    }

    /// Mark a recipient as refusing incoming transfers
    pub fn reject(&mut self, recipient: Address) {
        self.rejecting.insert(recipient);
    }

    /// Clear a rejection mark
    pub fn allow(&mut self, recipient: &Address) {
        self.rejecting.remove(recipient);
    }
}

impl TransferSink for InMemoryBank {
    fn transfer(
        &mut self,
        recipient: &Address,
        amount: u64,
        _data: &[u8],
    ) -> Result<(), TransferError> {
        if self.rejecting.contains(recipient) {
            return Err(TransferError::Rejected(format!(
                "{recipient} refuses transfers"
            )));
        }

        let balance = self.balances.entry(recipient.clone()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("recipient balance overflow".to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[test]
    fn test_credits_accumulate() {
        let mut bank = InMemoryBank::new();
        bank.transfer(&addr(1), 100, &[]).unwrap();
        bank.transfer(&addr(1), 50, b"payload").unwrap();
        bank.transfer(&addr(2), 7, &[]).unwrap();

        assert_eq!(bank.balance_of(&addr(1)), 150);
        assert_eq!(bank.balance_of(&addr(2)), 7);
        assert_eq!(bank.balance_of(&addr(3)), 0);
    }

    #[test]
    fn test_rejection_moves_nothing() {
        let mut bank = InMemoryBank::new();
        bank.reject(addr(1));

        assert!(matches!(
            bank.transfer(&addr(1), 100, &[]),
            Err(TransferError::Rejected(_))
        ));
        assert_eq!(bank.balance_of(&addr(1)), 0);

        bank.allow(&addr(1));
        bank.transfer(&addr(1), 100, &[]).unwrap();
        assert_eq!(bank.balance_of(&addr(1)), 100);
    }

    #[test]
    fn test_overflow_rejected() {
        let mut bank = InMemoryBank::new();
        bank.transfer(&addr(1), u64::MAX, &[]).unwrap();
        assert!(matches!(
            bank.transfer(&addr(1), 1, &[]),
            Err(TransferError::Rejected(_))
        ));
        assert_eq!(bank.balance_of(&addr(1)), u64::MAX);
    }
}
