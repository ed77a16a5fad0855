//! Thread-safe vault sharing
//!
//! The canonical environment serializes all mutating calls; when the vault
//! is shared across threads that guarantee must be reintroduced.
//! [`SharedVault`] uses one global lock so create/confirm/execute are
//! mutually atomic, and holds it across the whole execute operation —
//! including the external transfer — so the cooldown timestamp is never
//! observed mid-transition.

use crate::transfer::TransferSink;
use crate::vault::{Address, Vault, VaultError, VaultEvent};
use std::sync::{Arc, Mutex, PoisonError};

/// A vault behind a single global lock
#[derive(Clone, Debug)]
pub struct SharedVault {
    inner: Arc<Mutex<Vault>>,
}

impl SharedVault {
    /// Wrap a vault for shared use
    pub fn new(vault: Vault) -> Self {
        Self {
            inner: Arc::new(Mutex::new(vault)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vault> {
        // A poisoned lock means a panic mid-operation; the vault's own
        // rollback discipline keeps the state consistent, so recover.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Vault::create_transaction`]
    pub fn create_transaction(
        &self,
        caller: &Address,
        recipient: Address,
        amount: u64,
        data: Vec<u8>,
    ) -> Result<u64, VaultError> {
        self.lock().create_transaction(caller, recipient, amount, data)
    }

    /// See [`Vault::confirm_transaction`]
    pub fn confirm_transaction(&self, caller: &Address, id: u64) -> Result<(), VaultError> {
        self.lock().confirm_transaction(caller, id)
    }

    /// See [`Vault::execute_transaction`]; the lock is held across the
    /// entire operation, transfer included
    pub fn execute_transaction(
        &self,
        caller: &Address,
        id: u64,
        sink: &mut dyn TransferSink,
    ) -> Result<(), VaultError> {
        self.lock().execute_transaction(caller, id, sink)
    }

    /// See [`Vault::deposit`]
    pub fn deposit(&self, amount: u64) {
        self.lock().deposit(amount);
    }

    /// See [`Vault::confirmations_count`]
    pub fn confirmations_count(&self, id: u64) -> Result<u32, VaultError> {
        self.lock().confirmations_count(id)
    }

    /// See [`Vault::check_confirmation`]
    pub fn check_confirmation(&self, id: u64) -> Result<bool, VaultError> {
        self.lock().check_confirmation(id)
    }

    /// See [`Vault::transactions_count`]
    pub fn transactions_count(&self) -> usize {
        self.lock().transactions_count()
    }

    /// See [`Vault::balance`]
    pub fn balance(&self) -> u64 {
        self.lock().balance()
    }

    /// Snapshot of the audit event log
    pub fn events(&self) -> Vec<VaultEvent> {
        self.lock().events().to_vec()
    }

    /// Run a closure with read access to the vault under the lock
    pub fn with<R>(&self, f: impl FnOnce(&Vault) -> R) -> R {
        f(&self.lock())
    }
}
