//! The vault: transaction ledger operations and the execution gate
//!
//! All mutating operations take the authenticated caller as an explicit
//! parameter; authenticating callers is the transport layer's job. The vault
//! itself is serialized by `&mut self` — wrap it in
//! [`crate::SharedVault`] to share it across threads.

use crate::clock::{Clock, SystemClock};
use crate::transfer::{TransferError, TransferSink};
use crate::vault::error::VaultError;
use crate::vault::events::VaultEvent;
use crate::vault::registry::{Address, OwnerRegistry};
use crate::vault::transaction::TransactionRecord;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// A quorum-gated custody vault with a global withdrawal cooldown
///
/// Holds the fixed owner registry, the append-only transaction ledger, the
/// vault's native balance, and the single vault-wide cooldown timer that
/// couples withdrawal cadence across all transactions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vault {
    /// Fixed owner set and quorum threshold
    registry: OwnerRegistry,
    /// Append-only ledger; a record's position is its permanent id
    transactions: Vec<TransactionRecord>,
    /// Native value held by the vault
    balance: u64,
    /// Minimum seconds between any two successful executions
    cooldown_secs: u64,
    /// Timestamp of the last successful execution; `None` until the first,
    /// so a fresh vault is never cooldown-gated
    last_execution: Option<DateTime<Utc>>,
    /// Audit log of successful transitions
    events: Vec<VaultEvent>,
    /// Time source; swapped for a manual clock in tests
    #[serde(skip, default = "default_clock")]
    clock: Arc<dyn Clock>,
}

impl Vault {
    /// Create a vault from an ordered owner list, quorum threshold, and
    /// cooldown duration in seconds (0 means no forced delay)
    ///
    /// # Errors
    /// Returns [`VaultError::ConstructionInvalid`] for a malformed owner set
    /// or threshold; see [`OwnerRegistry::new`].
    pub fn new(owners: Vec<Address>, threshold: u32, cooldown_secs: u64) -> Result<Self, VaultError> {
        Self::with_clock(owners, threshold, cooldown_secs, Arc::new(SystemClock))
    }

    /// Create a vault with an explicit time source
    pub fn with_clock(
        owners: Vec<Address>,
        threshold: u32,
        cooldown_secs: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, VaultError> {
        let registry = OwnerRegistry::new(owners, threshold)?;
        log::info!(
            "vault created: {} quorum, cooldown {}s",
            registry.description(),
            cooldown_secs
        );

        Ok(Self {
            registry,
            transactions: Vec::new(),
            balance: 0,
            cooldown_secs,
            last_execution: None,
            events: Vec::new(),
            clock,
        })
    }

    // =========================================================================
    // Membership registry
    // =========================================================================

    /// The owner registry
    pub fn registry(&self) -> &OwnerRegistry {
        &self.registry
    }

    /// Check if an address is an authorized owner
    pub fn is_owner(&self, address: &Address) -> bool {
        self.registry.is_owner(address)
    }

    /// Required confirmations to execute
    pub fn required_confirmations(&self) -> u32 {
        self.registry.required_confirmations()
    }

    fn require_owner(&self, caller: &Address) -> Result<(), VaultError> {
        if !self.registry.is_owner(caller) {
            return Err(VaultError::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Deposits
    // =========================================================================

    /// Receive an inbound value transfer
    ///
    /// Deposits are passive: any party may fund the vault, no authorization
    /// required.
    pub fn deposit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        log::debug!("deposit of {}, balance now {}", amount, self.balance);
    }

    /// Native value currently held
    pub fn balance(&self) -> u64 {
        self.balance
    }

    // =========================================================================
    // Transaction ledger
    // =========================================================================

    /// Propose a value transfer; returns the new record's id
    ///
    /// The proposal itself counts as the creator's confirmation, so the
    /// record starts with a confirmation count of 1. The amount is not
    /// checked against the balance here — the value check happens at
    /// execution time.
    pub fn create_transaction(
        &mut self,
        caller: &Address,
        recipient: Address,
        amount: u64,
        data: Vec<u8>,
    ) -> Result<u64, VaultError> {
        self.require_owner(caller)?;

        let now = self.clock.now();
        let id = self.transactions.len() as u64;
        let record = TransactionRecord::new(
            id,
            caller.clone(),
            recipient.clone(),
            amount,
            data,
            now,
        );

        log::info!("tx {} created by {}: {} -> {}", id, caller, amount, recipient);
        self.transactions.push(record);
        self.events.push(VaultEvent::TransactionCreated {
            id,
            creator: caller.clone(),
            recipient,
            amount,
            at: now,
        });

        Ok(id)
    }

    /// Confirm a pending transaction
    ///
    /// Idempotence is per owner, not per call: the same owner confirming
    /// twice fails with [`VaultError::AlreadyConfirmed`] and counts once.
    pub fn confirm_transaction(&mut self, caller: &Address, id: u64) -> Result<(), VaultError> {
        self.require_owner(caller)?;

        let now = self.clock.now();
        let record = self
            .transactions
            .get_mut(id as usize)
            .ok_or(VaultError::InvalidId { id })?;

        if record.executed {
            return Err(VaultError::AlreadyExecuted { id });
        }

        if record.is_confirmed_by(caller) {
            return Err(VaultError::AlreadyConfirmed {
                id,
                owner: caller.clone(),
            });
        }

        record.confirm(caller.clone());
        let confirmations = record.confirmation_count();

        log::info!("tx {} confirmed by {} ({} total)", id, caller, confirmations);
        self.events.push(VaultEvent::TransactionConfirmed {
            id,
            owner: caller.clone(),
            confirmations,
            at: now,
        });

        Ok(())
    }

    /// Raw confirmation count for a transaction
    pub fn confirmations_count(&self, id: u64) -> Result<u32, VaultError> {
        self.record(id).map(TransactionRecord::confirmation_count)
    }

    /// Whether a transaction has reached quorum
    pub fn check_confirmation(&self, id: u64) -> Result<bool, VaultError> {
        let count = self.confirmations_count(id)?;
        Ok(count >= self.registry.required_confirmations())
    }

    /// Ledger length
    pub fn transactions_count(&self) -> usize {
        self.transactions.len()
    }

    /// Read access to a ledger record
    pub fn transaction(&self, id: u64) -> Option<&TransactionRecord> {
        self.transactions.get(id as usize)
    }

    /// Iterate the full ledger in proposal order (audit trail)
    pub fn transactions(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions.iter()
    }

    fn record(&self, id: u64) -> Result<&TransactionRecord, VaultError> {
        self.transactions
            .get(id as usize)
            .ok_or(VaultError::InvalidId { id })
    }

    // =========================================================================
    // Execution gate
    // =========================================================================

    /// Execute a transaction that has reached quorum
    ///
    /// Checks, in order: caller is an owner, the id exists, the record is
    /// not terminal, quorum is met, and the vault-wide cooldown has elapsed
    /// since the last successful execution (regardless of which record that
    /// was). On success the executed flag, cooldown timer, and balance debit
    /// are committed before the external transfer through `sink`; if the
    /// transfer fails, every effect is rolled back and the call fails with
    /// [`VaultError::TransferFailed`].
    pub fn execute_transaction(
        &mut self,
        caller: &Address,
        id: u64,
        sink: &mut dyn TransferSink,
    ) -> Result<(), VaultError> {
        self.require_owner(caller)?;

        let now = self.clock.now();
        let threshold = self.registry.required_confirmations();
        let record = self
            .transactions
            .get_mut(id as usize)
            .ok_or(VaultError::InvalidId { id })?;

        if record.executed {
            return Err(VaultError::AlreadyExecuted { id });
        }

        let have = record.confirmation_count();
        if have < threshold {
            return Err(VaultError::QuorumNotMet {
                id,
                have,
                need: threshold,
            });
        }

        // The cooldown clock is vault-wide: one execution gates them all.
        if let Some(last) = self.last_execution {
            let cooldown = Duration::seconds(self.cooldown_secs as i64);
            let elapsed = now.signed_duration_since(last);
            if elapsed < cooldown {
                let remaining = (cooldown - elapsed).num_seconds().max(0) as u64;
                return Err(VaultError::CooldownActive {
                    remaining_secs: remaining,
                });
            }
        }

        let amount = record.amount;
        let recipient = record.recipient.clone();
        if self.balance < amount {
            return Err(VaultError::TransferFailed(TransferError::InsufficientFunds {
                have: self.balance,
                need: amount,
            }));
        }

        // Commit effects before the external call: a re-entrant observer
        // sees the record as executed and the timer advanced.
        record.executed = true;
        record.executed_at = Some(now);
        let previous_execution = self.last_execution.replace(now);
        self.balance -= amount;

        let data = record.data.clone();
        if let Err(e) = sink.transfer(&recipient, amount, &data) {
            // Roll back so the call is all-or-nothing.
            let record = &mut self.transactions[id as usize];
            record.executed = false;
            record.executed_at = None;
            self.last_execution = previous_execution;
            self.balance += amount;

            log::warn!("tx {} execution failed, state rolled back: {}", id, e);
            return Err(VaultError::TransferFailed(e));
        }

        log::info!("tx {} executed: {} -> {}", id, amount, recipient);
        self.events.push(VaultEvent::TransactionExecuted {
            id,
            recipient,
            amount,
            at: now,
        });

        Ok(())
    }

    /// Cooldown duration between successful executions, in seconds
    pub fn cooldown_secs(&self) -> u64 {
        self.cooldown_secs
    }

    /// Timestamp of the last successful execution, if any
    pub fn last_execution(&self) -> Option<DateTime<Utc>> {
        self.last_execution
    }

    /// Audit log of successful transitions, in order of occurrence
    pub fn events(&self) -> &[VaultEvent] {
        &self.events
    }

    /// Rebuild derived state after deserialization
    ///
    /// The registry's membership index is not serialized; snapshots loaded
    /// from storage call this before use.
    pub fn rebuild_index(&mut self) {
        self.registry.rebuild_index();
    }
}
