use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::domain::{Amount, Operation, apply_operation, sort_most_recent_first};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("operation has no account number")]
    MissingAccountNumber,

    #[error("balance of account {account_number} would overflow")]
    BalanceOverflow { account_number: String },
}

/// Operations of one account, in insertion order, with their running balance.
#[derive(Debug, Default)]
struct AccountBook {
    operations: Vec<Operation>,
    balance: Amount,
}

/// In-memory store of operations, bucketed by account number.
///
/// Every bucket only holds operations whose account number is the bucket key,
/// and its balance is always the sum of credits minus debits of those operations.
/// Unknown accounts read as empty with a zero balance.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: RwLock<HashMap<String, AccountBook>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from existing operations, bucketing each by its account number.
    pub fn from_operations(operations: impl IntoIterator<Item = Operation>) -> Self {
        let ledger = Self::new();
        for operation in operations {
            ledger.create(operation);
        }
        ledger
    }

    // Every critical section leaves the map consistent, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, AccountBook>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, AccountBook>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// List operations on the account, most recent first.
    /// Returns a copy; an unknown or empty account number yields an empty list.
    pub fn list(&self, account_number: &str) -> Vec<Operation> {
        if account_number.is_empty() {
            return Vec::new();
        }

        let mut operations = self
            .read()
            .get(account_number)
            .map(|book| book.operations.clone())
            .unwrap_or_default();
        sort_most_recent_first(&mut operations);
        operations
    }

    /// Append an operation to its account and return the new balance.
    /// Nothing is stored when the account number is missing or the balance would overflow.
    pub fn record(&self, operation: Operation) -> Result<Amount, LedgerError> {
        if operation.account_number().is_empty() {
            return Err(LedgerError::MissingAccountNumber);
        }

        let mut accounts = self.write();
        let current = accounts
            .get(operation.account_number())
            .map_or(Amount::ZERO, |book| book.balance);
        let balance = apply_operation(current, &operation).ok_or_else(|| {
            LedgerError::BalanceOverflow {
                account_number: operation.account_number().to_string(),
            }
        })?;

        let book = accounts
            .entry(operation.account_number().to_string())
            .or_default();
        book.operations.push(operation);
        book.balance = balance;
        Ok(balance)
    }

    /// Append an operation to its account, opening the account if needed.
    /// Operations the ledger cannot hold are ignored.
    pub fn create(&self, operation: Operation) {
        let operation_id = operation.id();
        if let Err(e) = self.record(operation) {
            tracing::warn!(%operation_id, error = %e, "ignoring operation");
        }
    }

    /// Balance of the account: credits minus debits. Zero for unknown accounts.
    pub fn calculate_balance(&self, account_number: &str) -> Amount {
        self.read()
            .get(account_number)
            .map_or(Amount::ZERO, |book| book.balance)
    }

    /// Number of operations recorded on the account.
    pub fn operation_count(&self, account_number: &str) -> usize {
        self.read()
            .get(account_number)
            .map_or(0, |book| book.operations.len())
    }

    /// Account numbers with at least one operation, sorted.
    pub fn account_numbers(&self) -> Vec<String> {
        let mut numbers: Vec<String> = self
            .read()
            .iter()
            .filter(|(_, book)| !book.operations.is_empty())
            .map(|(number, _)| number.clone())
            .collect();
        numbers.sort();
        numbers
    }
}
