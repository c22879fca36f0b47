use std::sync::Arc;

use crate::domain::{AccountStatement, Amount, Operation, OperationKind};
use crate::storage::{Ledger, LedgerError};

use super::{AccountError, Clock, SystemClock};

/// Application service for bank accounts.
/// This is the only place operations are created; it validates input,
/// stamps operations with the clock and stores them in the ledger.
pub struct AccountService<C = SystemClock> {
    ledger: Arc<Ledger>,
    clock: C,
}

impl<C: Clock> AccountService<C> {
    /// Create a new account service over a shared ledger.
    pub fn new(ledger: Arc<Ledger>, clock: C) -> Self {
        Self { ledger, clock }
    }

    /// The ledger this service writes to.
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Deposit money on the account.
    pub fn deposit_money(&self, account_number: &str, amount: Amount) -> Result<(), AccountError> {
        validate(account_number, OperationKind::Deposit, amount)?;

        let operation = Operation::deposit(account_number, amount, self.clock.now());
        tracing::debug!(
            account = account_number,
            operation_id = %operation.id(),
            %amount,
            "recording deposit"
        );
        self.record(operation)?;
        Ok(())
    }

    /// Withdraw money from the account.
    ///
    /// The withdrawal is always recorded, even when it overdraws the account.
    /// Returns whether the balance is still zero or above afterwards.
    pub fn withdraw_money(
        &self,
        account_number: &str,
        amount: Amount,
    ) -> Result<bool, AccountError> {
        validate(account_number, OperationKind::Withdrawal, amount)?;

        let operation = Operation::withdrawal(account_number, amount, self.clock.now());
        tracing::debug!(
            account = account_number,
            operation_id = %operation.id(),
            %amount,
            "recording withdrawal"
        );
        let balance = self.record(operation)?;
        if balance < Amount::ZERO {
            tracing::warn!(account = account_number, %balance, "account overdrawn");
            return Ok(false);
        }
        Ok(true)
    }

    fn record(&self, operation: Operation) -> Result<Amount, AccountError> {
        let kind = operation.kind();
        let amount = operation.debit().max(operation.credit());
        self.ledger.record(operation).map_err(|e| match e {
            LedgerError::MissingAccountNumber => AccountError::MissingAccountNumber,
            LedgerError::BalanceOverflow { account_number } => AccountError::BalanceOverflow {
                account_number,
                kind,
                amount,
            },
        })
    }

    /// Establish the statement of the account: operations, most recent first, and balance.
    /// Unknown accounts get an empty statement.
    pub fn establish_account_statement(&self, account_number: &str) -> AccountStatement {
        let operations = self.ledger.list(account_number);
        let balance = self.ledger.calculate_balance(account_number);
        tracing::debug!(
            account = account_number,
            operations = operations.len(),
            %balance,
            "statement established"
        );
        AccountStatement::new(operations, balance)
    }
}

fn validate(account_number: &str, kind: OperationKind, amount: Amount) -> Result<(), AccountError> {
    if account_number.is_empty() {
        return Err(AccountError::MissingAccountNumber);
    }
    if amount <= Amount::ZERO {
        return Err(AccountError::NonPositiveAmount { kind, amount });
    }
    Ok(())
}
