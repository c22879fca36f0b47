use thiserror::Error;

use crate::domain::{Amount, OperationKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("The account number should be specified")]
    MissingAccountNumber,

    #[error("The amount for the {} must be positive (got {amount})", .kind.as_str())]
    NonPositiveAmount { kind: OperationKind, amount: Amount },

    #[error("The {} of {amount} would overflow the balance of account {account_number}", .kind.as_str())]
    BalanceOverflow {
        account_number: String,
        kind: OperationKind,
        amount: Amount,
    },
}
