use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

pub type OperationId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Money entering the account (credit)
    Deposit,
    /// Money leaving the account (debit)
    Withdrawal,
}

impl OperationKind {
    /// Label printed on account statements.
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "Deposit",
            OperationKind::Withdrawal => "Withdrawal",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Withdrawal => "withdrawal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Some(OperationKind::Deposit),
            "withdrawal" => Some(OperationKind::Withdrawal),
            _ => None,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An operation is one immutable entry on a bank account.
/// Exactly one of debit/credit is non-zero for operations built through
/// [`Operation::deposit`] and [`Operation::withdrawal`]; [`Operation::new`]
/// does not check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    id: OperationId,
    account_number: String,
    kind: OperationKind,
    /// When the operation was performed
    timestamp: DateTime<Utc>,
    /// Amount taken from the account
    debit: Amount,
    /// Amount added to the account
    credit: Amount,
}

impl Operation {
    pub fn new(
        account_number: impl Into<String>,
        kind: OperationKind,
        timestamp: DateTime<Utc>,
        debit: Amount,
        credit: Amount,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number: account_number.into(),
            kind,
            timestamp,
            debit,
            credit,
        }
    }

    pub fn deposit(
        account_number: impl Into<String>,
        amount: Amount,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(
            account_number,
            OperationKind::Deposit,
            timestamp,
            Amount::ZERO,
            amount,
        )
    }

    pub fn withdrawal(
        account_number: impl Into<String>,
        amount: Amount,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(
            account_number,
            OperationKind::Withdrawal,
            timestamp,
            amount,
            Amount::ZERO,
        )
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn debit(&self) -> Amount {
        self.debit
    }

    pub fn credit(&self) -> Amount {
        self.credit
    }

    /// Signed effect of this operation on the account balance.
    /// `None` if credit minus debit does not fit in an amount.
    pub fn net_amount(&self) -> Option<Amount> {
        self.credit.checked_sub(self.debit)
    }
}
