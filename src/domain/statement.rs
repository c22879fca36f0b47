use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Amount, Operation};

pub const STATEMENT_HEADER: &str = "Operation  | Date           | Credit | Debit";

/// Short French date-time: 14/03/18 15:17
pub const DEFAULT_DATE_PATTERN: &str = "%d/%m/%y %H:%M";

/// Statements are printed at UTC+01:00 unless configured otherwise.
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 3600;

const LINE_END: &str = "\r\n";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementFormatError {
    #[error("UTC offset out of range: {0} seconds")]
    OffsetOutOfRange(i32),

    #[error("Invalid date pattern: {0}")]
    InvalidDatePattern(String),
}

/// How dates are rendered on a printed statement.
/// The date pattern is checked when set, so rendering with it cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFormat {
    utc_offset: FixedOffset,
    date_pattern: String,
}

impl StatementFormat {
    /// Fails when the offset is a day or more away from UTC.
    pub fn with_utc_offset_seconds(seconds: i32) -> Result<Self, StatementFormatError> {
        let utc_offset = FixedOffset::east_opt(seconds)
            .ok_or(StatementFormatError::OffsetOutOfRange(seconds))?;
        Ok(Self {
            utc_offset,
            ..Self::default()
        })
    }

    /// Replace the strftime pattern used for the date column.
    pub fn with_date_pattern(
        mut self,
        pattern: impl Into<String>,
    ) -> Result<Self, StatementFormatError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(StatementFormatError::InvalidDatePattern(pattern));
        }
        self.date_pattern = pattern;
        Ok(self)
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn date_pattern(&self) -> &str {
        &self.date_pattern
    }
}

impl Default for StatementFormat {
    fn default() -> Self {
        Self {
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECONDS)
                .unwrap_or_else(|| Utc.fix()),
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}

/// Point-in-time view of an account: its operations and balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatement {
    operations: Vec<Operation>,
    balance: Amount,
}

impl AccountStatement {
    pub fn new(operations: Vec<Operation>, balance: Amount) -> Self {
        Self {
            operations,
            balance,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Render with the default format (UTC+01:00, dd/mm/yy HH:MM).
    pub fn print(&self) -> String {
        self.to_string()
    }

    /// Render the statement, operations in the order they are held.
    pub fn render(&self, format: &StatementFormat) -> Result<String, fmt::Error> {
        let mut printed = String::new();
        self.write_to(&mut printed, format)?;
        Ok(printed)
    }

    fn write_to(&self, out: &mut impl fmt::Write, format: &StatementFormat) -> fmt::Result {
        out.write_str(STATEMENT_HEADER)?;
        out.write_str(LINE_END)?;

        for operation in &self.operations {
            let date = operation
                .timestamp()
                .with_timezone(&format.utc_offset)
                .format(&format.date_pattern);
            write!(
                out,
                "{:<10} | {} | {:>6} | {:>6}{}",
                operation.kind().label(),
                date,
                operation.credit().to_string(),
                operation.debit().to_string(),
                LINE_END
            )?;
        }

        write!(out, "{LINE_END}Balance{LINE_END}{}{LINE_END}", self.balance)
    }
}

impl fmt::Display for AccountStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, &StatementFormat::default())
    }
}
