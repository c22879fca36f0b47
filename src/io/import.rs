use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use std::io::Read;
use std::sync::Arc;

use crate::application::{AccountService, ManualClock};
use crate::domain::{Amount, OperationKind, parse_amount};

/// One dated line of a journal
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub line: usize,
    pub timestamp: DateTime<Utc>,
    pub account: String,
    pub kind: OperationKind,
    pub amount: Amount,
}

/// Error found on a journal line
#[derive(Debug, Clone, PartialEq)]
pub struct JournalError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Parsed journal: the entries that could be read, and the lines that could not.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    pub entries: Vec<JournalEntry>,
    pub errors: Vec<JournalError>,
}

/// Outcome of replaying a journal
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub applied: usize,
    /// Entries rejected by the account service
    pub rejected: Vec<JournalError>,
    /// Lines of withdrawals that left their account below zero
    pub overdrawn: Vec<usize>,
}

impl Journal {
    /// Read a CSV journal with header `timestamp,account,kind,amount`.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut journal = Journal::default();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    journal.errors.push(JournalError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let timestamp_str = record.get(0).unwrap_or("");
            let account = record.get(1).unwrap_or("");
            let kind_str = record.get(2).unwrap_or("");
            let amount_str = record.get(3).unwrap_or("");

            let timestamp = match parse_timestamp(timestamp_str) {
                Ok(ts) => ts,
                Err(e) => {
                    journal.errors.push(field_error(line, "timestamp", e));
                    continue;
                }
            };

            let Some(kind) = OperationKind::from_str(kind_str) else {
                journal.errors.push(field_error(
                    line,
                    "kind",
                    format!("Unknown operation kind: {}", kind_str),
                ));
                continue;
            };

            let amount = match parse_amount(amount_str) {
                Ok(a) => a,
                Err(e) => {
                    journal
                        .errors
                        .push(field_error(line, "amount", format!("Invalid amount: {}", e)));
                    continue;
                }
            };

            journal.entries.push(JournalEntry {
                line,
                timestamp,
                account: account.to_string(),
                kind,
                amount,
            });
        }

        tracing::debug!(
            entries = journal.entries.len(),
            errors = journal.errors.len(),
            "journal read"
        );
        Ok(journal)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Replay every entry through the service, moving its clock to each entry's timestamp.
    pub fn replay(&self, service: &AccountService<Arc<ManualClock>>) -> ReplayReport {
        let mut report = ReplayReport::default();

        for entry in &self.entries {
            service.clock().set(entry.timestamp);

            let outcome = match entry.kind {
                OperationKind::Deposit => service
                    .deposit_money(&entry.account, entry.amount)
                    .map(|_| true),
                OperationKind::Withdrawal => service.withdraw_money(&entry.account, entry.amount),
            };

            match outcome {
                Ok(non_negative) => {
                    report.applied += 1;
                    if !non_negative {
                        report.overdrawn.push(entry.line);
                    }
                }
                Err(e) => report.rejected.push(JournalError {
                    line: entry.line,
                    field: None,
                    error: e.to_string(),
                }),
            }
        }

        tracing::info!(
            applied = report.applied,
            rejected = report.rejected.len(),
            overdrawn = report.overdrawn.len(),
            "journal replayed"
        );
        report
    }
}

fn field_error(line: usize, field: &str, error: impl ToString) -> JournalError {
    JournalError {
        line,
        field: Some(field.to_string()),
        error: error.to_string(),
    }
}

// Helper function to parse timestamp
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    // Try RFC3339 first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try YYYY-MM-DD format
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    bail!("Invalid timestamp format: {}", s)
}
