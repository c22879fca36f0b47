use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::domain::{AccountStatement, Amount, Operation};

/// Statement document for JSON export
#[derive(Debug, Clone, Serialize)]
pub struct StatementDocument<'a> {
    pub account: &'a str,
    pub generated_at: DateTime<Utc>,
    pub balance: Amount,
    pub operations: &'a [Operation],
}

/// Export statement operations to CSV format
pub fn export_statement_csv<W: Write>(statement: &AccountStatement, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["id", "account", "kind", "timestamp", "credit", "debit"])?;

    let mut count = 0;
    for operation in statement.operations() {
        csv_writer.write_record(&[
            operation.id().to_string(),
            operation.account_number().to_string(),
            operation.kind().as_str().to_string(),
            operation.timestamp().to_rfc3339(),
            operation.credit().to_string(),
            operation.debit().to_string(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Export the statement as a JSON document
pub fn export_statement_json<W: Write>(
    account: &str,
    statement: &AccountStatement,
    generated_at: DateTime<Utc>,
    writer: W,
) -> Result<()> {
    let document = StatementDocument {
        account,
        generated_at,
        balance: statement.balance(),
        operations: statement.operations(),
    };
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}
