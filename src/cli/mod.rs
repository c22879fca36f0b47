use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::{AccountService, ManualClock};
use crate::domain::StatementFormat;
use crate::io::{Journal, export_statement_csv, export_statement_json};
use crate::storage::Ledger;

/// Bankledger - in-memory bank account ledger
#[derive(Parser)]
#[command(name = "bankledger")]
#[command(about = "Replay a journal of deposits and withdrawals and print account statements")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the statement of an account
    Statement {
        /// Journal file (CSV: timestamp,account,kind,amount)
        #[arg(short, long)]
        journal: String,

        /// Account number
        #[arg(short, long)]
        account: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Offset from UTC used to print dates, in minutes
        #[arg(long, default_value = "60", allow_hyphen_values = true)]
        utc_offset_minutes: i32,

        /// strftime pattern used to print dates (default: %d/%m/%y %H:%M)
        #[arg(long)]
        date_pattern: Option<String>,
    },

    /// Show balance for an account or all accounts
    Balance {
        /// Journal file (CSV: timestamp,account,kind,amount)
        #[arg(short, long)]
        journal: String,

        /// Account number (omit for all accounts)
        account: Option<String>,
    },

    /// Validate a journal without printing anything else
    Check {
        /// Journal file (CSV: timestamp,account,kind,amount)
        #[arg(short, long)]
        journal: String,
    },
}

impl Cli {
    /// Default log filter for this invocation; `RUST_LOG` takes precedence.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "bankledger=debug"
        } else {
            "bankledger=warn"
        }
    }

    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Statement {
                journal,
                account,
                format,
                utc_offset_minutes,
                date_pattern,
            } => {
                let service = replay_journal(&journal)?;
                let statement = service.establish_account_statement(&account);

                match format {
                    OutputFormat::Text => {
                        let Some(seconds) = utc_offset_minutes.checked_mul(60) else {
                            bail!("UTC offset out of range: {} minutes", utc_offset_minutes);
                        };
                        let mut statement_format =
                            StatementFormat::with_utc_offset_seconds(seconds)?;
                        if let Some(pattern) = date_pattern {
                            statement_format = statement_format.with_date_pattern(pattern)?;
                        }
                        let printed = statement
                            .render(&statement_format)
                            .context("Failed to render statement")?;
                        out.write_all(printed.as_bytes())?;
                    }
                    OutputFormat::Csv => {
                        let count = export_statement_csv(&statement, &mut out)?;
                        if self.verbose {
                            eprintln!("Exported {} operations", count);
                        }
                    }
                    OutputFormat::Json => {
                        export_statement_json(&account, &statement, Utc::now(), &mut out)?;
                        writeln!(out)?;
                    }
                }
            }

            Commands::Balance { journal, account } => {
                let service = replay_journal(&journal)?;
                let ledger = service.ledger();

                match account {
                    Some(account) => {
                        writeln!(out, "{}", ledger.calculate_balance(&account))?;
                    }
                    None => {
                        let accounts = ledger.account_numbers();
                        if accounts.is_empty() {
                            writeln!(out, "No accounts found.")?;
                        } else {
                            writeln!(out, "{:<20} {:>12}", "ACCOUNT", "BALANCE")?;
                            writeln!(out, "{}", "-".repeat(33))?;
                            for account in accounts {
                                writeln!(
                                    out,
                                    "{:<20} {:>12}",
                                    account,
                                    ledger.calculate_balance(&account).to_string()
                                )?;
                            }
                        }
                    }
                }
            }

            Commands::Check { journal } => {
                let parsed = read_journal(&journal)?;
                report_errors(&parsed);
                if !parsed.is_valid() {
                    bail!("Journal has {} invalid line(s)", parsed.errors.len());
                }
                writeln!(out, "Journal OK: {} entries", parsed.entries.len())?;
            }
        }

        Ok(())
    }
}

fn read_journal(path: &str) -> Result<Journal> {
    let file = File::open(path).with_context(|| format!("Failed to open journal: {}", path))?;
    Journal::read_csv(file).with_context(|| format!("Failed to read journal: {}", path))
}

fn report_errors(journal: &Journal) {
    for error in journal.errors.iter().take(10) {
        eprintln!(
            "  Line {}: {}{}",
            error.line,
            error
                .field
                .as_ref()
                .map(|f| format!("{}: ", f))
                .unwrap_or_default(),
            error.error
        );
    }
    if journal.errors.len() > 10 {
        eprintln!("  ... and {} more errors", journal.errors.len() - 10);
    }
}

/// Read a journal and replay it into a fresh ledger.
fn replay_journal(path: &str) -> Result<AccountService<Arc<ManualClock>>> {
    let journal = read_journal(path)?;
    if !journal.is_valid() {
        eprintln!("Skipping {} invalid journal line(s):", journal.errors.len());
        report_errors(&journal);
    }

    let service = AccountService::new(
        Arc::new(Ledger::new()),
        Arc::new(ManualClock::new(Utc::now())),
    );
    let report = journal.replay(&service);
    for rejected in &report.rejected {
        tracing::warn!(line = rejected.line, error = %rejected.error, "journal entry rejected");
    }
    for line in &report.overdrawn {
        tracing::warn!(line, "withdrawal left the account overdrawn");
    }

    Ok(service)
}
