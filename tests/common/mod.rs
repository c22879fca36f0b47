// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use bankledger::{AccountService, Ledger, ManualClock};
use chrono::{DateTime, NaiveDate, Utc};

/// Helper to create a service over an empty ledger with a manual clock
pub fn test_service(start: DateTime<Utc>) -> AccountService<Arc<ManualClock>> {
    AccountService::new(Arc::new(Ledger::new()), Arc::new(ManualClock::new(start)))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Helper to parse an RFC 3339 instant into DateTime<Utc>
pub fn parse_instant(instant: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(instant)
        .unwrap()
        .with_timezone(&Utc)
}

/// The journal used across tests: two deposits and a withdrawal on account 12345
pub const SAMPLE_JOURNAL: &str = "\
timestamp,account,kind,amount
2018-03-12T09:30:00Z,12345,deposit,12.50
2018-03-14T14:17:00Z,12345,withdrawal,6.00
2018-03-13T18:20:00Z,12345,deposit,50.75
2018-03-09,424242,deposit,100.00
";
