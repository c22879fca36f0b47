pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod storage;

pub use application::{AccountError, AccountService, Clock, ManualClock, SystemClock};
pub use domain::*;
pub use storage::Ledger;
