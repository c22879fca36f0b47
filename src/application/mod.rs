// Application layer - use cases and orchestration over the ledger

mod clock;
pub mod error;
mod service;

pub use clock::*;
pub use error::*;
pub use service::*;
