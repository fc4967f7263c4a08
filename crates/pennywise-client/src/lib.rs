pub mod commands;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod setup;
pub mod state;
pub mod store;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use ledger::engine::AggregationEngine;
pub use store::TransactionStore;
pub use store::sqlite::SqliteStore;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
