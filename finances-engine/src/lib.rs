//! finances-engine: per-entity and global balance queries over a loaded ledger.

pub mod engine;
pub mod error;
pub mod telemetry;

pub use engine::Finances;
pub use error::FinancesError;
pub use telemetry::init_tracing;

pub use finances_core::{BalanceSummary, FilterValue, TransferRecord, Until};
pub use finances_ingest::{LedgerStore, LoadOptions, MalformedRowPolicy};
