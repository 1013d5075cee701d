//! finances-ingest: loads headerless `date,sender,recipient,amount` ledgers into memory.

pub mod config;
pub mod error;
pub mod store;

pub use config::{LoadOptions, MalformedRowPolicy};
pub use error::LoadError;
pub use store::LedgerStore;
