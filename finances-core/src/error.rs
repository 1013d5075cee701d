use thiserror::Error;

/// Failures converting a raw record field into a typed value.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid amount '{raw}': {source}")]
    InvalidAmount {
        raw: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("amount '{raw}' is not a finite number")]
    NonFiniteAmount { raw: String },
    #[error("invalid date '{raw}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}
