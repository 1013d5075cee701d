use finances_core::RecordError;
use finances_ingest::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinancesError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Record(#[from] RecordError),
}
