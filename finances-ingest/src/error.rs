use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a ledger or its load options.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("opening {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reading ledger: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected 4 fields (date,sender,recipient,amount), found {found}")]
    MalformedRow { line: u64, found: usize },
    #[error("line {line}: empty {column}")]
    EmptyField { line: u64, column: &'static str },
    #[error("reading {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing load options: {0}")]
    Config(#[from] toml::de::Error),
}
