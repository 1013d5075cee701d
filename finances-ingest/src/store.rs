//! In-memory ledger store.
//!
//! Each line is `date,sender,recipient,amount` with no header. Fields are trimmed and
//! kept as strings; nothing is converted at load time. The csv reader drops blank lines,
//! so they are recovered from gaps in record line numbers and treated as 0-field rows.
//! Blank lines after the last record leave no gap and are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use finances_core::{COLUMNS, TransferRecord};
use tracing::{info, warn};

use crate::config::{LoadOptions, MalformedRowPolicy};
use crate::error::LoadError;

/// The loaded ledger, in file order. Immutable after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerStore {
    records: Vec<TransferRecord>,
}

impl LedgerStore {
    pub fn from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(file, options, &path.display().to_string())
    }

    /// Load from any reader, e.g. an in-memory string via `s.as_bytes()`.
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self, LoadError> {
        Self::load(reader, options, "reader")
    }

    pub fn from_records(records: Vec<TransferRecord>) -> Self {
        Self { records }
    }

    /// Iterate over every row in file order. Each call starts from the beginning.
    pub fn rows(&self) -> std::slice::Iter<'_, TransferRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn load<R: Read>(reader: R, options: &LoadOptions, source: &str) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut expected_line = 1u64;

        for result in rdr.records() {
            let row = result?;
            let line = row.position().map_or(expected_line, |p| p.line());

            for blank in expected_line..line {
                let err = LoadError::MalformedRow {
                    line: blank,
                    found: 0,
                };
                on_malformed(err, options.on_malformed, source)?;
                skipped += 1;
            }
            expected_line = line + 1 + embedded_newlines(&row);

            match to_transfer(&row, line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    on_malformed(err, options.on_malformed, source)?;
                    skipped += 1;
                }
            }
        }

        info!(source, rows = records.len(), skipped, "ledger loaded");
        Ok(Self { records })
    }
}

/// Fail the load, or log and carry on, depending on `policy`.
fn on_malformed(err: LoadError, policy: MalformedRowPolicy, source: &str) -> Result<(), LoadError> {
    match policy {
        MalformedRowPolicy::Reject => Err(err),
        MalformedRowPolicy::Skip => {
            warn!(source, error = %err, "skipping malformed ledger row");
            Ok(())
        }
    }
}

/// Newlines inside quoted fields advance the line count without starting a record.
fn embedded_newlines(row: &StringRecord) -> u64 {
    row.iter().map(|field| field.matches('\n').count() as u64).sum()
}

fn to_transfer(row: &StringRecord, line: u64) -> Result<TransferRecord, LoadError> {
    if row.len() != COLUMNS.len() {
        return Err(LoadError::MalformedRow {
            line,
            found: row.len(),
        });
    }

    for (idx, column) in [(1, "sender"), (2, "recipient")] {
        if row[idx].is_empty() {
            return Err(LoadError::EmptyField { line, column });
        }
    }

    Ok(TransferRecord::new(&row[0], &row[1], &row[2], &row[3]))
}
