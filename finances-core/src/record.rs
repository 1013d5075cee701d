//! One ledger entry, exactly as it appeared in the source file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::error::RecordError;

/// Fixed positional column names of the headerless ledger file.
pub const COLUMNS: [&str; 4] = ["date", "sender", "recipient", "amount"];

/// A single transfer. Fields hold the trimmed, unconverted strings from the file;
/// typed views are produced on demand by [`date_value`](Self::date_value) and
/// [`amount_value`](Self::amount_value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    date: String,
    sender: String,
    recipient: String,
    amount: String,
}

impl TransferRecord {
    pub fn new(
        date: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Look a field up by its column name. Unknown names yield `None`.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "date" => Some(&self.date),
            "sender" => Some(&self.sender),
            "recipient" => Some(&self.recipient),
            "amount" => Some(&self.amount),
            _ => None,
        }
    }

    pub fn date_value(&self) -> Result<NaiveDate, RecordError> {
        parse_date(&self.date)
    }

    /// Parse the amount as a float. This is the only place a malformed amount surfaces.
    /// `nan`, `inf` and overflowing literals are rejected rather than accumulated.
    pub fn amount_value(&self) -> Result<f64, RecordError> {
        let amount: f64 = self
            .amount
            .parse()
            .map_err(|source| RecordError::InvalidAmount {
                raw: self.amount.clone(),
                source,
            })?;
        if !amount.is_finite() {
            return Err(RecordError::NonFiniteAmount {
                raw: self.amount.clone(),
            });
        }
        Ok(amount)
    }

    /// True if `who` is on either side of the transfer.
    pub fn involves(&self, who: &str) -> bool {
        self.sender == who || self.recipient == who
    }
}
