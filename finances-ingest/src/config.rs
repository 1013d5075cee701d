//! Load options, optionally read from a TOML file.
//!
//! ```toml
//! on_malformed = "skip"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// What to do with a row that is not exactly `date,sender,recipient,amount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Fail the whole load on the first bad row.
    #[default]
    Reject,
    /// Drop the row and log a warning with its line number.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub on_malformed: MalformedRowPolicy,
}

impl LoadOptions {
    pub fn skip_malformed() -> Self {
        Self {
            on_malformed: MalformedRowPolicy::Skip,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(s)?)
    }

    /// Read options from `path`. A missing file means defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).map_err(|source| LoadError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}
