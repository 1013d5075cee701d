//! Ledger queries: row selection by entity and cutoff date, and balance aggregation.
//!
//! Every query re-reads the store from the first row, so calling one twice with the same
//! arguments gives the same answer. A cutoff date (`until`) is inclusive; pass
//! [`Until::Unbounded`] (or empty text) for no cutoff.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use finances_core::{
    Balance, BalanceSummary, Filters, TransferRecord, Until, filter_row, lazy_filter_row,
};
use finances_ingest::{LedgerStore, LoadOptions};
use tracing::debug;

use crate::error::FinancesError;

/// Balance engine over an immutable ledger.
#[derive(Debug, Clone)]
pub struct Finances {
    store: LedgerStore,
}

impl Finances {
    /// Load the ledger at `path`, rejecting malformed rows.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FinancesError> {
        Self::open_with(path, &LoadOptions::default())
    }

    pub fn open_with(
        path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> Result<Self, FinancesError> {
        Ok(Self::from_store(LedgerStore::from_path(path, options)?))
    }

    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self, FinancesError> {
        Ok(Self::from_store(LedgerStore::from_reader(reader, options)?))
    }

    pub fn from_store(store: LedgerStore) -> Self {
        Self { store }
    }

    /// All rows, unconverted, in ledger order.
    pub fn get_data(&self) -> impl Iterator<Item = &TransferRecord> + '_ {
        self.store.rows()
    }

    /// Rows where `who` is the sender or the recipient, optionally up to `until`.
    pub fn get_data_for<'a>(
        &'a self,
        who: &str,
        until: impl Into<Until>,
    ) -> impl Iterator<Item = &'a TransferRecord> + 'a {
        let parties = Filters::new().with("sender", who).with("recipient", who);
        let cutoff = Into::<Until>::into(until).cutoff();

        self.get_data().filter(move |row| {
            lazy_filter_row(row, &parties) && within(row, cutoff.as_ref())
        })
    }

    /// Rows dated on or before `until`.
    pub fn get_data_until(
        &self,
        until: impl Into<Until>,
    ) -> impl Iterator<Item = &TransferRecord> + '_ {
        let cutoff = Into::<Until>::into(until).cutoff();
        self.get_data().filter(move |row| within(row, cutoff.as_ref()))
    }

    /// Balance of a single entity, optionally up to `until`.
    ///
    /// A self-transfer counts as both money out and money in.
    pub fn get_balance_for(
        &self,
        who: &str,
        until: impl Into<Until>,
    ) -> Result<BalanceSummary, FinancesError> {
        let mut balance = Balance::new(who);
        let mut rows = 0usize;

        for row in self.get_data_for(who, until) {
            let amount = row.amount_value()?;
            if row.sender() == who {
                balance.money_out(amount);
            }
            if row.recipient() == who {
                balance.money_in(amount);
            }
            rows += 1;
        }

        debug!(who, rows, balance = balance.balance(), "computed entity balance");
        Ok(balance.summary())
    }

    /// Balances of every entity seen in the (optionally date-bounded) ledger.
    pub fn get_balance_until(
        &self,
        until: impl Into<Until>,
    ) -> Result<BTreeMap<String, BalanceSummary>, FinancesError> {
        let mut balances = BTreeMap::new();
        for row in self.get_data_until(until) {
            let amount = row.amount_value()?;
            balance_entry(&mut balances, row.sender()).money_out(amount);
            balance_entry(&mut balances, row.recipient()).money_in(amount);
        }

        debug!(entities = balances.len(), "computed ledger balances");
        Ok(balances
            .into_iter()
            .map(|(who, balance)| (who, balance.summary()))
            .collect())
    }

    /// Balances of every entity over the whole ledger.
    pub fn get_balance(&self) -> Result<BTreeMap<String, BalanceSummary>, FinancesError> {
        self.get_balance_until(Until::Unbounded)
    }
}

fn within(row: &TransferRecord, cutoff: Option<&Filters>) -> bool {
    cutoff.is_none_or(|c| filter_row(row, c, true))
}

/// Look up the balance for `who`, creating a zeroed one on first sight.
fn balance_entry<'m>(balances: &'m mut BTreeMap<String, Balance>, who: &str) -> &'m mut Balance {
    balances
        .entry(who.to_string())
        .or_insert_with(|| Balance::new(who))
}
