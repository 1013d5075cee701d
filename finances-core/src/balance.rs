//! Per-entity running balance.
//!
//! Each transfer amount is rounded to a whole unit *before* it is accumulated, while the
//! derived balance is rounded to two decimals. Fractional cents are therefore lost per
//! transaction, not at display time; totals must match that exactly.

use serde::{Deserialize, Serialize};

/// Mutable accumulator for one entity. `balance` is recomputed on every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    who: String,
    spent: f64,
    received: f64,
    balance: f64,
}

/// Serialized form of a [`Balance`]: `{who, spent, received, balance}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub who: String,
    pub spent: f64,
    pub received: f64,
    pub balance: f64,
}

impl Balance {
    pub fn new(who: impl Into<String>) -> Self {
        Self {
            who: who.into(),
            spent: 0.0,
            received: 0.0,
            balance: 0.0,
        }
    }

    pub fn who(&self) -> &str {
        &self.who
    }

    pub fn spent(&self) -> f64 {
        self.spent
    }

    pub fn received(&self) -> f64 {
        self.received
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Record money leaving the entity.
    pub fn money_out(&mut self, amount: f64) {
        self.spent += amount.round_ties_even();
        self.recalculate();
    }

    /// Record money arriving at the entity.
    pub fn money_in(&mut self, amount: f64) {
        self.received += amount.round_ties_even();
        self.recalculate();
    }

    pub fn summary(&self) -> BalanceSummary {
        BalanceSummary {
            who: self.who.clone(),
            spent: self.spent,
            received: self.received,
            balance: self.balance,
        }
    }

    fn recalculate(&mut self) {
        self.balance = round_cents(self.received - self.spent);
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
