//! Income entry model
//!
//! Incomes are recorded in the primary currency. Unlike line items they can
//! be edited in place after creation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::ids::EntryId;

/// A single income entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: EntryId,
    pub name: String,
    pub amount: Amount,
    /// Calendar date of the income; entries without a date are excluded
    /// from date-bounded aggregations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl IncomeEntry {
    /// Create a new income entry
    pub fn new(name: impl Into<String>, amount: Amount, date: Option<NaiveDate>) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            amount,
            date,
        }
    }

    /// Rename the entry
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Change the amount
    pub fn set_amount(&mut self, amount: Amount) {
        self.amount = amount;
    }
}
