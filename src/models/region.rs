//! Region ledgers and selectors
//!
//! The household tracks two cost centers ("regions") in different native
//! currencies. Each region holds an ordered expenses list and an ordered
//! savings list.

use serde::{Deserialize, Serialize};

use super::ids::EntryId;
use super::line_item::LineItem;

/// One of the two household cost centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Tracked in the primary currency
    Primary,
    /// Tracked in the secondary currency, converted for aggregation
    Secondary,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// Line item category within a region ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Expenses,
    Savings,
}

/// Expenses and savings for one region, in that region's native currency
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionLedger {
    #[serde(default)]
    pub expenses: Vec<LineItem>,
    #[serde(default)]
    pub savings: Vec<LineItem>,
}

impl RegionLedger {
    /// Get the list for a category
    pub fn items(&self, category: Category) -> &[LineItem] {
        match category {
            Category::Expenses => &self.expenses,
            Category::Savings => &self.savings,
        }
    }

    /// Append a line item to a category
    pub fn push(&mut self, category: Category, item: LineItem) {
        match category {
            Category::Expenses => self.expenses.push(item),
            Category::Savings => self.savings.push(item),
        }
    }

    /// Remove a line item by id; returns the removed item if it existed
    pub fn remove(&mut self, category: Category, id: EntryId) -> Option<LineItem> {
        let list = match category {
            Category::Expenses => &mut self.expenses,
            Category::Savings => &mut self.savings,
        };
        let pos = list.iter().position(|item| item.id == id)?;
        Some(list.remove(pos))
    }

    /// Sum of expense amounts in the native currency
    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().map(|i| i.amount.value()).sum()
    }

    /// Sum of savings amounts in the native currency
    pub fn savings_total(&self) -> f64 {
        self.savings.iter().map(|i| i.amount.value()).sum()
    }
}
