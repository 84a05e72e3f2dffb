//! The budget document
//!
//! The whole document is the unit of persistence and the unit of
//! export/import: every mutation rewrites it in full, last writer wins.

use serde::{Deserialize, Serialize};

use super::amount::ExchangeRate;
use super::income::IncomeEntry;
use super::region::{Region, RegionLedger};

/// The complete household budget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetDocument {
    /// Secondary-currency units per one primary-currency unit
    #[serde(default)]
    pub exchange_rate: ExchangeRate,
    #[serde(default)]
    pub incomes: Vec<IncomeEntry>,
    #[serde(default)]
    pub primary: RegionLedger,
    #[serde(default)]
    pub secondary: RegionLedger,
}

impl BudgetDocument {
    /// Get the ledger for a region
    pub fn ledger(&self, region: Region) -> &RegionLedger {
        match region {
            Region::Primary => &self.primary,
            Region::Secondary => &self.secondary,
        }
    }

    /// Get the mutable ledger for a region
    pub fn ledger_mut(&mut self, region: Region) -> &mut RegionLedger {
        match region {
            Region::Primary => &mut self.primary,
            Region::Secondary => &mut self.secondary,
        }
    }

    /// Check whether the document holds any entries at all
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty()
            && self.primary.expenses.is_empty()
            && self.primary.savings.is_empty()
            && self.secondary.expenses.is_empty()
            && self.secondary.savings.is_empty()
    }
}
