//! Expense and savings line items
//!
//! Line items carry the region's native currency. They are created and
//! deleted, never mutated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::ids::EntryId;

/// Expense classification; savings items carry no kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Fixed,
    #[default]
    Variable,
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// A single expense or savings line item in one region ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: EntryId,
    pub name: String,
    pub amount: Amount,
    /// Set for expenses only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExpenseKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl LineItem {
    /// Create an expense line item
    pub fn expense(
        name: impl Into<String>,
        amount: Amount,
        kind: ExpenseKind,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            amount,
            kind: Some(kind),
            date,
        }
    }

    /// Create a savings line item
    pub fn saving(name: impl Into<String>, amount: Amount, date: Option<NaiveDate>) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            amount,
            kind: None,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_carries_kind() {
        let item = LineItem::expense("Rent", Amount::new(900.0).unwrap(), ExpenseKind::Fixed, None);
        assert_eq!(item.kind, Some(ExpenseKind::Fixed));
    }

    #[test]
    fn test_saving_has_no_kind() {
        let item = LineItem::saving("Emergency fund", Amount::new(200.0).unwrap(), None);
        assert!(item.kind.is_none());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ExpenseKind::Fixed).unwrap();
        assert_eq!(json, "\"fixed\"");
        let back: ExpenseKind = serde_json::from_str("\"variable\"").unwrap();
        assert_eq!(back, ExpenseKind::Variable);
    }

    #[test]
    fn test_unique_ids() {
        let a = LineItem::saving("A", Amount::new(1.0).unwrap(), None);
        let b = LineItem::saving("B", Amount::new(1.0).unwrap(), None);
        assert_ne!(a.id, b.id);
    }
}
