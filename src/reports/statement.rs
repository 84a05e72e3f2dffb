//! Chronological running-balance statement
//!
//! Merges incomes (credits) with every expense and savings item from both
//! regions (debits, secondary converted to primary) into one sequence and
//! computes a running balance in ascending date order.
//!
//! The balance pass deliberately runs over the full unfiltered history
//! before the display window is applied: the balance on any displayed row
//! must reflect everything that happened up to that row, not just the rows
//! inside the window.

use chrono::NaiveDate;

use crate::models::{BudgetDocument, EntryId};

use super::range::DateRange;

/// Where a statement row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    PrimaryExpense,
    PrimarySaving,
    SecondaryExpense,
    SecondarySaving,
}

impl StatementKind {
    /// Credits add to the balance, debits subtract
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Income)
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::PrimaryExpense => "Expense (primary)",
            Self::PrimarySaving => "Saving (primary)",
            Self::SecondaryExpense => "Expense (secondary)",
            Self::SecondarySaving => "Saving (secondary)",
        }
    }
}

/// One row of the statement
#[derive(Debug, Clone, PartialEq)]
pub struct StatementEntry {
    pub id: EntryId,
    pub date: Option<NaiveDate>,
    pub name: String,
    pub kind: StatementKind,
    /// Amount in the primary currency (converted for secondary items)
    pub amount: f64,
    /// Running balance after this row, over the full history
    pub balance: f64,
}

/// The filtered statement view, most recent first
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub range: DateRange,
    pub entries: Vec<StatementEntry>,
}

impl Statement {
    /// Build the statement for a display window
    pub fn compute(doc: &BudgetDocument, range: DateRange) -> Self {
        let rate = doc.exchange_rate;

        // First pass input: every credit and debit in the document
        let mut rows: Vec<StatementEntry> = Vec::new();

        for entry in &doc.incomes {
            rows.push(StatementEntry {
                id: entry.id,
                date: entry.date,
                name: entry.name.clone(),
                kind: StatementKind::Income,
                amount: entry.amount.value(),
                balance: 0.0,
            });
        }
        for item in &doc.primary.expenses {
            rows.push(StatementEntry {
                id: item.id,
                date: item.date,
                name: item.name.clone(),
                kind: StatementKind::PrimaryExpense,
                amount: item.amount.value(),
                balance: 0.0,
            });
        }
        for item in &doc.primary.savings {
            rows.push(StatementEntry {
                id: item.id,
                date: item.date,
                name: item.name.clone(),
                kind: StatementKind::PrimarySaving,
                amount: item.amount.value(),
                balance: 0.0,
            });
        }
        for item in &doc.secondary.expenses {
            rows.push(StatementEntry {
                id: item.id,
                date: item.date,
                name: item.name.clone(),
                kind: StatementKind::SecondaryExpense,
                amount: rate.to_primary(item.amount.value()),
                balance: 0.0,
            });
        }
        for item in &doc.secondary.savings {
            rows.push(StatementEntry {
                id: item.id,
                date: item.date,
                name: item.name.clone(),
                kind: StatementKind::SecondarySaving,
                amount: rate.to_primary(item.amount.value()),
                balance: 0.0,
            });
        }

        // Ascending by date; undated rows sort before any dated row.
        // Stable sort keeps insertion order within a day.
        rows.sort_by_key(|row| row.date);

        // Running balance over the full history, then the display filter
        let mut balance = 0.0;
        let mut entries: Vec<StatementEntry> = Vec::new();

        for mut row in rows {
            if row.kind.is_credit() {
                balance += row.amount;
            } else {
                balance -= row.amount;
            }
            row.balance = balance;

            if row.date.is_some_and(|d| range.contains(d)) {
                entries.push(row);
            }
        }

        // Most recent first for display
        entries.reverse();

        Self { range, entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExchangeRate, ExpenseKind, IncomeEntry, LineItem};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amount(v: f64) -> Amount {
        Amount::new(v).unwrap()
    }

    fn document() -> BudgetDocument {
        let mut doc = BudgetDocument::default();
        doc.exchange_rate = ExchangeRate::new(2.0).unwrap();
        doc.incomes.push(IncomeEntry::new(
            "Salary",
            amount(1000.0),
            Some(date(2024, 3, 1)),
        ));
        doc.primary.expenses.push(LineItem::expense(
            "Rent",
            amount(300.0),
            ExpenseKind::Fixed,
            Some(date(2024, 3, 5)),
        ));
        // 400 secondary units = 200 primary
        doc.secondary.expenses.push(LineItem::expense(
            "Family support",
            amount(400.0),
            ExpenseKind::Variable,
            Some(date(2024, 3, 10)),
        ));
        doc.primary.savings.push(LineItem::saving(
            "Fund",
            amount(100.0),
            Some(date(2024, 3, 20)),
        ));
        doc
    }

    #[test]
    fn test_running_balance_descending_display() {
        let doc = document();
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let statement = Statement::compute(&doc, range);

        // Displayed most recent first
        let names: Vec<&str> = statement.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Fund", "Family support", "Rent", "Salary"]);

        // Balances from the ascending pass: 1000, 700, 500, 400
        let balances: Vec<f64> = statement.entries.iter().map(|e| e.balance).collect();
        assert_eq!(balances, vec![400.0, 500.0, 700.0, 1000.0]);
    }

    #[test]
    fn test_balance_independent_of_filter_window() {
        let doc = document();

        // Window covering only the last row
        let range = DateRange::new(date(2024, 3, 15), date(2024, 3, 31)).unwrap();
        let statement = Statement::compute(&doc, range);

        assert_eq!(statement.entries.len(), 1);
        assert_eq!(statement.entries[0].name, "Fund");
        // Balance still reflects the whole history before the window
        assert_eq!(statement.entries[0].balance, 400.0);
    }

    #[test]
    fn test_signed_sum_matches_last_displayed_balance() {
        let doc = document();
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let statement = Statement::compute(&doc, range);

        // Earliest displayed row is the last element
        let earliest = statement.entries.last().unwrap();
        let signed_sum: f64 = statement
            .entries
            .iter()
            .filter(|e| e.date <= earliest.date)
            .map(|e| if e.kind.is_credit() { e.amount } else { -e.amount })
            .sum();
        assert!((earliest.balance - signed_sum).abs() < 1e-9);
    }

    #[test]
    fn test_undated_rows_feed_balance_but_are_not_displayed() {
        let mut doc = document();
        doc.incomes
            .push(IncomeEntry::new("Old cash", amount(50.0), None));

        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let statement = Statement::compute(&doc, range);

        assert!(statement.entries.iter().all(|e| e.date.is_some()));
        // The undated credit shifted every balance up by 50
        assert_eq!(statement.entries.last().unwrap().balance, 1050.0);
    }

    #[test]
    fn test_empty_document_empty_statement() {
        let doc = BudgetDocument::default();
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let statement = Statement::compute(&doc, range);
        assert!(statement.entries.is_empty());
    }

    #[test]
    fn test_conversion_uses_division() {
        let doc = document();
        let range = DateRange::new(date(2024, 3, 10), date(2024, 3, 10)).unwrap();
        let statement = Statement::compute(&doc, range);

        assert_eq!(statement.entries.len(), 1);
        assert_eq!(statement.entries[0].kind, StatementKind::SecondaryExpense);
        assert_eq!(statement.entries[0].amount, 200.0);
    }
}
