//! Monthly summary
//!
//! The dashboard numbers: income for the current calendar month, per-region
//! expense and savings totals, their primary-currency normalization, and the
//! remaining balance.

use chrono::NaiveDate;

use crate::models::BudgetDocument;

use super::range::DateRange;

/// Aggregated totals for one calendar month, normalized to the primary currency
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// Income dated inside the month, primary currency
    pub income: f64,
    /// Primary-region expense total, native currency
    pub primary_expenses: f64,
    /// Primary-region savings total, native currency
    pub primary_savings: f64,
    /// Secondary-region expense total, native (secondary) currency
    pub secondary_expenses_native: f64,
    /// Secondary-region savings total, native (secondary) currency
    pub secondary_savings_native: f64,
    /// Secondary-region expense total converted to primary currency
    pub secondary_expenses: f64,
    /// Secondary-region savings total converted to primary currency
    pub secondary_savings: f64,
    /// Combined expense total in primary currency
    pub total_expenses: f64,
    /// Combined savings total in primary currency
    pub total_savings: f64,
    /// income - expenses - savings; negative means over budget
    pub remaining: f64,
}

impl MonthlySummary {
    /// Compute the summary for the calendar month containing `today`
    ///
    /// Region totals cover the whole document; only the income total is
    /// month-filtered, matching the dashboard the numbers feed. Incomes
    /// without a date are excluded from the filter.
    pub fn compute(doc: &BudgetDocument, today: NaiveDate) -> Self {
        let month = DateRange::month_of(today);

        let income: f64 = doc
            .incomes
            .iter()
            .filter(|entry| entry.date.is_some_and(|d| month.contains(d)))
            .map(|entry| entry.amount.value())
            .sum();

        let primary_expenses = doc.primary.expense_total();
        let primary_savings = doc.primary.savings_total();
        let secondary_expenses_native = doc.secondary.expense_total();
        let secondary_savings_native = doc.secondary.savings_total();

        let rate = doc.exchange_rate;
        let secondary_expenses = rate.to_primary(secondary_expenses_native);
        let secondary_savings = rate.to_primary(secondary_savings_native);

        let total_expenses = primary_expenses + secondary_expenses;
        let total_savings = primary_savings + secondary_savings;
        let remaining = income - total_expenses - total_savings;

        Self {
            income,
            primary_expenses,
            primary_savings,
            secondary_expenses_native,
            secondary_savings_native,
            secondary_expenses,
            secondary_savings,
            total_expenses,
            total_savings,
            remaining,
        }
    }

    /// Whether the month is over budget
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExchangeRate, ExpenseKind, IncomeEntry, LineItem};

    const TOLERANCE: f64 = 1e-2;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amount(v: f64) -> Amount {
        Amount::new(v).unwrap()
    }

    /// The reference scenario: one income of 2500, primary expenses 900,
    /// secondary expenses 15000 at rate 64.5, secondary savings 2000,
    /// primary savings 200.
    fn scenario_document() -> BudgetDocument {
        let mut doc = BudgetDocument::default();
        doc.exchange_rate = ExchangeRate::new(64.5).unwrap();
        doc.incomes.push(IncomeEntry::new(
            "Salary",
            amount(2500.0),
            Some(date(2024, 3, 10)),
        ));
        doc.primary.expenses.push(LineItem::expense(
            "Rent",
            amount(900.0),
            ExpenseKind::Fixed,
            Some(date(2024, 3, 1)),
        ));
        doc.secondary.expenses.push(LineItem::expense(
            "Family support",
            amount(15000.0),
            ExpenseKind::Fixed,
            Some(date(2024, 3, 5)),
        ));
        doc.secondary.savings.push(LineItem::saving(
            "Local savings",
            amount(2000.0),
            Some(date(2024, 3, 5)),
        ));
        doc.primary.savings.push(LineItem::saving(
            "Emergency fund",
            amount(200.0),
            Some(date(2024, 3, 1)),
        ));
        doc
    }

    #[test]
    fn test_reference_scenario() {
        let doc = scenario_document();
        let summary = MonthlySummary::compute(&doc, date(2024, 3, 15));

        assert!((summary.income - 2500.0).abs() < TOLERANCE);
        assert!((summary.secondary_expenses - 232.56).abs() < TOLERANCE);
        assert!((summary.total_expenses - 1132.56).abs() < TOLERANCE);
        assert!((summary.total_savings - 231.01).abs() < TOLERANCE);
        assert!((summary.remaining - 1136.43).abs() < TOLERANCE);
        assert!(!summary.is_over_budget());
    }

    #[test]
    fn test_remaining_identity() {
        let doc = scenario_document();
        let summary = MonthlySummary::compute(&doc, date(2024, 3, 15));

        let expected = summary.income - summary.total_expenses - summary.total_savings;
        assert!((summary.remaining - expected).abs() < 1e-9);
    }

    #[test]
    fn test_income_outside_month_excluded() {
        let doc = scenario_document();
        // Income is dated 2024-03-10; computing for April finds none
        let summary = MonthlySummary::compute(&doc, date(2024, 4, 15));

        assert_eq!(summary.income, 0.0);
        assert!(summary.is_over_budget());
    }

    #[test]
    fn test_undated_income_excluded() {
        let mut doc = BudgetDocument::default();
        doc.incomes.push(IncomeEntry::new("Cash", amount(100.0), None));

        let summary = MonthlySummary::compute(&doc, date(2024, 3, 15));
        assert_eq!(summary.income, 0.0);
    }

    #[test]
    fn test_empty_document_all_zero() {
        let doc = BudgetDocument::default();
        let summary = MonthlySummary::compute(&doc, date(2024, 3, 15));

        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.total_savings, 0.0);
        assert_eq!(summary.remaining, 0.0);
    }

    #[test]
    fn test_negative_remaining_not_clamped() {
        let mut doc = BudgetDocument::default();
        doc.primary.expenses.push(LineItem::expense(
            "Rent",
            amount(900.0),
            ExpenseKind::Fixed,
            Some(date(2024, 3, 1)),
        ));

        let summary = MonthlySummary::compute(&doc, date(2024, 3, 15));
        assert_eq!(summary.remaining, -900.0);
        assert!(summary.is_over_budget());
    }
}
