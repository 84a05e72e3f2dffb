//! Time-bucketed expense series
//!
//! Groups range-filtered expense items from both regions by calendar date,
//! one point per distinct date, secondary amounts converted to the primary
//! currency. Feeds the spending-over-time chart.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::BudgetDocument;

use super::range::DateRange;

/// One point in the expense timeline, both fields in primary currency
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub primary: f64,
    pub secondary: f64,
}

/// Expense series over a date range, ascending by date
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub range: DateRange,
    pub points: Vec<TimelinePoint>,
}

impl Timeline {
    /// Compute the timeline for a range
    pub fn compute(doc: &BudgetDocument, range: DateRange) -> Self {
        // BTreeMap keeps the output ordered ascending by date
        let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

        for item in &doc.primary.expenses {
            if let Some(date) = item.date.filter(|d| range.contains(*d)) {
                buckets.entry(date).or_default().0 += item.amount.value();
            }
        }

        let rate = doc.exchange_rate;
        for item in &doc.secondary.expenses {
            if let Some(date) = item.date.filter(|d| range.contains(*d)) {
                buckets.entry(date).or_default().1 += rate.to_primary(item.amount.value());
            }
        }

        let points = buckets
            .into_iter()
            .map(|(date, (primary, secondary))| TimelinePoint {
                date,
                primary,
                secondary,
            })
            .collect();

        Self { range, points }
    }

    /// Total spending across all points, primary currency
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.primary + p.secondary).sum()
    }
}
