//! Closed date ranges for report filtering
//!
//! Ranges are inclusive on both ends; the end bound covers the whole
//! calendar day. Working on `NaiveDate` granularity keeps the 23:59:59.999
//! end-of-day arithmetic of timestamp-based filters out of the picture.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{HearthError, HearthResult};

/// A closed calendar date range [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting an end before the start
    pub fn new(start: NaiveDate, end: NaiveDate) -> HearthResult<Self> {
        if end < start {
            return Err(HearthError::Validation(format!(
                "Range end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `today`, first through last day
    pub fn month_of(today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .unwrap_or(today);
        let end = last_day_of_month(today.year(), today.month()).unwrap_or(today);
        Self { start, end }
    }

    /// The Monday-through-Sunday week containing `today`
    pub fn week_of(today: NaiveDate) -> Self {
        let offset = today.weekday().num_days_from_monday() as i64;
        let start = today - Duration::days(offset);
        let end = start + Duration::days(6);
        Self { start, end }
    }

    /// Whether a date falls inside the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Last calendar day of a month
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
}
