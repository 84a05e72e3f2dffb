//! Aggregation engine for Hearth
//!
//! Pure calculations over a budget document snapshot: the monthly summary,
//! the date-bucketed expense timeline, and the chronological running-balance
//! statement.
//!
//! Date policy: items without a date are excluded from every date-bounded
//! aggregation. The statement still counts them in the running balance (they
//! order before any dated entry) but never shows them inside a filter window.

pub mod range;
pub mod statement;
pub mod summary;
pub mod timeline;

pub use range::DateRange;
pub use statement::{Statement, StatementEntry, StatementKind};
pub use summary::MonthlySummary;
pub use timeline::{Timeline, TimelinePoint};
