//! Core data models for Hearth
//!
//! This module contains all the data structures that represent the budgeting
//! domain: incomes, per-region line items, the exchange rate, the budget
//! document, and user records.

pub mod amount;
pub mod budget;
pub mod ids;
pub mod income;
pub mod line_item;
pub mod region;
pub mod user;

pub use amount::{Amount, ExchangeRate};
pub use budget::BudgetDocument;
pub use ids::{EntryId, UserId};
pub use income::IncomeEntry;
pub use line_item::{ExpenseKind, LineItem};
pub use region::{Category, Region, RegionLedger};
pub use user::{Role, UserRecord};
