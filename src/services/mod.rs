//! Business logic layer for Hearth
//!
//! Services wrap the storage repositories with validation and the
//! persist-on-mutation behavior the interaction boundary expects.

pub mod backup;
pub mod budget;
pub mod users;

pub use backup::BackupService;
pub use budget::BudgetService;
pub use users::UserService;
