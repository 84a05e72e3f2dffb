//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod budget;
pub mod report;
pub mod sync;
pub mod user;

pub use backup::{handle_export_command, handle_import_command};
pub use budget::{
    handle_expense_command, handle_income_command, handle_rate_command, handle_saving_command,
    ExpenseCommands, IncomeCommands, RateCommands, SavingCommands,
};
pub use report::{
    handle_statement_command, handle_summary_command, handle_timeline_command, RangeArgs,
};
pub use sync::{handle_sync_command, SyncCommands};
pub use user::{
    handle_login_command, handle_logout_command, handle_theme_command, handle_user_command,
    handle_whoami_command, ThemeCommands, UserCommands,
};

use chrono::NaiveDate;

use crate::error::{HearthError, HearthResult};

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(input: &str) -> HearthResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| HearthError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input)))
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn entry_date(input: Option<&str>) -> HearthResult<Option<NaiveDate>> {
    match input {
        Some(s) => Ok(Some(parse_date(s)?)),
        None => Ok(Some(chrono::Local::now().date_naive())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-02-14").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
        );
        assert!(parse_date("14/02/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn test_entry_date_defaults_to_today() {
        let today = chrono::Local::now().date_naive();
        assert_eq!(entry_date(None).unwrap(), Some(today));
    }
}
