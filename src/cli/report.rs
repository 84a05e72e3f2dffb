//! Reporting CLI commands
//!
//! Renders the monthly summary, the spending timeline, and the
//! running-balance statement.

use clap::Args;

use crate::config::settings::Settings;
use crate::error::HearthResult;
use crate::reports::{DateRange, MonthlySummary, Statement, Timeline};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Date range selection shared by timeline and statement
#[derive(Args)]
pub struct RangeArgs {
    /// Range start (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["week", "month"])]
    pub from: Option<String>,

    /// Range end (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["week", "month"])]
    pub to: Option<String>,

    /// Current calendar week (Monday through Sunday)
    #[arg(long, conflicts_with = "month")]
    pub week: bool,

    /// Current calendar month
    #[arg(long)]
    pub month: bool,
}

impl RangeArgs {
    /// Resolve to a concrete range; defaults to the current month
    pub fn resolve(&self) -> HearthResult<DateRange> {
        let today = chrono::Local::now().date_naive();

        if self.week {
            return Ok(DateRange::week_of(today));
        }
        if self.month || (self.from.is_none() && self.to.is_none()) {
            return Ok(DateRange::month_of(today));
        }

        let month = DateRange::month_of(today);
        let start = match &self.from {
            Some(s) => super::parse_date(s)?,
            None => month.start,
        };
        let end = match &self.to {
            Some(s) => super::parse_date(s)?,
            None => month.end,
        };
        DateRange::new(start, end)
    }
}

/// Handle the summary command
pub fn handle_summary_command(storage: &Storage, settings: &Settings) -> HearthResult<()> {
    let doc = BudgetService::new(storage).document()?;
    let today = chrono::Local::now().date_naive();
    let summary = MonthlySummary::compute(&doc, today);

    let p = &settings.primary_symbol;
    let s = &settings.secondary_symbol;

    println!("Monthly Summary ({})", today.format("%B %Y"));
    println!("{}", "=".repeat(50));
    println!("Income this month:    {:>12.2} {}", summary.income, p);
    println!();
    println!("Primary expenses:     {:>12.2} {}", summary.primary_expenses, p);
    println!("Primary savings:      {:>12.2} {}", summary.primary_savings, p);
    println!(
        "Secondary expenses:   {:>12.2} {}  ({:.2} {})",
        summary.secondary_expenses, p, summary.secondary_expenses_native, s
    );
    println!(
        "Secondary savings:    {:>12.2} {}  ({:.2} {})",
        summary.secondary_savings, p, summary.secondary_savings_native, s
    );
    println!("{}", "-".repeat(50));
    println!("Total expenses:       {:>12.2} {}", summary.total_expenses, p);
    println!("Total savings:        {:>12.2} {}", summary.total_savings, p);
    println!("Remaining:            {:>12.2} {}", summary.remaining, p);

    if summary.is_over_budget() {
        println!();
        println!("Warning: spending and savings exceed this month's income!");
    }

    Ok(())
}

/// Handle the timeline command
pub fn handle_timeline_command(
    storage: &Storage,
    settings: &Settings,
    range: RangeArgs,
) -> HearthResult<()> {
    let doc = BudgetService::new(storage).document()?;
    let range = range.resolve()?;
    let timeline = Timeline::compute(&doc, range);

    println!("Spending timeline {} to {}", range.start, range.end);
    println!("{}", "-".repeat(60));

    if timeline.points.is_empty() {
        println!("No expenses in this range.");
        return Ok(());
    }

    let p = &settings.primary_symbol;
    for point in &timeline.points {
        println!(
            "{}  primary {:>10.2} {}  secondary {:>10.2} {}",
            point.date, point.primary, p, point.secondary, p
        );
    }
    println!("{}", "-".repeat(60));
    println!("Total: {:.2} {}", timeline.total(), p);

    Ok(())
}

/// Handle the statement command
pub fn handle_statement_command(
    storage: &Storage,
    settings: &Settings,
    range: RangeArgs,
) -> HearthResult<()> {
    let doc = BudgetService::new(storage).document()?;
    let range = range.resolve()?;
    let statement = Statement::compute(&doc, range);

    println!("Statement {} to {}", range.start, range.end);
    println!("{}", "=".repeat(78));

    if statement.entries.is_empty() {
        println!("No dated activity in this range.");
        return Ok(());
    }

    let p = &settings.primary_symbol;
    for entry in &statement.entries {
        let date = entry
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let signed = if entry.kind.is_credit() {
            entry.amount
        } else {
            -entry.amount
        };
        println!(
            "{}  {:<18}  {:<24}  {:>+12.2}  {:>12.2} {}",
            date,
            entry.kind.label(),
            entry.name,
            signed,
            entry.balance,
            p
        );
    }

    Ok(())
}
