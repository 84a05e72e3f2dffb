//! Budget CLI commands
//!
//! Implements CLI commands for incomes, per-region line items, and the
//! exchange rate.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{HearthError, HearthResult};
use crate::models::{Amount, Category, EntryId, ExchangeRate, ExpenseKind, LineItem, Region};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income entry
    Add {
        /// Display name (e.g., "Salary")
        name: String,

        /// Amount in the primary currency
        amount: String,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List income entries
    List,

    /// Edit an income entry in place
    Edit {
        /// Entry ID (full or prefix)
        id: String,

        /// New display name
        #[arg(short, long)]
        name: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Delete an income entry
    Delete {
        /// Entry ID (full or prefix)
        id: String,
    },
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense line item
    Add {
        /// Display name (e.g., "Rent")
        name: String,

        /// Amount in the region's native currency
        amount: String,

        /// Region ledger
        #[arg(short, long, value_enum, default_value_t = Region::Primary)]
        region: Region,

        /// Fixed or variable expense
        #[arg(short, long, value_enum, default_value_t = ExpenseKind::Variable)]
        kind: ExpenseKind,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expense line items
    List {
        /// Limit to one region
        #[arg(short, long, value_enum)]
        region: Option<Region>,
    },

    /// Delete an expense line item
    Delete {
        /// Item ID (full or prefix)
        id: String,

        /// Region ledger
        #[arg(short, long, value_enum, default_value_t = Region::Primary)]
        region: Region,
    },
}

/// Savings subcommands
#[derive(Subcommand)]
pub enum SavingCommands {
    /// Add a savings line item
    Add {
        /// Display name (e.g., "Emergency fund")
        name: String,

        /// Amount in the region's native currency
        amount: String,

        /// Region ledger
        #[arg(short, long, value_enum, default_value_t = Region::Primary)]
        region: Region,

        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List savings line items
    List {
        /// Limit to one region
        #[arg(short, long, value_enum)]
        region: Option<Region>,
    },

    /// Delete a savings line item
    Delete {
        /// Item ID (full or prefix)
        id: String,

        /// Region ledger
        #[arg(short, long, value_enum, default_value_t = Region::Primary)]
        region: Region,
    },
}

/// Exchange rate subcommands
#[derive(Subcommand)]
pub enum RateCommands {
    /// Show the current exchange rate
    Show,

    /// Set the exchange rate (secondary units per 1 primary unit)
    Set {
        /// New rate (e.g., "64.5")
        value: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> HearthResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        IncomeCommands::Add { name, amount, date } => {
            let amount = parse_amount(&amount)?;
            let date = super::entry_date(date.as_deref())?;

            let entry = service.add_income(&name, amount, date)?;
            println!(
                "Added income '{}': {} {} ({})",
                entry.name, entry.amount, settings.primary_symbol, entry.id
            );
        }

        IncomeCommands::List => {
            let doc = service.document()?;
            if doc.incomes.is_empty() {
                println!("No income entries.");
                println!("Use 'hearth income add <name> <amount>' to add one.");
                return Ok(());
            }

            println!("Income ({})", settings.primary_symbol);
            println!("{}", "-".repeat(60));
            for entry in &doc.incomes {
                println!(
                    "{}  {:<10}  {:<24}  {:>12}",
                    entry.id,
                    format_date(entry.date),
                    entry.name,
                    entry.amount.to_string()
                );
            }
        }

        IncomeCommands::Edit { id, name, amount } => {
            let doc = service.document()?;
            let id = resolve_id(doc.incomes.iter().map(|e| e.id), &id)?;
            let amount = amount.as_deref().map(parse_amount).transpose()?;

            let entry = service.edit_income(id, name.as_deref(), amount)?;
            println!("Updated income '{}': {}", entry.name, entry.amount);
        }

        IncomeCommands::Delete { id } => {
            let doc = service.document()?;
            let id = resolve_id(doc.incomes.iter().map(|e| e.id), &id)?;

            service.delete_income(id)?;
            println!("Deleted income entry {}", id);
        }
    }

    Ok(())
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> HearthResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            name,
            amount,
            region,
            kind,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = super::entry_date(date.as_deref())?;

            let item = service.add_expense(region, &name, amount, kind, date)?;
            println!(
                "Added {} expense '{}': {} {} ({})",
                kind,
                item.name,
                item.amount,
                region_symbol(settings, region),
                item.id
            );
        }

        ExpenseCommands::List { region } => {
            let doc = service.document()?;
            for current in regions(region) {
                print_items(
                    &format!("{} expenses ({})", current, region_symbol(settings, current)),
                    doc.ledger(current).items(Category::Expenses),
                );
            }
        }

        ExpenseCommands::Delete { id, region } => {
            let doc = service.document()?;
            let id = resolve_id(
                doc.ledger(region).items(Category::Expenses).iter().map(|i| i.id),
                &id,
            )?;

            service.delete_item(region, Category::Expenses, id)?;
            println!("Deleted expense {} from {}", id, region);
        }
    }

    Ok(())
}

/// Handle a savings command
pub fn handle_saving_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SavingCommands,
) -> HearthResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        SavingCommands::Add {
            name,
            amount,
            region,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = super::entry_date(date.as_deref())?;

            let item = service.add_saving(region, &name, amount, date)?;
            println!(
                "Added savings '{}': {} {} ({})",
                item.name,
                item.amount,
                region_symbol(settings, region),
                item.id
            );
        }

        SavingCommands::List { region } => {
            let doc = service.document()?;
            for current in regions(region) {
                print_items(
                    &format!("{} savings ({})", current, region_symbol(settings, current)),
                    doc.ledger(current).items(Category::Savings),
                );
            }
        }

        SavingCommands::Delete { id, region } => {
            let doc = service.document()?;
            let id = resolve_id(
                doc.ledger(region).items(Category::Savings).iter().map(|i| i.id),
                &id,
            )?;

            service.delete_item(region, Category::Savings, id)?;
            println!("Deleted savings item {} from {}", id, region);
        }
    }

    Ok(())
}

/// Handle an exchange rate command
pub fn handle_rate_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RateCommands,
) -> HearthResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        RateCommands::Show => {
            let doc = service.document()?;
            println!(
                "1 {} = {} {}",
                settings.primary_symbol, doc.exchange_rate, settings.secondary_symbol
            );
        }

        RateCommands::Set { value } => {
            let rate: ExchangeRate = value.parse()?;

            service.set_exchange_rate(rate)?;
            println!(
                "Exchange rate set: 1 {} = {} {}",
                settings.primary_symbol, rate, settings.secondary_symbol
            );
        }
    }

    Ok(())
}

fn parse_amount(input: &str) -> HearthResult<Amount> {
    input.parse()
}

fn region_symbol(settings: &Settings, region: Region) -> &str {
    match region {
        Region::Primary => &settings.primary_symbol,
        Region::Secondary => &settings.secondary_symbol,
    }
}

fn regions(filter: Option<Region>) -> Vec<Region> {
    match filter {
        Some(region) => vec![region],
        None => vec![Region::Primary, Region::Secondary],
    }
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_items(heading: &str, items: &[LineItem]) {
    println!("{}", heading);
    println!("{}", "-".repeat(60));
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        let kind = item
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| String::new());
        println!(
            "{}  {:<10}  {:<24}  {:>12}  {}",
            item.id,
            format_date(item.date),
            item.name,
            item.amount.to_string(),
            kind
        );
    }
    println!();
}

/// Resolve a user-supplied ID string against known IDs
///
/// Accepts the display form ("ent-1a2b3c4d"), the full UUID, or any
/// unambiguous prefix of either.
pub(crate) fn resolve_id(
    known: impl Iterator<Item = EntryId>,
    input: &str,
) -> HearthResult<EntryId> {
    if let Ok(id) = input.parse::<EntryId>() {
        return Ok(id);
    }

    let bare = input.strip_prefix("ent-").unwrap_or(input);
    let matches: Vec<EntryId> = known
        .filter(|id| id.as_uuid().to_string().starts_with(bare))
        .collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(HearthError::item_not_found(input.to_string())),
        _ => Err(HearthError::Validation(format!(
            "ID '{}' is ambiguous, give more characters",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_id_by_prefix() {
        let a = EntryId::new();
        let b = EntryId::new();
        let ids = vec![a, b];

        let prefix = &a.as_uuid().to_string()[..8];
        assert_eq!(resolve_id(ids.iter().copied(), prefix).unwrap(), a);

        let display = a.to_string();
        assert_eq!(resolve_id(ids.iter().copied(), &display).unwrap(), a);
    }

    #[test]
    fn test_resolve_id_unknown() {
        let ids = vec![EntryId::new()];
        let err = resolve_id(ids.iter().copied(), "deadbeef").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resolve_id_full_uuid() {
        let a = EntryId::new();
        let full = a.as_uuid().to_string();
        assert_eq!(resolve_id(std::iter::empty(), &full).unwrap(), a);
    }
}
