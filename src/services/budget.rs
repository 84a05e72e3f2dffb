//! Budget service
//!
//! Mutations of the budget document: incomes, per-region line items, and
//! the exchange rate. Every mutation rewrites the whole document.

use chrono::NaiveDate;

use crate::error::{HearthError, HearthResult};
use crate::models::{
    Amount, BudgetDocument, Category, EntryId, ExchangeRate, ExpenseKind, IncomeEntry, LineItem,
    Region,
};
use crate::storage::Storage;

/// Service for budget document management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get a snapshot of the current document
    pub fn document(&self) -> HearthResult<BudgetDocument> {
        self.storage.budget.snapshot()
    }

    /// Add an income entry
    pub fn add_income(
        &self,
        name: &str,
        amount: Amount,
        date: Option<NaiveDate>,
    ) -> HearthResult<IncomeEntry> {
        let name = validated_name(name)?;
        let entry = IncomeEntry::new(name, amount, date);

        self.storage.budget.update(|doc| {
            doc.incomes.push(entry.clone());
        })?;
        self.storage.persist_budget();

        Ok(entry)
    }

    /// Edit an income entry in place (name and/or amount)
    pub fn edit_income(
        &self,
        id: EntryId,
        name: Option<&str>,
        amount: Option<Amount>,
    ) -> HearthResult<IncomeEntry> {
        let name = name.map(validated_name).transpose()?;

        let updated = self.storage.budget.update(|doc| {
            let entry = doc.incomes.iter_mut().find(|e| e.id == id)?;
            if let Some(name) = name {
                entry.set_name(name);
            }
            if let Some(amount) = amount {
                entry.set_amount(amount);
            }
            Some(entry.clone())
        })?;

        let entry = updated.ok_or_else(|| HearthError::income_not_found(id.to_string()))?;
        self.storage.persist_budget();
        Ok(entry)
    }

    /// Delete an income entry by id
    pub fn delete_income(&self, id: EntryId) -> HearthResult<()> {
        let removed = self.storage.budget.update(|doc| {
            let pos = doc.incomes.iter().position(|e| e.id == id)?;
            Some(doc.incomes.remove(pos))
        })?;

        if removed.is_none() {
            return Err(HearthError::income_not_found(id.to_string()));
        }
        self.storage.persist_budget();
        Ok(())
    }

    /// Add an expense line item to a region
    pub fn add_expense(
        &self,
        region: Region,
        name: &str,
        amount: Amount,
        kind: ExpenseKind,
        date: Option<NaiveDate>,
    ) -> HearthResult<LineItem> {
        let name = validated_name(name)?;
        let item = LineItem::expense(name, amount, kind, date);

        self.storage.budget.update(|doc| {
            doc.ledger_mut(region).push(Category::Expenses, item.clone());
        })?;
        self.storage.persist_budget();

        Ok(item)
    }

    /// Add a savings line item to a region
    pub fn add_saving(
        &self,
        region: Region,
        name: &str,
        amount: Amount,
        date: Option<NaiveDate>,
    ) -> HearthResult<LineItem> {
        let name = validated_name(name)?;
        let item = LineItem::saving(name, amount, date);

        self.storage.budget.update(|doc| {
            doc.ledger_mut(region).push(Category::Savings, item.clone());
        })?;
        self.storage.persist_budget();

        Ok(item)
    }

    /// Delete a line item from a region and category
    pub fn delete_item(
        &self,
        region: Region,
        category: Category,
        id: EntryId,
    ) -> HearthResult<()> {
        let removed = self
            .storage
            .budget
            .update(|doc| doc.ledger_mut(region).remove(category, id))?;

        if removed.is_none() {
            return Err(HearthError::item_not_found(id.to_string()));
        }
        self.storage.persist_budget();
        Ok(())
    }

    /// Set the exchange rate
    pub fn set_exchange_rate(&self, rate: ExchangeRate) -> HearthResult<()> {
        self.storage.budget.update(|doc| {
            doc.exchange_rate = rate;
        })?;
        self.storage.persist_budget();
        Ok(())
    }
}

/// Reject blank display names at the entry boundary
fn validated_name(name: &str) -> HearthResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HearthError::Validation("Name cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn amount(v: f64) -> Amount {
        Amount::new(v).unwrap()
    }

    #[test]
    fn test_add_and_delete_income() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let entry = service.add_income("Salary", amount(2500.0), None).unwrap();
        assert_eq!(service.document().unwrap().incomes.len(), 1);

        service.delete_income(entry.id).unwrap();
        assert!(service.document().unwrap().incomes.is_empty());

        assert!(service.delete_income(entry.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_edit_income_in_place() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let entry = service.add_income("Salary", amount(2500.0), None).unwrap();
        let updated = service
            .edit_income(entry.id, Some("Base salary"), Some(amount(2600.0)))
            .unwrap();

        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.name, "Base salary");
        assert_eq!(updated.amount.value(), 2600.0);
    }

    #[test]
    fn test_blank_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let err = service.add_income("   ", amount(10.0), None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_line_items_per_region() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .add_expense(Region::Primary, "Rent", amount(900.0), ExpenseKind::Fixed, None)
            .unwrap();
        let secondary = service
            .add_expense(
                Region::Secondary,
                "Family support",
                amount(15000.0),
                ExpenseKind::Fixed,
                None,
            )
            .unwrap();
        service
            .add_saving(Region::Primary, "Emergency fund", amount(200.0), None)
            .unwrap();

        let doc = service.document().unwrap();
        assert_eq!(doc.primary.expenses.len(), 1);
        assert_eq!(doc.secondary.expenses.len(), 1);
        assert_eq!(doc.primary.savings.len(), 1);

        service
            .delete_item(Region::Secondary, Category::Expenses, secondary.id)
            .unwrap();
        assert!(service.document().unwrap().secondary.expenses.is_empty());
    }

    #[test]
    fn test_delete_item_wrong_region_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let item = service
            .add_saving(Region::Secondary, "Local savings", amount(2000.0), None)
            .unwrap();

        let err = service
            .delete_item(Region::Primary, Category::Savings, item.id)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_set_exchange_rate_persists() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .set_exchange_rate(ExchangeRate::new(64.5).unwrap())
            .unwrap();

        // Reload from disk to confirm the write happened
        storage.budget.load().unwrap();
        assert_eq!(service.document().unwrap().exchange_rate.value(), 64.5);
    }
}
