//! Backup and restore
//!
//! Exports the full document (budget plus user directory) to a single JSON
//! artifact and restores the budget from one. Import replaces the current
//! document wholesale; there is no merge.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HearthError, HearthResult};
use crate::models::{BudgetDocument, UserRecord};
use crate::storage::Storage;

/// The export artifact: budget document plus the full user directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupFile {
    pub budget: BudgetDocument,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// Service for export/import of the whole document
pub struct BackupService<'a> {
    storage: &'a Storage,
}

impl<'a> BackupService<'a> {
    /// Create a new backup service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Assemble the export artifact from current state
    pub fn export_document(&self) -> HearthResult<BackupFile> {
        Ok(BackupFile {
            budget: self.storage.budget.snapshot()?,
            users: self.storage.users.list()?,
        })
    }

    /// Serialize the export artifact as pretty JSON
    pub fn export_json(&self) -> HearthResult<String> {
        let backup = self.export_document()?;
        serde_json::to_string_pretty(&backup)
            .map_err(|e| HearthError::Export(format!("Failed to serialize backup: {}", e)))
    }

    /// Write the export artifact to a file
    ///
    /// When `path` is a directory the dated default filename is appended.
    pub fn export_to_path(&self, path: &Path, today: NaiveDate) -> HearthResult<PathBuf> {
        let target = if path.is_dir() {
            path.join(default_filename(today))
        } else {
            path.to_path_buf()
        };

        let json = self.export_json()?;
        std::fs::write(&target, json)
            .map_err(|e| HearthError::Export(format!("Failed to write backup file: {}", e)))?;

        Ok(target)
    }

    /// Restore the budget document from an export artifact
    ///
    /// The file must parse as JSON and carry the top-level `budget` key;
    /// anything else is an import error and existing state is left
    /// untouched. Users in the artifact are not merged.
    pub fn import_from_path(&self, path: &Path) -> HearthResult<()> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HearthError::Import(format!("Failed to read backup file: {}", e)))?;
        self.import_json(&contents)
    }

    /// Restore the budget document from an export artifact string
    pub fn import_json(&self, contents: &str) -> HearthResult<()> {
        let value: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| HearthError::Import(format!("Not a valid backup file: {}", e)))?;

        let budget_value = value
            .get("budget")
            .ok_or_else(|| HearthError::Import("Backup file has no budget data".to_string()))?;

        let budget: BudgetDocument = serde_json::from_value(budget_value.clone())
            .map_err(|e| HearthError::Import(format!("Malformed budget data: {}", e)))?;

        self.storage.budget.replace(budget)?;
        self.storage.budget.save()?;

        Ok(())
    }
}

/// Dated default filename for export artifacts
pub fn default_filename(today: NaiveDate) -> String {
    format!("hearth-backup-{}.json", today.format("%Y-%m-%d"))
}
