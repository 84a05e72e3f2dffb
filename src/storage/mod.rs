//! Storage layer for Hearth
//!
//! Provides JSON file storage with lenient reads, atomic writes, and
//! automatic directory creation. No transactions: the persisted document is
//! read-modify-written as a whole on every mutation, so a second writer
//! overwrites without merge.

pub mod budget;
pub mod file_io;
pub mod session;
pub mod users;

pub use budget::BudgetRepository;
pub use file_io::{read_json_lenient, write_json_atomic};

pub use session::SessionRepository;
pub use users::UserRepository;

use crate::config::paths::HearthPaths;
use crate::error::HearthError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: HearthPaths,
    pub budget: BudgetRepository,
    pub users: UserRepository,
    pub session: SessionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: HearthPaths) -> Result<Self, HearthError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            budget: BudgetRepository::new(paths.budget_file()),
            users: UserRepository::new(paths.users_file()),
            session: SessionRepository::new(paths.session_file(), paths.theme_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &HearthPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), HearthError> {
        self.budget.load()?;
        self.users.load()?;
        Ok(())
    }

    /// Persist the budget document, logging and dropping any write failure
    ///
    /// The store contract treats writes as fire-and-forget: no retry, no
    /// backpressure, last writer wins.
    pub fn persist_budget(&self) {
        if let Err(e) = self.budget.save() {
            tracing::error!("Failed to persist budget document: {}", e);
        }
    }

    /// Persist the user directory, logging and dropping any write failure
    pub fn persist_users(&self) {
        if let Err(e) = self.users.save() {
            tracing::error!("Failed to persist user directory: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        storage.load_all().unwrap();
        assert!(storage.budget.snapshot().unwrap().is_empty());
    }
}
