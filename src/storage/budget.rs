//! Budget document repository
//!
//! The whole document is read and written as one JSON blob. There is no
//! partial update path: every mutation is a read-modify-write of the full
//! document, last writer wins.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HearthError;
use crate::models::BudgetDocument;

use super::file_io::{read_json_lenient, write_json_atomic};

/// Repository for the budget document
pub struct BudgetRepository {
    path: PathBuf,
    document: RwLock<BudgetDocument>,
}

impl BudgetRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            document: RwLock::new(BudgetDocument::default()),
        }
    }

    /// Load the document from disk; missing or corrupt files fall back to
    /// the default document
    pub fn load(&self) -> Result<(), HearthError> {
        let loaded: BudgetDocument = read_json_lenient(&self.path);

        let mut document = self
            .document
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *document = loaded;
        Ok(())
    }

    /// Save the document to disk
    pub fn save(&self) -> Result<(), HearthError> {
        let document = self
            .document
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*document)
    }

    /// Get a snapshot of the current document
    pub fn snapshot(&self) -> Result<BudgetDocument, HearthError> {
        let document = self
            .document
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(document.clone())
    }

    /// Replace the document wholesale (used by import and remote pull)
    pub fn replace(&self, new_document: BudgetDocument) -> Result<(), HearthError> {
        let mut document = self
            .document
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *document = new_document;
        Ok(())
    }

    /// Apply a mutation to the in-memory document
    pub fn update<F, R>(&self, mutate: F) -> Result<R, HearthError>
    where
        F: FnOnce(&mut BudgetDocument) -> R,
    {
        let mut document = self
            .document
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(mutate(&mut document))
    }
}
