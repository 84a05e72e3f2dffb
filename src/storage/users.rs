//! User directory repository
//!
//! Persists the flat list of credential records as a JSON array.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HearthError;
use crate::models::{UserId, UserRecord};

use super::file_io::{read_json_lenient, write_json_atomic};

/// Repository for user records
pub struct UserRepository {
    path: PathBuf,
    users: RwLock<Vec<UserRecord>>,
}

impl UserRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            users: RwLock::new(Vec::new()),
        }
    }

    /// Load records from disk
    pub fn load(&self) -> Result<(), HearthError> {
        let loaded: Vec<UserRecord> = read_json_lenient(&self.path);

        let mut users = self
            .users
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *users = loaded;
        Ok(())
    }

    /// Save records to disk
    pub fn save(&self) -> Result<(), HearthError> {
        let users = self
            .users
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*users)
    }

    /// Get all records
    pub fn list(&self) -> Result<Vec<UserRecord>, HearthError> {
        let users = self
            .users
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(users.clone())
    }

    /// Get a record by id
    pub fn get(&self, id: UserId) -> Result<Option<UserRecord>, HearthError> {
        let users = self
            .users
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    /// Number of records in the directory
    pub fn count(&self) -> Result<usize, HearthError> {
        let users = self
            .users
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(users.len())
    }

    /// Append a record
    pub fn insert(&self, record: UserRecord) -> Result<(), HearthError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        users.push(record);
        Ok(())
    }

    /// Overwrite a record in place by id
    pub fn update(&self, record: UserRecord) -> Result<(), HearthError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match users.iter_mut().find(|u| u.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(HearthError::user_not_found(record.id.to_string())),
        }
    }

    /// Remove a record by id; returns the removed record if it existed
    pub fn remove(&self, id: UserId) -> Result<Option<UserRecord>, HearthError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let pos = users.iter().position(|u| u.id == id);
        Ok(pos.map(|p| users.remove(p)))
    }

    /// Replace the whole directory (used by seeding)
    pub fn replace_all(&self, records: Vec<UserRecord>) -> Result<(), HearthError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *users = records;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

    fn make_repo(temp_dir: &TempDir) -> UserRepository {
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        repo.load().unwrap();
        repo
    }

    #[test]
    fn test_empty_directory_on_first_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);

        let user = UserRecord::new("root", "pw", Role::Admin).unwrap();
        repo.insert(user.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = make_repo(&temp_dir);
        let list = reloaded.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, user.id);
        assert_eq!(list[0].username, "root");
    }

    #[test]
    fn test_update_overwrites_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);

        let mut user = UserRecord::new("alice", "pw", Role::User).unwrap();
        repo.insert(user.clone()).unwrap();

        user.username = "alicia".to_string();
        repo.update(user.clone()).unwrap();

        assert_eq!(repo.get(user.id).unwrap().unwrap().username, "alicia");
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);

        let user = UserRecord::new("ghost", "pw", Role::User).unwrap();
        assert!(repo.update(user).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_exactly_one() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);

        let a = UserRecord::new("a", "pw", Role::User).unwrap();
        let b = UserRecord::new("b", "pw", Role::User).unwrap();
        repo.insert(a.clone()).unwrap();
        repo.insert(b.clone()).unwrap();

        let removed = repo.remove(a.id).unwrap().unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.remove(a.id).unwrap().is_none());
    }
}
