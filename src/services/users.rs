//! User directory service
//!
//! Authentication, account management, and first-run seeding. Usernames
//! match case-insensitively, passwords verify against Argon2id hashes.

use crate::error::{HearthError, HearthResult};
use crate::models::{Role, UserId, UserRecord};
use crate::storage::Storage;

/// Username of the seeded administrator account
pub const ROOT_USERNAME: &str = "root";

/// Bootstrap password for the seeded administrator; shown once at seed time
/// and expected to be rotated with `hearth user passwd`
pub const ROOT_BOOTSTRAP_PASSWORD: &str = "changeme";

/// Service for the credential directory and the login session
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Seed the directory with the root administrator if it is empty
    ///
    /// Returns the seeded record, or None when the directory already has
    /// users. The seed is persisted immediately.
    pub fn seed_if_empty(&self) -> HearthResult<Option<UserRecord>> {
        if self.storage.users.count()? > 0 {
            return Ok(None);
        }

        let root = UserRecord::new(ROOT_USERNAME, ROOT_BOOTSTRAP_PASSWORD, Role::Admin)?;
        self.storage.users.replace_all(vec![root.clone()])?;
        self.storage.users.save()?;

        tracing::info!("Seeded user directory with the {} account", ROOT_USERNAME);
        Ok(Some(root))
    }

    /// Authenticate a username/password pair
    ///
    /// The username match is case-insensitive and must be unambiguous; the
    /// password check is an exact hash verification. Every failure mode maps
    /// to the same generic error so the caller cannot tell which field was
    /// wrong. On success the session marker is persisted.
    pub fn authenticate(&self, username: &str, password: &str) -> HearthResult<UserRecord> {
        let users = self.storage.users.list()?;
        let mut matches = users.iter().filter(|u| u.username_matches(username));

        let candidate = matches.next().ok_or(HearthError::InvalidCredentials)?;
        if matches.next().is_some() {
            // Ambiguous directory state; refuse rather than guess
            return Err(HearthError::InvalidCredentials);
        }

        if !candidate.verify_password(password) {
            return Err(HearthError::InvalidCredentials);
        }

        self.storage.session.set_current_user(candidate)?;
        Ok(candidate.clone())
    }

    /// Clear the login session
    pub fn logout(&self) -> HearthResult<()> {
        self.storage.session.clear()
    }

    /// The last-authenticated user, if a session marker exists
    pub fn current_user(&self) -> Option<UserRecord> {
        self.storage.session.current_user()
    }

    /// List all records
    pub fn list(&self) -> HearthResult<Vec<UserRecord>> {
        self.storage.users.list()
    }

    /// Create a new user
    ///
    /// Rejects usernames that collide case-insensitively with an existing
    /// record.
    pub fn create(&self, username: &str, password: &str, role: Role) -> HearthResult<UserRecord> {
        let username = username.trim();
        if username.is_empty() {
            return Err(HearthError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        let users = self.storage.users.list()?;
        if users.iter().any(|u| u.username_matches(username)) {
            return Err(HearthError::duplicate_user(username));
        }

        let record = UserRecord::new(username, password, role)?;
        self.storage.users.insert(record.clone())?;
        self.storage.persist_users();

        Ok(record)
    }

    /// Update a record in place by id
    ///
    /// Overwrites the username and/or password; a rename that collides with
    /// a different record is rejected.
    pub fn update(
        &self,
        id: UserId,
        username: Option<&str>,
        password: Option<&str>,
    ) -> HearthResult<UserRecord> {
        let mut record = self
            .storage
            .users
            .get(id)?
            .ok_or_else(|| HearthError::user_not_found(id.to_string()))?;

        if let Some(username) = username {
            let username = username.trim();
            if username.is_empty() {
                return Err(HearthError::Validation(
                    "Username cannot be empty".to_string(),
                ));
            }
            let collision = self
                .storage
                .users
                .list()?
                .iter()
                .any(|u| u.id != id && u.username_matches(username));
            if collision {
                return Err(HearthError::duplicate_user(username));
            }
            record.username = username.to_string();
        }

        if let Some(password) = password {
            record.set_password(password)?;
        }

        self.storage.users.update(record.clone())?;
        self.storage.persist_users();

        Ok(record)
    }

    /// Delete a record by id
    ///
    /// The currently authenticated caller cannot delete their own record.
    pub fn delete(&self, id: UserId) -> HearthResult<()> {
        if let Some(current) = self.current_user() {
            if current.id == id {
                return Err(HearthError::Account(
                    "Cannot delete the currently signed-in user".to_string(),
                ));
            }
        }

        let removed = self.storage.users.remove(id)?;
        if removed.is_none() {
            return Err(HearthError::user_not_found(id.to_string()));
        }
        self.storage.persist_users();

        Ok(())
    }
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

    #[test]
    fn test_seed_exactly_once() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let seeded = service.seed_if_empty().unwrap().unwrap();
        assert_eq!(seeded.username, ROOT_USERNAME);
        assert_eq!(seeded.role, Role::Admin);

        // Second call is a no-op
        assert!(service.seed_if_empty().unwrap().is_none());
        assert_eq!(service.list().unwrap().len(), 1);

        // The seed was persisted immediately
        storage.users.load().unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_authenticate_case_rules() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.create("Root", "pw1", Role::Admin).unwrap();

        // Username is case-insensitive
        assert!(service.authenticate("root", "pw1").is_ok());
        // Password is case-sensitive
        assert!(matches!(
            service.authenticate("root", "PW1"),
            Err(HearthError::InvalidCredentials)
        ));
        // Unknown user yields the same generic error
        assert!(matches!(
            service.authenticate("nobody", "pw1"),
            Err(HearthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_sets_session() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        let user = service.create("alice", "secret", Role::User).unwrap();

        assert!(service.current_user().is_none());
        service.authenticate("ALICE", "secret").unwrap();
        assert_eq!(service.current_user().unwrap().id, user.id);

        service.logout().unwrap();
        assert!(service.current_user().is_none());
    }

    #[test]
    fn test_create_rejects_case_insensitive_duplicate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service.create("Yulied", "pw", Role::User).unwrap();
        let err = service.create("yulied", "other", Role::User).unwrap_err();
        assert!(matches!(err, HearthError::Duplicate { .. }));
    }

    #[test]
    fn test_update_overwrites_username_and_password() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let user = service.create("alice", "old", Role::User).unwrap();
        let updated = service
            .update(user.id, Some("alicia"), Some("new"))
            .unwrap();

        assert_eq!(updated.username, "alicia");
        assert!(service.authenticate("alicia", "new").is_ok());
        assert!(service.authenticate("alicia", "old").is_err());
    }

    #[test]
    fn test_update_rename_collision_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        service.create("alice", "pw", Role::User).unwrap();
        let bob = service.create("bob", "pw", Role::User).unwrap();

        let err = service.update(bob.id, Some("ALICE"), None).unwrap_err();
        assert!(matches!(err, HearthError::Duplicate { .. }));
    }

    #[test]
    fn test_delete_own_record_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let me = service.create("me", "pw", Role::Admin).unwrap();
        let other = service.create("other", "pw", Role::User).unwrap();
        service.authenticate("me", "pw").unwrap();

        assert!(service.delete(me.id).is_err());
        assert_eq!(service.list().unwrap().len(), 2);

        // Deleting another record removes exactly one
        service.delete(other.id).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let ghost = UserRecord::new("ghost", "pw", Role::User).unwrap();
        assert!(service.delete(ghost.id).unwrap_err().is_not_found());
    }
}
