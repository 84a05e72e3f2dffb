//! User records for the local credential directory
//!
//! Passwords are stored as Argon2id hashes, never in the clear.
//! Authentication hashes the input and verifies it against the stored hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use crate::error::{HearthError, HearthResult};

/// Access role for a user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A single credential record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    /// Unique case-insensitively across the directory
    pub username: String,
    /// PHC-format Argon2id hash
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new user record, hashing the password
    pub fn new(username: impl Into<String>, password: &str, role: Role) -> HearthResult<Self> {
        Ok(Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: hash_password(password)?,
            role,
            created_at: Utc::now(),
        })
    }

    /// Replace the stored password
    pub fn set_password(&mut self, password: &str) -> HearthResult<()> {
        self.password_hash = hash_password(password)?;
        Ok(())
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Case-insensitive username comparison
    pub fn username_matches(&self, candidate: &str) -> bool {
        self.username.eq_ignore_ascii_case(candidate)
    }
}

/// Hash a password with Argon2id and a fresh random salt
fn hash_password(password: &str) -> HearthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| HearthError::Account(format!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_hashed_at_rest() {
        let user = UserRecord::new("Root", "pw1", Role::Admin).unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_is_case_sensitive() {
        let user = UserRecord::new("Root", "pw1", Role::Admin).unwrap();
        assert!(user.verify_password("pw1"));
        assert!(!user.verify_password("PW1"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_username_match_is_case_insensitive() {
        let user = UserRecord::new("Root", "pw1", Role::Admin).unwrap();
        assert!(user.username_matches("root"));
        assert!(user.username_matches("ROOT"));
        assert!(!user.username_matches("roo"));
    }

    #[test]
    fn test_set_password_rotates_hash() {
        let mut user = UserRecord::new("alice", "old", Role::User).unwrap();
        let old_hash = user.password_hash.clone();

        user.set_password("new").unwrap();
        assert_ne!(user.password_hash, old_hash);
        assert!(user.verify_password("new"));
        assert!(!user.verify_password("old"));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let mut user = UserRecord::new("bob", "pw", Role::User).unwrap();
        user.password_hash = "not-a-phc-string".to_string();
        assert!(!user.verify_password("pw"));
    }
}
