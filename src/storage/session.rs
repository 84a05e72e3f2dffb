//! Session marker and theme flag
//!
//! Two small keys beside the budget document: a snapshot of the
//! last-authenticated user (cleared on logout) and the dark-theme flag.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::HearthError;
use crate::models::UserRecord;

use super::file_io::{read_json_lenient, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionMarker {
    #[serde(default)]
    user: Option<UserRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ThemeFlag {
    #[serde(default)]
    dark_mode: bool,
}

/// Repository for the session marker and the theme flag
pub struct SessionRepository {
    session_path: PathBuf,
    theme_path: PathBuf,
}

impl SessionRepository {
    /// Create a new repository
    pub fn new(session_path: PathBuf, theme_path: PathBuf) -> Self {
        Self {
            session_path,
            theme_path,
        }
    }

    /// Read the last-authenticated user snapshot, if any
    pub fn current_user(&self) -> Option<UserRecord> {
        let marker: SessionMarker = read_json_lenient(&self.session_path);
        marker.user
    }

    /// Persist the authenticated user snapshot
    pub fn set_current_user(&self, user: &UserRecord) -> Result<(), HearthError> {
        write_json_atomic(
            &self.session_path,
            &SessionMarker {
                user: Some(user.clone()),
            },
        )
    }

    /// Clear the session marker
    pub fn clear(&self) -> Result<(), HearthError> {
        if self.session_path.exists() {
            std::fs::remove_file(&self.session_path)
                .map_err(|e| HearthError::Storage(format!("Failed to clear session: {}", e)))?;
        }
        Ok(())
    }

    /// Read the dark-theme flag
    pub fn dark_mode(&self) -> bool {
        let flag: ThemeFlag = read_json_lenient(&self.theme_path);
        flag.dark_mode
    }

    /// Persist the dark-theme flag
    pub fn set_dark_mode(&self, dark_mode: bool) -> Result<(), HearthError> {
        write_json_atomic(&self.theme_path, &ThemeFlag { dark_mode })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

    fn make_repo(temp_dir: &TempDir) -> SessionRepository {
        SessionRepository::new(
            temp_dir.path().join("session.json"),
            temp_dir.path().join("theme.json"),
        )
    }

    #[test]
    fn test_no_session_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);
        assert!(repo.current_user().is_none());
    }

    #[test]
    fn test_set_and_clear_session() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);

        let user = UserRecord::new("root", "pw", Role::Admin).unwrap();
        repo.set_current_user(&user).unwrap();
        assert_eq!(repo.current_user().unwrap().id, user.id);

        repo.clear().unwrap();
        assert!(repo.current_user().is_none());

        // Clearing twice is fine
        repo.clear().unwrap();
    }

    #[test]
    fn test_theme_flag_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repo = make_repo(&temp_dir);

        assert!(!repo.dark_mode());
        repo.set_dark_mode(true).unwrap();
        assert!(repo.dark_mode());
        repo.set_dark_mode(false).unwrap();
        assert!(!repo.dark_mode());
    }
}
