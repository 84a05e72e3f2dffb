//! User settings for Hearth
//!
//! Manages hosting preferences (port, static asset directory, deployment
//! prefix) and the remote mirror filename.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::HearthPaths;
use crate::error::HearthError;

/// User settings for Hearth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Port the local hosting surface listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment path prefix stripped before static file resolution.
    /// Pre-built bundles deployed under a sub-path keep their asset URLs
    /// working when served locally.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Static asset directory served by `hearth serve`. Falls back to the
    /// `public/` directory under the base dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<PathBuf>,

    /// Filename of the mirrored document in the app-private remote folder
    #[serde(default = "default_remote_filename")]
    pub remote_filename: String,

    /// Symbol shown for primary-currency amounts
    #[serde(default = "default_primary_symbol")]
    pub primary_symbol: String,

    /// Symbol shown for secondary-currency amounts
    #[serde(default = "default_secondary_symbol")]
    pub secondary_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_port() -> u16 {
    3006
}

fn default_path_prefix() -> String {
    "/hearth".to_string()
}

fn default_remote_filename() -> String {
    "hearth_db.json".to_string()
}

fn default_primary_symbol() -> String {
    "EUR".to_string()
}

fn default_secondary_symbol() -> String {
    "DOP".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            port: default_port(),
            path_prefix: default_path_prefix(),
            public_dir: None,
            remote_filename: default_remote_filename(),
            primary_symbol: default_primary_symbol(),
            secondary_symbol: default_secondary_symbol(),
        }
    }
}

impl Settings {
    /// Resolve the static asset directory to serve
    pub fn public_dir(&self, paths: &HearthPaths) -> PathBuf {
        self.public_dir
            .clone()
            .unwrap_or_else(|| paths.public_dir())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &HearthPaths) -> Result<Self, HearthError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| HearthError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| HearthError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Create default settings
            let settings = Settings::default();
            // Don't save yet - let caller decide when to persist
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HearthPaths) -> Result<(), HearthError> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| HearthError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| HearthError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.port, 3006);
        assert_eq!(settings.path_prefix, "/hearth");
        assert_eq!(settings.remote_filename, "hearth_db.json");
        assert!(settings.public_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.port = 8088;
        settings.path_prefix = "/finanzas".to_string();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.port, 8088);
        assert_eq!(loaded.path_prefix, "/finanzas");
    }

    #[test]
    fn test_public_dir_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::default();
        assert_eq!(settings.public_dir(&paths), temp_dir.path().join("public"));

        let mut custom = Settings::default();
        custom.public_dir = Some(PathBuf::from("/srv/hearth"));
        assert_eq!(custom.public_dir(&paths), PathBuf::from("/srv/hearth"));
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings.port, deserialized.port);
        assert_eq!(settings.path_prefix, deserialized.path_prefix);
    }
}
