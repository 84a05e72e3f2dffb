//! Configuration module for Hearth
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (hosting port, deployment prefix, remote filename)

pub mod paths;
pub mod settings;

pub use paths::HearthPaths;
pub use settings::Settings;
