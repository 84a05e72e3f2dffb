//! Background service management
//!
//! Installs the server as a systemd user unit so the bundle stays
//! available across logins. Both operations are idempotent: installing
//! over an existing unit reports it and just starts it, uninstalling a
//! missing unit is a no-op.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{HearthError, HearthResult};

const UNIT_NAME: &str = "hearth.service";

/// Result of an install attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    AlreadyInstalled,
}

/// Result of an uninstall attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed,
    NotInstalled,
}

pub struct ServiceManager {
    unit_dir: PathBuf,
    systemctl_bin: PathBuf,
}

impl ServiceManager {
    /// Manage units in the systemd user directory
    pub fn new() -> HearthResult<Self> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| HearthError::Hosting("HOME is not set".to_string()))?;
        Ok(Self {
            unit_dir: home.join(".config").join("systemd").join("user"),
            systemctl_bin: PathBuf::from("systemctl"),
        })
    }

    pub fn with_unit_dir<P: AsRef<Path>>(unit_dir: P) -> Self {
        Self {
            unit_dir: unit_dir.as_ref().to_path_buf(),
            systemctl_bin: PathBuf::from("systemctl"),
        }
    }

    fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(UNIT_NAME)
    }

    pub fn is_installed(&self) -> bool {
        self.unit_path().exists()
    }

    /// Write the unit file and enable it
    ///
    /// An already-present unit is not rewritten; it is started and
    /// reported as such.
    pub fn install(&self, port: u16) -> HearthResult<InstallOutcome> {
        if self.is_installed() {
            self.systemctl(&["start", UNIT_NAME])?;
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let executable = std::env::current_exe()
            .map_err(|e| HearthError::Hosting(format!("Cannot locate executable: {}", e)))?;

        std::fs::create_dir_all(&self.unit_dir)?;
        std::fs::write(self.unit_path(), render_unit(&executable, port))?;

        self.systemctl(&["daemon-reload"])?;
        self.systemctl(&["enable", "--now", UNIT_NAME])?;

        Ok(InstallOutcome::Installed)
    }

    /// Stop the unit and remove its file
    pub fn uninstall(&self) -> HearthResult<UninstallOutcome> {
        if !self.is_installed() {
            return Ok(UninstallOutcome::NotInstalled);
        }

        self.systemctl(&["disable", "--now", UNIT_NAME])?;
        std::fs::remove_file(self.unit_path())?;
        self.systemctl(&["daemon-reload"])?;

        Ok(UninstallOutcome::Removed)
    }

    fn systemctl(&self, args: &[&str]) -> HearthResult<()> {
        let status = Command::new(&self.systemctl_bin)
            .arg("--user")
            .args(args)
            .status()
            .map_err(|e| HearthError::Hosting(format!("Failed to run systemctl: {}", e)))?;

        if !status.success() {
            return Err(HearthError::Hosting(format!(
                "systemctl --user {} exited with {}",
                args.join(" "),
                status
            )));
        }
        Ok(())
    }
}

fn render_unit(executable: &Path, port: u16) -> String {
    format!(
        "[Unit]\n\
         Description=Hearth budget server\n\
         After=network.target\n\
         \n\
         [Service]\n\
         ExecStart={} serve --port {}\n\
         Restart=on-failure\n\
         \n\
         [Install]\n\
         WantedBy=default.target\n",
        executable.display(),
        port
    )
}
