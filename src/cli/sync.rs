//! Remote sync CLI commands
//!
//! Mirrors the export artifact to a per-app file in the user's Drive
//! storage: push uploads the current export document, pull downloads and
//! imports it through the same validation as a local restore. The OAuth
//! access token comes from `--token` or the HEARTH_DRIVE_TOKEN environment
//! variable; token acquisition itself is out of scope here.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{HearthError, HearthResult};
use crate::remote::DriveClient;
use crate::services::BackupService;
use crate::storage::Storage;

/// Remote sync subcommands
#[derive(Subcommand)]
pub enum SyncCommands {
    /// Check whether a remote copy exists
    Status {
        /// OAuth access token
        #[arg(long, env = "HEARTH_DRIVE_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Upload the local export document, replacing any remote copy
    Push {
        /// OAuth access token
        #[arg(long, env = "HEARTH_DRIVE_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Download the remote copy and restore the budget from it
    Pull {
        /// OAuth access token
        #[arg(long, env = "HEARTH_DRIVE_TOKEN", hide_env_values = true)]
        token: String,
    },
}

/// Handle a sync command
pub fn handle_sync_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SyncCommands,
) -> HearthResult<()> {
    let filename = &settings.remote_filename;

    match cmd {
        SyncCommands::Status { token } => {
            let client = DriveClient::new(token);
            match client.find_file(filename)? {
                Some(file) => println!("Remote copy present: '{}' ({})", file.name, file.id),
                None => println!("No remote copy found."),
            }
        }

        SyncCommands::Push { token } => {
            let client = DriveClient::new(token);
            let payload = BackupService::new(storage).export_json()?;

            let existing = client.find_file(filename)?;
            let replacing = existing.is_some();
            let file_id =
                client.upload(filename, &payload, existing.as_ref().map(|f| f.id.as_str()))?;

            if replacing {
                println!("Replaced remote copy ({})", file_id);
            } else {
                println!("Created remote copy ({})", file_id);
            }
        }

        SyncCommands::Pull { token } => {
            let client = DriveClient::new(token);
            let file = client.find_file(filename)?.ok_or_else(|| {
                HearthError::Remote(format!("No remote file named '{}'", filename))
            })?;

            // Same validation as a local restore: the payload must carry
            // the budget key, anything else is an error, not a wipe
            let contents = client.download(&file.id)?;
            BackupService::new(storage).import_json(&contents)?;
            println!("Local budget replaced from remote copy ({})", file.id);
        }
    }

    Ok(())
}
