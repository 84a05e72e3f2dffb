//! Backup CLI commands
//!
//! Export the budget and user directory to a JSON artifact, and restore
//! the budget from one.

use std::path::PathBuf;

use crate::error::HearthResult;
use crate::services::BackupService;
use crate::storage::Storage;

/// Handle the export command
pub fn handle_export_command(storage: &Storage, path: Option<PathBuf>) -> HearthResult<()> {
    let service = BackupService::new(storage);
    let today = chrono::Local::now().date_naive();

    let target = path.unwrap_or_else(|| storage.paths().backup_dir());
    let written = service.export_to_path(&target, today)?;

    println!("Exported backup to {}", written.display());
    Ok(())
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: PathBuf) -> HearthResult<()> {
    let service = BackupService::new(storage);
    service.import_from_path(&file)?;

    println!("Imported budget from {}", file.display());
    println!("User accounts in the file were not restored.");
    Ok(())
}
