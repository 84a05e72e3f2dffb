//! Remote mirror for the exported document
//!
//! A thin adapter over a Drive-style file-storage API: the export artifact
//! is mirrored as a single JSON file inside an application-private remote
//! folder. Last writer wins, same as local storage.

pub mod drive;

pub use drive::{DriveClient, RemoteFile};
