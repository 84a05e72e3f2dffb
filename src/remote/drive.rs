//! Drive-style remote storage client
//!
//! Holds the access token and HTTP client explicitly; callers create one
//! instance on demand and pass it to the sync operations. The token comes
//! from the provider's consent flow out-of-band (flag or environment
//! variable).
//!
//! Uploads use a multipart/related body with a fixed boundary: a JSON
//! metadata part naming the file, then the JSON payload itself. A known
//! prior file id switches the request from create to replace.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{HearthError, HearthResult};

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Fixed multipart boundary marker
const BOUNDARY: &str = "-------314159265358979323846";

/// App-private folder space the mirrored file lives in
const APP_FOLDER: &str = "appDataFolder";

/// A file handle in the remote folder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<RemoteFile>,
}

/// Client for the remote file-storage API
pub struct DriveClient {
    http: Client,
    token: String,
}

impl DriveClient {
    /// Create a client from a bearer access token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
        }
    }

    /// Locate the mirrored file by exact name in the app-private folder
    pub fn find_file(&self, filename: &str) -> HearthResult<Option<RemoteFile>> {
        let response = self
            .http
            .get(format!("{}/files", API_BASE))
            .bearer_auth(&self.token)
            .query(&[
                ("spaces", APP_FOLDER),
                ("q", &format!("name = '{}'", filename)),
                ("fields", "files(id, name)"),
            ])
            .send()
            .map_err(|e| HearthError::Remote(format!("File lookup failed: {}", e)))?;

        let response = check_status(response)?;
        let listing: FileListResponse = response
            .json()
            .map_err(|e| HearthError::Remote(format!("Malformed file listing: {}", e)))?;

        Ok(listing.files.into_iter().next())
    }

    /// Upload the JSON payload, creating or replacing the remote file
    ///
    /// Returns the id of the written file.
    pub fn upload(
        &self,
        filename: &str,
        payload: &str,
        existing_id: Option<&str>,
    ) -> HearthResult<String> {
        let body = multipart_body(filename, payload, existing_id.is_none());

        let request = match existing_id {
            Some(id) => self.http.patch(format!("{}/files/{}", UPLOAD_BASE, id)),
            None => self.http.post(format!("{}/files", UPLOAD_BASE)),
        };

        let response = request
            .bearer_auth(&self.token)
            .query(&[("uploadType", "multipart")])
            .header(
                "Content-Type",
                format!("multipart/related; boundary=\"{}\"", BOUNDARY),
            )
            .body(body)
            .send()
            .map_err(|e| HearthError::Remote(format!("Upload failed: {}", e)))?;

        let response = check_status(response)?;
        let file: RemoteFile = response
            .json()
            .map_err(|e| HearthError::Remote(format!("Malformed upload response: {}", e)))?;

        Ok(file.id)
    }

    /// Download the raw JSON payload of a remote file by id
    pub fn download(&self, file_id: &str) -> HearthResult<String> {
        let response = self
            .http
            .get(format!("{}/files/{}", API_BASE, file_id))
            .bearer_auth(&self.token)
            .query(&[("alt", "media")])
            .send()
            .map_err(|e| HearthError::Remote(format!("Download failed: {}", e)))?;

        let response = check_status(response)?;
        response
            .text()
            .map_err(|e| HearthError::Remote(format!("Failed to read payload: {}", e)))
    }
}

/// Map non-success HTTP statuses to remote errors
fn check_status(
    response: reqwest::blocking::Response,
) -> HearthResult<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(HearthError::Remote(format!(
        "Request failed with {}: {}",
        status, body
    )))
}

/// Build the two-part multipart/related body
///
/// The metadata part names the file; the parents field is only set on
/// create, replacing an existing file keeps its folder.
fn multipart_body(filename: &str, payload: &str, is_create: bool) -> String {
    let metadata = if is_create {
        serde_json::json!({
            "name": filename,
            "mimeType": "application/json",
            "parents": [APP_FOLDER],
        })
    } else {
        serde_json::json!({
            "name": filename,
            "mimeType": "application/json",
        })
    };

    let delimiter = format!("\r\n--{}\r\n", BOUNDARY);
    let close_delimiter = format!("\r\n--{}--", BOUNDARY);

    format!(
        "{delimiter}Content-Type: application/json\r\n\r\n{metadata}\
         {delimiter}Content-Type: application/json\r\n\r\n{payload}{close_delimiter}"
    )
}
