//! Download manager

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::download::{Download, DownloadState};
use crate::error::DownloadError;
use crate::Result;

/// Session-scoped download ledger. Nothing here outlives the process;
/// the surface owns the bytes on disk.
pub struct DownloadManager {
    downloads: Arc<RwLock<HashMap<String, Download>>>,
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            downloads: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a download request reported by the surface (pending consent)
    pub fn create_download(&self, url: String, suggested_file_name: String) -> Result<Download> {
        let file_name = sanitize_file_name(&suggested_file_name);
        let download = Download::new(url, file_name);

        self.downloads
            .write()
            .insert(download.id.clone(), download.clone());

        tracing::info!(
            download_id = %download.id,
            url = %download.url,
            file_name = %download.file_name,
            "Recorded download request"
        );

        Ok(download)
    }

    pub fn get_download(&self, id: &str) -> Result<Download> {
        self.downloads
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))
    }

    /// Mark a pending download as accepted and running
    pub fn start_download(&self, id: &str) -> Result<Download> {
        let mut download = self.get_download(id)?;

        if download.state != DownloadState::Pending {
            return Err(DownloadError::InvalidState(
                "Download is not in pending state".to_string(),
            ));
        }

        download.state = DownloadState::Downloading;
        self.downloads
            .write()
            .insert(id.to_string(), download.clone());

        tracing::info!(download_id = %id, "Started download");

        Ok(download)
    }

    /// Apply a byte-progress report from the surface
    pub fn update_progress(
        &self,
        id: &str,
        downloaded: u64,
        total: Option<u64>,
    ) -> Result<Download> {
        let mut download = self.get_download(id)?;

        download.downloaded_bytes = downloaded;
        if let Some(t) = total {
            download.total_bytes = Some(t);
        }

        self.downloads
            .write()
            .insert(id.to_string(), download.clone());

        Ok(download)
    }

    pub fn complete_download(&self, id: &str) -> Result<Download> {
        let mut download = self.get_download(id)?;

        download.state = DownloadState::Completed;
        download.completed_at = Some(chrono::Utc::now());

        self.downloads
            .write()
            .insert(id.to_string(), download.clone());

        tracing::info!(download_id = %id, "Completed download");

        Ok(download)
    }

    /// Decline a pending download or abort a running one
    pub fn cancel_download(&self, id: &str) -> Result<Download> {
        let mut download = self.get_download(id)?;

        download.state = DownloadState::Cancelled;
        self.downloads
            .write()
            .insert(id.to_string(), download.clone());

        tracing::info!(download_id = %id, "Cancelled download");

        Ok(download)
    }

    pub fn fail_download(&self, id: &str, reason: &str) -> Result<Download> {
        let mut download = self.get_download(id)?;

        download.state = DownloadState::Failed;
        self.downloads
            .write()
            .insert(id.to_string(), download.clone());

        tracing::warn!(download_id = %id, reason = %reason, "Download failed");

        Ok(download)
    }

    pub fn list_downloads(&self) -> Vec<Download> {
        self.downloads.read().values().cloned().collect()
    }

    pub fn active_downloads(&self) -> Vec<Download> {
        self.downloads
            .read()
            .values()
            .filter(|d| matches!(d.state, DownloadState::Downloading | DownloadState::Pending))
            .cloned()
            .collect()
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DownloadManager {
    fn clone(&self) -> Self {
        Self {
            downloads: Arc::clone(&self.downloads),
        }
    }
}

fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() {
        "download".to_string()
    } else {
        name.to_string()
    }
}
