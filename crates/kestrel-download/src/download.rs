//! Download data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadState {
    /// Waiting for user consent
    Pending,
    /// Transfer in progress on the rendering surface
    Downloading,
    /// Transfer finished successfully
    Completed,
    /// Transfer failed
    Failed,
    /// Declined or aborted by the user
    Cancelled,
}

impl DownloadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadState::Pending => "pending",
            DownloadState::Downloading => "downloading",
            DownloadState::Completed => "completed",
            DownloadState::Failed => "failed",
            DownloadState::Cancelled => "cancelled",
        }
    }
}

/// Risk level based on the suggested file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Warning,
    Dangerous,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Download {
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub total_bytes: Option<u64>,
    pub downloaded_bytes: u64,
    pub state: DownloadState,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Download {
    pub fn new(url: String, file_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            file_name,
            total_bytes: None,
            downloaded_bytes: 0,
            state: DownloadState::Pending,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Progress as a percentage (0-100)
    pub fn progress(&self) -> f64 {
        match self.total_bytes {
            Some(total) if total > 0 => {
                (self.downloaded_bytes as f64 / total as f64 * 100.0).min(100.0)
            }
            _ => 0.0,
        }
    }

    /// Risk level from the suggested file name's extension. The surface
    /// hands us a name before any bytes arrive, so this is all there is
    /// to classify on.
    pub fn risk_level(&self) -> RiskLevel {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            // Executables and installers
            "exe" | "msi" | "bat" | "cmd" | "com" | "scr" | "dll" => RiskLevel::Dangerous,
            // Scripts
            "sh" | "ps1" | "js" | "vbs" | "py" => RiskLevel::Warning,
            // Archives
            "zip" | "rar" | "7z" | "tar" | "gz" | "xz" => RiskLevel::Warning,
            // Documents and media
            "pdf" | "txt" | "html" | "css" | "json" | "png" | "jpg" | "jpeg" | "gif" | "webp"
            | "svg" | "mp3" | "mp4" | "ogg" | "webm" | "wav" => RiskLevel::Safe,
            // Unknown defaults to warning
            _ => RiskLevel::Warning,
        }
    }

    /// Whether this download should be gated behind a confirmation when
    /// download warnings are enabled
    pub fn needs_warning(&self) -> bool {
        self.risk_level() != RiskLevel::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_download() {
        let download = Download::new(
            "https://example.com/file.pdf".to_string(),
            "file.pdf".to_string(),
        );

        assert_eq!(download.state, DownloadState::Pending);
        assert_eq!(download.downloaded_bytes, 0);
        assert!(download.completed_at.is_none());
    }

    #[test]
    fn test_progress() {
        let mut download = Download::new(
            "https://example.com/file.zip".to_string(),
            "file.zip".to_string(),
        );

        download.total_bytes = Some(1000);
        download.downloaded_bytes = 500;

        assert!((download.progress() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_progress_without_total() {
        let download = Download::new("https://example.com/f".to_string(), "f".to_string());
        assert_eq!(download.progress(), 0.0);
    }

    #[test]
    fn test_risk_level_by_extension() {
        let mut download = Download::new("https://example.com/x".to_string(), "photo.PNG".to_string());
        assert_eq!(download.risk_level(), RiskLevel::Safe);
        assert!(!download.needs_warning());

        download.file_name = "setup.exe".to_string();
        assert_eq!(download.risk_level(), RiskLevel::Dangerous);
        assert!(download.needs_warning());

        download.file_name = "archive.zip".to_string();
        assert_eq!(download.risk_level(), RiskLevel::Warning);

        download.file_name = "no_extension".to_string();
        assert_eq!(download.risk_level(), RiskLevel::Warning);
    }
}
