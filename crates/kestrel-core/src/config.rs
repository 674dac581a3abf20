//! Browser configuration

use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};

/// Default address of the local inference server
const DEFAULT_ASSIST_ENDPOINT: &str = "http://127.0.0.1:11434";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to `settings.json`
    pub settings_path: PathBuf,
    /// Path to `bookmarks.json`
    pub bookmarks_path: PathBuf,
    /// Where accepted downloads land
    pub download_dir: PathBuf,
    /// Base URL of the local inference server
    pub assist_endpoint: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let download_dir = UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| data_dir.join("Downloads"));

        Self {
            settings_path: data_dir.join("settings.json"),
            bookmarks_path: data_dir.join("bookmarks.json"),
            download_dir,
            assist_endpoint: DEFAULT_ASSIST_ENDPOINT.to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        ProjectDirs::from("org", "kestrel-browser", "kestrel")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".kestrel"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
