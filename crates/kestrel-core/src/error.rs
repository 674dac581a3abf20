//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] kestrel_config::ConfigError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] kestrel_navigation::NavigationError),

    #[error("Download error: {0}")]
    Download(#[from] kestrel_download::DownloadError),

    #[error("Configuration error: {0}")]
    Config(String),
}
