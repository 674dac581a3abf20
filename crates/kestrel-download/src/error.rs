//! Download error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Download not found: {0}")]
    NotFound(String),

    #[error("Invalid download state: {0}")]
    InvalidState(String),
}
