//! Kestrel Downloads
//!
//! The rendering surface performs the transfers; this crate only keeps the
//! books: one record per download request, byte progress as the surface
//! reports it, and a filename-based risk classification that feeds the
//! `download_warnings` setting.

mod download;
mod error;
mod manager;

pub use download::{Download, DownloadState, RiskLevel};
pub use error::DownloadError;
pub use manager::DownloadManager;

pub type Result<T> = std::result::Result<T, DownloadError>;
