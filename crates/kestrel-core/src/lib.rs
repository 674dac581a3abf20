//! Kestrel Core
//!
//! Central coordination layer for the Kestrel browser. The application
//! state (settings, bookmarks, downloads) lives here as one explicitly
//! owned object, never as ambient globals; the rendering widget and the
//! GUI toolkit sit behind the interfaces in [`surface`] and the shell
//! crate.

mod config;
mod error;
mod state;
mod surface;

pub use config::Config;
pub use error::CoreError;
pub use state::AppState;
pub use surface::{RenderingSurface, SurfaceEvent};

// Re-export core components
pub use kestrel_config::{
    Bookmark, BookmarksFile, ConfigError, Settings, SettingsFile, Theme, FONT_SIZE_MAX,
    FONT_SIZE_MIN,
};
pub use kestrel_download::{Download, DownloadError, DownloadManager, DownloadState, RiskLevel};
pub use kestrel_navigation::{
    AddressResolver, NavigationError, ResolvedTarget, SearchEngine, SearchEngineRegistry,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
