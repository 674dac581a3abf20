//! Kestrel Config
//!
//! Persistence for the two JSON documents the browser keeps on disk:
//! `settings.json` and `bookmarks.json`. Both are loaded once at startup
//! (created from defaults if absent) and written back as a full overwrite
//! whenever the user confirms an edit.

mod bookmarks;
mod error;
mod settings;
pub mod store;

pub use bookmarks::{Bookmark, BookmarksFile};
pub use error::ConfigError;
pub use settings::{Settings, SettingsFile, Theme, FONT_SIZE_MAX, FONT_SIZE_MIN};

pub type Result<T> = std::result::Result<T, ConfigError>;
