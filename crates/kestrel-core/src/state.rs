//! Application state container
//!
//! One owned object holds everything the session mutates: settings,
//! bookmarks, and the download ledger. Both documents are loaded once at
//! construction and written back as a full overwrite on every confirmed
//! edit; all writes happen on the UI thread, so the locks only guard
//! reads from background-task spawns.

use parking_lot::RwLock;

use kestrel_config::{Bookmark, BookmarksFile, Settings, SettingsFile};
use kestrel_download::DownloadManager;
use kestrel_navigation::{AddressResolver, ResolvedTarget};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct AppState {
    config: Config,
    settings_file: SettingsFile,
    bookmarks_file: BookmarksFile,
    resolver: AddressResolver,
    settings: RwLock<Settings>,
    bookmarks: RwLock<Vec<Bookmark>>,
    download_manager: DownloadManager,
}

impl AppState {
    /// Load (or initialize) both documents and build the session state
    pub fn new(config: Config) -> Result<Self> {
        let settings_file = SettingsFile::new(config.settings_path.clone());
        let bookmarks_file = BookmarksFile::new(config.bookmarks_path.clone());
        let resolver = AddressResolver::with_builtin_engines();

        let mut settings = settings_file.load_or_init()?;

        // A hand-edited engine name outside the registry is treated like
        // any other malformed settings value: reset to the default.
        if !resolver.registry().contains(&settings.search_engine) {
            tracing::warn!(
                engine = %settings.search_engine,
                "persisted search engine is not registered, falling back to default"
            );
            settings.search_engine = Settings::default().search_engine;
        }

        let bookmarks = bookmarks_file.load_or_init()?;

        tracing::info!(
            settings = %config.settings_path.display(),
            bookmarks = %config.bookmarks_path.display(),
            "Application state loaded"
        );

        Ok(Self {
            config,
            settings_file,
            bookmarks_file,
            resolver,
            settings: RwLock::new(settings),
            bookmarks: RwLock::new(bookmarks),
            download_manager: DownloadManager::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    pub fn download_manager(&self) -> &DownloadManager {
        &self.download_manager
    }

    // === Navigation ===

    /// Resolve address bar input with the currently configured engine
    pub fn resolve_input(&self, input: &str) -> Result<ResolvedTarget> {
        let engine = self.settings.read().search_engine.clone();
        Ok(self.resolver.resolve(input, &engine)?)
    }

    pub fn start_page(&self) -> String {
        self.settings.read().start_page_url.clone()
    }

    // === Settings ===

    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Validate, persist, and adopt a confirmed settings edit
    pub fn update_settings(&self, new: Settings) -> Result<Settings> {
        if !self.resolver.registry().contains(&new.search_engine) {
            return Err(CoreError::Config(format!(
                "Unknown search engine: {}",
                new.search_engine
            )));
        }
        if !new.font_size_in_range() {
            return Err(CoreError::Config(format!(
                "Font size out of range: {}",
                new.default_font_size
            )));
        }

        self.settings_file.save(&new)?;
        *self.settings.write() = new.clone();

        tracing::info!("Settings updated");
        Ok(new)
    }

    // === Bookmarks ===

    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarks.read().clone()
    }

    pub fn bookmark_at(&self, index: usize) -> Result<Bookmark> {
        self.bookmarks
            .read()
            .get(index)
            .cloned()
            .ok_or_else(|| CoreError::Config(format!("No bookmark at position {index}")))
    }

    /// Append a bookmark. Duplicate names are allowed; position is the
    /// identity that matters.
    ///
    /// Like settings updates, the document is written before the
    /// in-memory list adopts the edit, so a failed write leaves the
    /// session and the disk in agreement.
    pub fn add_bookmark(&self, name: String, url: String) -> Result<Vec<Bookmark>> {
        if url.trim().is_empty() {
            return Err(CoreError::Config("Bookmark URL cannot be empty".to_string()));
        }

        let mut bookmarks = self.bookmarks.write();
        let mut updated = bookmarks.clone();
        updated.push(Bookmark::new(name, url));
        self.bookmarks_file.save(&updated)?;

        *bookmarks = updated.clone();
        Ok(updated)
    }

    pub fn remove_bookmark(&self, index: usize) -> Result<Vec<Bookmark>> {
        let mut bookmarks = self.bookmarks.write();
        if index >= bookmarks.len() {
            return Err(CoreError::Config(format!("No bookmark at position {index}")));
        }

        let mut updated = bookmarks.clone();
        updated.remove(index);
        self.bookmarks_file.save(&updated)?;

        *bookmarks = updated.clone();
        Ok(updated)
    }

    pub fn update_bookmark(&self, index: usize, name: String, url: String) -> Result<Vec<Bookmark>> {
        if url.trim().is_empty() {
            return Err(CoreError::Config("Bookmark URL cannot be empty".to_string()));
        }

        let mut bookmarks = self.bookmarks.write();
        let mut updated = bookmarks.clone();
        let slot = updated
            .get_mut(index)
            .ok_or_else(|| CoreError::Config(format!("No bookmark at position {index}")))?;

        slot.name = name;
        slot.url = url;
        self.bookmarks_file.save(&updated)?;

        *bookmarks = updated.clone();
        Ok(updated)
    }
}
