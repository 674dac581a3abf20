//! Bookmarks document
//!
//! Persisted as a JSON object mapping display name to URL. In memory the
//! list is an ordered sequence of records, because the UI permits
//! duplicate names and edits address bookmarks by position. Writing the
//! name-keyed form collapses duplicate names (last occurrence wins).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{self, JsonMap};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub url: String,
}

impl Bookmark {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

pub fn from_map(map: JsonMap) -> Vec<Bookmark> {
    map.into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(url) => Some(Bookmark { name, url }),
            other => {
                tracing::warn!(name = %name, value = %other, "ignoring non-string bookmark entry");
                None
            }
        })
        .collect()
}

pub fn to_map(bookmarks: &[Bookmark]) -> JsonMap {
    let mut map = JsonMap::new();
    for bookmark in bookmarks {
        map.insert(bookmark.name.clone(), Value::String(bookmark.url.clone()));
    }
    map
}

/// `bookmarks.json` on disk
pub struct BookmarksFile {
    path: PathBuf,
}

impl BookmarksFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the bookmark list, creating an empty document if absent.
    /// There are no required keys, so whatever object is on disk is
    /// accepted verbatim.
    pub fn load_or_init(&self) -> Result<Vec<Bookmark>> {
        let merged = store::load_or_init(&self.path, &JsonMap::new())?;
        Ok(from_map(merged))
    }

    /// Full overwrite of the document on disk.
    pub fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        store::persist(&self.path, &to_map(bookmarks))
    }
}
