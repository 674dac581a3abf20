//! Typed settings document
//!
//! `settings.json` is a flat mapping with a fixed default for every known
//! key. Unknown keys survive a load/save cycle untouched so that newer
//! builds' settings are not destroyed by older ones.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{self, JsonMap};
use crate::Result;

/// Smallest accepted `default_font_size`
pub const FONT_SIZE_MIN: u32 = 10;
/// Largest accepted `default_font_size`
pub const FONT_SIZE_MAX: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
    Automatic,
    Legacy,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Automatic => "Automatic",
            Theme::Legacy => "Legacy",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Light" => Ok(Theme::Light),
            "Dark" => Ok(Theme::Dark),
            "Automatic" => Ok(Theme::Automatic),
            "Legacy" => Ok(Theme::Legacy),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_start_page")]
    pub start_page_url: String,
    #[serde(default = "default_search_engine")]
    pub search_engine: String,
    #[serde(default = "default_theme")]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub bottom_bar_visible: bool,
    #[serde(default = "default_true")]
    pub go_button_visible: bool,
    #[serde(default = "default_true")]
    pub download_warnings: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub javascript_enabled: bool,
    #[serde(default = "default_font_size")]
    pub default_font_size: u32,
    #[serde(default = "default_true")]
    pub scrollbars_enabled: bool,
    #[serde(default)]
    pub ai_summarization_enabled: bool,
    /// Keys this build does not know about, carried through verbatim
    #[serde(flatten)]
    pub extra: JsonMap,
}

fn default_start_page() -> String {
    "about:blank".to_string()
}

fn default_search_engine() -> String {
    "Google".to_string()
}

fn default_theme() -> Theme {
    Theme::Automatic
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_font_size() -> u32 {
    16
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_page_url: default_start_page(),
            search_engine: default_search_engine(),
            theme: default_theme(),
            bottom_bar_visible: true,
            go_button_visible: true,
            download_warnings: true,
            language: default_language(),
            javascript_enabled: true,
            default_font_size: default_font_size(),
            scrollbars_enabled: true,
            ai_summarization_enabled: false,
            extra: JsonMap::new(),
        }
    }
}

impl Settings {
    pub fn font_size_in_range(&self) -> bool {
        (FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&self.default_font_size)
    }

    pub fn to_map(&self) -> Result<JsonMap> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            // A struct always serializes to an object
            _ => unreachable!("Settings serializes to a JSON object"),
        }
    }

    fn from_map(map: JsonMap) -> Self {
        match serde_json::from_value(Value::Object(map)) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "settings document has invalid values, using defaults");
                Settings::default()
            }
        }
    }
}

/// `settings.json` on disk
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load settings, creating the file from defaults if it is absent.
    /// Missing keys fall back to their individual defaults.
    pub fn load_or_init(&self) -> Result<Settings> {
        let defaults = Settings::default().to_map()?;
        let merged = store::load_or_init(&self.path, &defaults)?;
        Ok(Settings::from_map(merged))
    }

    /// Full overwrite of the document on disk.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        store::persist(&self.path, &settings.to_map()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_key() {
        let map = Settings::default().to_map().unwrap();
        for key in [
            "start_page_url",
            "search_engine",
            "theme",
            "bottom_bar_visible",
            "go_button_visible",
            "download_warnings",
            "language",
            "javascript_enabled",
            "default_font_size",
            "scrollbars_enabled",
            "ai_summarization_enabled",
        ] {
            assert!(map.contains_key(key), "missing default for {key}");
        }
    }

    #[test]
    fn test_partial_file_overrides_one_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"search_engine": "DuckDuckGo"}"#).unwrap();

        let settings = SettingsFile::new(path).load_or_init().unwrap();
        assert_eq!(settings.search_engine, "DuckDuckGo");

        let defaults = Settings::default();
        assert_eq!(settings.start_page_url, defaults.start_page_url);
        assert_eq!(settings.theme, defaults.theme);
        assert_eq!(settings.default_font_size, defaults.default_font_size);
        assert_eq!(settings.download_warnings, defaults.download_warnings);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("settings.json"));

        let mut settings = file.load_or_init().unwrap();
        settings.theme = Theme::Dark;
        settings.default_font_size = 22;
        settings.ai_summarization_enabled = true;
        file.save(&settings).unwrap();

        let reloaded = file.load_or_init().unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"theme": "Dark", "future_option": 42}"#).unwrap();

        let file = SettingsFile::new(path.clone());
        let settings = file.load_or_init().unwrap();
        assert_eq!(settings.extra["future_option"], serde_json::json!(42));

        file.save(&settings).unwrap();
        let reloaded = file.load_or_init().unwrap();
        assert_eq!(reloaded.extra["future_option"], serde_json::json!(42));
    }

    #[test]
    fn test_invalid_value_types_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_font_size": "huge"}"#).unwrap();

        let settings = SettingsFile::new(path).load_or_init().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_theme_round_trips_by_name() {
        assert_eq!("Legacy".parse::<Theme>().unwrap(), Theme::Legacy);
        assert_eq!(Theme::Dark.as_str(), "Dark");
        assert!("dark".parse::<Theme>().is_err());
    }

    #[test]
    fn test_font_size_range() {
        let mut settings = Settings::default();
        assert!(settings.font_size_in_range());
        settings.default_font_size = 9;
        assert!(!settings.font_size_in_range());
        settings.default_font_size = 80;
        assert!(settings.font_size_in_range());
    }
}
