//! Generic JSON document store
//!
//! The load/merge/save pair both persisted documents are built on. A
//! document is an ordered JSON object; loading merges it key-by-key onto
//! the caller's defaults so that missing keys fall back individually
//! rather than discarding the whole file.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::Result;

/// An ordered JSON object (`serde_json` is built with `preserve_order`).
pub type JsonMap = Map<String, Value>;

/// Load the document at `path`, or initialize it from `defaults`.
///
/// - Missing file: parent directories are created, `defaults` is written
///   out, and `defaults` is returned.
/// - Present file parsing to an object: each loaded key overwrites its
///   default; keys absent from the file keep their default value; keys
///   unknown to `defaults` are preserved as-is.
/// - Present but malformed (unparseable, or not an object): `defaults` is
///   returned and the file is left untouched.
pub fn load_or_init(path: &Path, defaults: &JsonMap) -> Result<JsonMap> {
    if !path.exists() {
        persist(path, defaults)?;
        return Ok(defaults.clone());
    }

    let raw = fs::read_to_string(path)?;
    let loaded = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "document is not a JSON object, using defaults");
            return Ok(defaults.clone());
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "document is malformed, using defaults");
            return Ok(defaults.clone());
        }
    };

    let mut merged = defaults.clone();
    for (key, value) in loaded {
        merged.insert(key, value);
    }

    Ok(merged)
}

/// Overwrite the document at `path` with `mapping`, pretty-printed.
///
/// Write failures are surfaced to the caller; the settings dialog reports
/// them instead of silently losing the edit.
pub fn persist(path: &Path, mapping: &JsonMap) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let body = serde_json::to_string_pretty(mapping)?;
    fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("start_page_url".to_string(), json!("about:blank"));
        map.insert("search_engine".to_string(), json!("Google"));
        map.insert("theme".to_string(), json!("Automatic"));
        map
    }

    #[test]
    fn test_missing_file_is_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");

        let loaded = load_or_init(&path, &defaults()).unwrap();
        assert_eq!(loaded, defaults());

        // The file now exists and contains exactly the defaults
        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, Value::Object(defaults()));
    }

    #[test]
    fn test_missing_key_falls_back_individually() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"search_engine": "DuckDuckGo"}"#).unwrap();

        let loaded = load_or_init(&path, &defaults()).unwrap();
        assert_eq!(loaded["search_engine"], json!("DuckDuckGo"));
        assert_eq!(loaded["start_page_url"], json!("about:blank"));
        assert_eq!(loaded["theme"], json!("Automatic"));
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"experimental_flag": true}"#).unwrap();

        let loaded = load_or_init(&path, &defaults()).unwrap();
        assert_eq!(loaded["experimental_flag"], json!(true));
        assert_eq!(loaded.len(), defaults().len() + 1);
    }

    #[test]
    fn test_malformed_file_keeps_defaults_and_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json {").unwrap();

        let loaded = load_or_init(&path, &defaults()).unwrap();
        assert_eq!(loaded, defaults());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json {");
    }

    #[test]
    fn test_non_object_document_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let loaded = load_or_init(&path, &defaults()).unwrap();
        assert_eq!(loaded, defaults());
    }

    #[test]
    fn test_persist_then_reload_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let first = load_or_init(&path, &defaults()).unwrap();
        persist(&path, &first).unwrap();
        let second = load_or_init(&path, &defaults()).unwrap();
        assert_eq!(first, second);
    }
}
