//! Search engine registry
//!
//! A fixed, ordered set of search providers. The order is the order the
//! settings UI presents them in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEngine {
    /// Display name, also the key stored in settings
    pub name: String,
    /// Query-prefix URL; the encoded query is appended verbatim
    pub query_prefix: String,
}

#[derive(Debug, Clone)]
pub struct SearchEngineRegistry {
    engines: Vec<SearchEngine>,
}

impl SearchEngineRegistry {
    /// The engines Kestrel ships with
    pub fn builtin() -> Self {
        Self {
            engines: vec![
                SearchEngine {
                    name: "Google".to_string(),
                    query_prefix: "https://www.google.com/search?q=".to_string(),
                },
                SearchEngine {
                    name: "DuckDuckGo".to_string(),
                    query_prefix: "https://duckduckgo.com/?q=".to_string(),
                },
                SearchEngine {
                    name: "Bing".to_string(),
                    query_prefix: "https://www.bing.com/search?q=".to_string(),
                },
            ],
        }
    }

    pub fn query_prefix(&self, name: &str) -> Option<&str> {
        self.engines
            .iter()
            .find(|engine| engine.name == name)
            .map(|engine| engine.query_prefix.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.engines.iter().any(|engine| engine.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.engines.iter().map(|engine| engine.name.as_str())
    }

    pub fn engines(&self) -> &[SearchEngine] {
        &self.engines
    }
}

impl Default for SearchEngineRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
