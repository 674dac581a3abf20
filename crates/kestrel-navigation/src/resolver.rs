//! Address bar input resolution
//!
//! A string the user types is either a navigable URL or a search query.
//! Normalization prepends `https://` to bare hosts; both the normalized
//! candidate and the raw input are tested against the URL-shape grammar,
//! because some valid forms (`file:///...`) are not recoverable once a
//! second scheme has been prepended.

use url::Url;

use crate::error::NavigationError;
use crate::registry::SearchEngineRegistry;
use crate::Result;

/// Schemes the grammar recognizes
const RECOGNIZED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps", "file"];

/// Scheme prepended to bare host input
const DEFAULT_SCHEME: &str = "https";

/// The absolute URL the rendering surface should load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// The input itself, normalized into URL form
    Navigate(String),
    /// A search-engine URL carrying the encoded input as its query
    Search(String),
}

impl ResolvedTarget {
    pub fn url(&self) -> &str {
        match self {
            ResolvedTarget::Navigate(url) | ResolvedTarget::Search(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            ResolvedTarget::Navigate(url) | ResolvedTarget::Search(url) => url,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, ResolvedTarget::Search(_))
    }
}

pub struct AddressResolver {
    registry: SearchEngineRegistry,
}

impl AddressResolver {
    pub fn new(registry: SearchEngineRegistry) -> Self {
        Self { registry }
    }

    pub fn with_builtin_engines() -> Self {
        Self::new(SearchEngineRegistry::builtin())
    }

    pub fn registry(&self) -> &SearchEngineRegistry {
        &self.registry
    }

    /// Resolve user input against the named engine.
    ///
    /// Pure function of its inputs and the registry. The engine name must
    /// be registered; settings only offer registered names, so a miss here
    /// is a configuration defect.
    pub fn resolve(&self, input: &str, engine: &str) -> Result<ResolvedTarget> {
        let prefix = self
            .registry
            .query_prefix(engine)
            .ok_or_else(|| NavigationError::UnknownSearchEngine(engine.to_string()))?;

        let trimmed = input.trim();
        let normalized = normalize(trimmed);

        if (matches_url_grammar(&normalized) || matches_url_grammar(trimmed))
            && Url::parse(&normalized).is_ok()
        {
            return Ok(ResolvedTarget::Navigate(normalized));
        }

        tracing::debug!(input = %trimmed, engine = %engine, "input resolved to search");
        Ok(ResolvedTarget::Search(format!(
            "{prefix}{}",
            urlencoding::encode(trimmed)
        )))
    }
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::with_builtin_engines()
    }
}

/// Prepend the default scheme unless the input already carries a
/// recognized one.
fn normalize(input: &str) -> String {
    if has_recognized_scheme(input) {
        input.to_string()
    } else {
        format!("{DEFAULT_SCHEME}://{input}")
    }
}

fn has_recognized_scheme(input: &str) -> bool {
    split_scheme(input).is_some()
}

/// Split `scheme://rest`, accepting only recognized schemes,
/// case-insensitively.
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let idx = input.find("://")?;
    let scheme = &input[..idx];
    RECOGNIZED_SCHEMES
        .iter()
        .any(|known| scheme.eq_ignore_ascii_case(known))
        .then(|| (scheme, &input[idx + 3..]))
}

/// Anchored, case-insensitive URL-shape check.
///
/// `scheme://` followed by a dotted domain with an alphabetic top-level
/// label of 2+ characters, `localhost`, or a dotted-quad IPv4 address,
/// an optional `:port`, and an optional whitespace-free path/query.
/// `file://` instead takes an absolute path.
fn matches_url_grammar(input: &str) -> bool {
    let Some((scheme, rest)) = split_scheme(input) else {
        return false;
    };

    if scheme.eq_ignore_ascii_case("file") {
        return rest.starts_with('/') && !rest.chars().any(char::is_whitespace);
    }

    let (authority, path) = split_authority(rest);
    if authority.is_empty() || !is_valid_path(path) {
        return false;
    }

    let host = match authority.split_once(':') {
        Some((host, port)) => {
            if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            host
        }
        None => authority,
    };

    host.eq_ignore_ascii_case("localhost") || is_ipv4(host) || is_valid_domain(host)
}

/// Cut `host[:port]` off at the first path or query delimiter.
fn split_authority(rest: &str) -> (&str, &str) {
    match rest.find(['/', '?']) {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    }
}

/// Empty, a bare `/`, or a delimiter followed by non-whitespace.
fn is_valid_path(path: &str) -> bool {
    path.is_empty()
        || path == "/"
        || (path.len() > 1 && !path.chars().any(char::is_whitespace))
}

fn is_ipv4(host: &str) -> bool {
    let quads: Vec<&str> = host.split('.').collect();
    quads.len() == 4
        && quads
            .iter()
            .all(|quad| !quad.is_empty() && quad.len() <= 3 && quad.chars().all(|c| c.is_ascii_digit()))
}

fn is_valid_domain(host: &str) -> bool {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let (tld, rest) = labels.split_last().unwrap_or((&"", &[]));
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    rest.iter().all(|label| is_valid_label(label))
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }

    let bytes = label.as_bytes();
    let edge_ok = |b: u8| b.is_ascii_alphanumeric();
    edge_ok(bytes[0])
        && edge_ok(bytes[bytes.len() - 1])
        && bytes.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> AddressResolver {
        AddressResolver::with_builtin_engines()
    }

    #[test]
    fn test_full_url_unchanged() {
        match resolver().resolve("https://example.com/path?x=1", "Google").unwrap() {
            ResolvedTarget::Navigate(url) => assert_eq!(url, "https://example.com/path?x=1"),
            other => panic!("Expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_domain_gets_scheme() {
        match resolver().resolve("example.com", "Google").unwrap() {
            ResolvedTarget::Navigate(url) => assert_eq!(url, "https://example.com"),
            other => panic!("Expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_localhost_with_port() {
        for engine in ["Google", "DuckDuckGo", "Bing"] {
            match resolver().resolve("localhost:8080", engine).unwrap() {
                ResolvedTarget::Navigate(url) => assert_eq!(url, "https://localhost:8080"),
                other => panic!("Expected Navigate, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_file_url() {
        match resolver()
            .resolve("file:///abs/path/to/file.html", "DuckDuckGo")
            .unwrap()
        {
            ResolvedTarget::Navigate(url) => assert_eq!(url, "file:///abs/path/to/file.html"),
            other => panic!("Expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_ipv4_with_port_and_path() {
        match resolver().resolve("192.168.1.1:8080/admin", "Google").unwrap() {
            ResolvedTarget::Navigate(url) => assert_eq!(url, "https://192.168.1.1:8080/admin"),
            other => panic!("Expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_uppercase_scheme_and_host() {
        match resolver().resolve("HTTPS://EXAMPLE.COM", "Google").unwrap() {
            ResolvedTarget::Navigate(url) => assert_eq!(url, "HTTPS://EXAMPLE.COM"),
            other => panic!("Expected Navigate, got {other:?}"),
        }
    }

    #[test]
    fn test_query_is_searched_and_encoded() {
        match resolver().resolve("rust programming", "Google").unwrap() {
            ResolvedTarget::Search(url) => {
                assert_eq!(url, "https://www.google.com/search?q=rust%20programming");
            }
            other => panic!("Expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        match resolver().resolve("fish & chips #1", "DuckDuckGo").unwrap() {
            ResolvedTarget::Search(url) => {
                assert_eq!(url, "https://duckduckgo.com/?q=fish%20%26%20chips%20%231");
            }
            other => panic!("Expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_undotted_host_falls_back_to_search() {
        // "https://foo" has a recognized scheme but no valid host shape
        let target = resolver().resolve("https://foo", "Google").unwrap();
        assert!(target.is_search());

        let target = resolver().resolve("kestrel", "Google").unwrap();
        assert!(target.is_search());
    }

    #[test]
    fn test_empty_input_searches_for_nothing() {
        match resolver().resolve("", "Bing").unwrap() {
            ResolvedTarget::Search(url) => assert_eq!(url, "https://www.bing.com/search?q="),
            other => panic!("Expected Search, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_engine_is_an_error() {
        let err = resolver().resolve("anything", "AltaVista").unwrap_err();
        assert!(matches!(err, NavigationError::UnknownSearchEngine(name) if name == "AltaVista"));
    }

    #[test]
    fn test_numeric_tld_is_not_a_domain() {
        let target = resolver().resolve("example.123", "Google").unwrap();
        assert!(target.is_search());
    }

    #[test]
    fn test_path_with_space_is_a_query() {
        let target = resolver().resolve("example.com/some path", "Google").unwrap();
        assert!(target.is_search());
    }
}
