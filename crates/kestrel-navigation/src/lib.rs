//! Kestrel Navigation
//!
//! Address bar input resolution:
//! 1. URL-shaped input (before or after normalization) → navigate
//! 2. Everything else → search with the configured engine
//!
//! Search engines form a closed registry; asking for an engine that is not
//! registered is a configuration defect, not a user error.

mod error;
mod registry;
mod resolver;

pub use error::NavigationError;
pub use registry::{SearchEngine, SearchEngineRegistry};
pub use resolver::{AddressResolver, ResolvedTarget};

pub type Result<T> = std::result::Result<T, NavigationError>;
