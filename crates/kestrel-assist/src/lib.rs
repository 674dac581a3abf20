//! Kestrel Assist
//!
//! Client for the locally installed inference server that backs page and
//! selection summarization. The server speaks the Ollama wire format:
//! `/api/tags` lists installed models, `/api/pull` installs one, and
//! `/api/generate` streams newline-delimited JSON chunks.
//!
//! Failures here must never crash the browser; callers probe with
//! [`AssistClient::is_available`] and disable the feature when the server
//! is unreachable.

mod client;
mod error;

pub use client::{AssistClient, GenerateRequest, DEFAULT_ENDPOINT};
pub use error::AssistError;

pub type Result<T> = std::result::Result<T, AssistError>;
