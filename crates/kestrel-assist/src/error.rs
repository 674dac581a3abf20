//! Assist error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Inference server error: {0}")]
    Server(String),

    #[error("Malformed stream chunk: {0}")]
    MalformedChunk(#[from] serde_json::Error),
}
