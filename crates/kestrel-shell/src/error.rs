//! Shell error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Core(#[from] kestrel_core::CoreError),

    #[error(transparent)]
    Download(#[from] kestrel_core::DownloadError),

    #[error("AI summarization is disabled")]
    AssistDisabled,
}
