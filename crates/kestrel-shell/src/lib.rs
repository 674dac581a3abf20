//! Kestrel Shell
//!
//! The toolkit-free half of the UI: a [`UiEvent`] for every control the
//! window exposes, and a controller that maps each event to a handler on
//! the application state and the rendering surface. Summarization and
//! model installation run on tokio worker tasks (the controller must be
//! driven from within a runtime) and report back through an event channel
//! the UI thread drains.

mod controller;
mod error;
mod event;

pub use controller::{AssistEvent, ShellController};
pub use error::ShellError;
pub use event::UiEvent;

pub type Result<T> = std::result::Result<T, ShellError>;
