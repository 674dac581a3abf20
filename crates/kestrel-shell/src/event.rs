//! UI events
//!
//! One variant per user-visible control. The window layer only constructs
//! these and hands them to the controller; it holds no logic of its own.

use kestrel_core::Settings;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Return pressed (or Go clicked) in the address bar
    AddressSubmitted { input: String },
    ReloadRequested,
    StopRequested,
    BackRequested,
    ForwardRequested,
    HomeRequested,
    ZoomChanged { factor: f64 },

    /// OK pressed in the settings dialog
    SettingsConfirmed { settings: Settings },

    BookmarkAdded { name: String, url: String },
    BookmarkEdited { index: usize, name: String, url: String },
    BookmarkRemoved { index: usize },
    BookmarkOpened { index: usize },

    SummarizePageRequested,
    SummarizeSelectionRequested { text: String },
    ModelInstallRequested { name: String },
}
