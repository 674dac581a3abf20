//! Rendering surface interface
//!
//! The embedded web widget does the actual loading, history, zoom, and
//! transfer work; Kestrel only drives it through this trait and reacts to
//! the events it emits. Keeping the widget behind a trait keeps toolkit
//! types out of every other crate and lets the shell be tested against a
//! fake.

/// Operations the shell invokes on the web widget
pub trait RenderingSurface {
    fn navigate(&mut self, url: &str);
    fn reload(&mut self);
    fn stop(&mut self);
    fn back(&mut self);
    fn forward(&mut self);
    fn set_zoom(&mut self, factor: f64);

    fn current_url(&self) -> String;
    fn title(&self) -> String;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;

    /// The visible text of the current page, for summarization
    fn extract_visible_text(&self) -> String;
}

/// Notifications the web widget delivers to the shell
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Load progress, 0-100
    LoadProgress(u8),
    LoadFinished {
        ok: bool,
    },
    /// The widget wants to download something and suggests a file name
    DownloadRequested {
        url: String,
        suggested_file_name: String,
    },
    /// Byte progress for a previously requested download
    DownloadProgress {
        download_id: String,
        downloaded_bytes: u64,
        total_bytes: Option<u64>,
    },
    DownloadFinished {
        download_id: String,
        ok: bool,
    },
}
