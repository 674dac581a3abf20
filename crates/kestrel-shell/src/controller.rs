//! Shell controller
//!
//! Owns the rendering surface and routes every [`UiEvent`] to its
//! handler. Background workers never touch `AppState`; they send
//! [`AssistEvent`]s into a channel and the UI thread folds them into the
//! transcript via [`ShellController::pump_assist_events`].

use std::sync::Arc;

use tokio::sync::mpsc;

use kestrel_assist::{AssistClient, GenerateRequest};
use kestrel_core::{AppState, Download, RenderingSurface, SurfaceEvent};

use crate::error::ShellError;
use crate::event::UiEvent;
use crate::Result;

const DEFAULT_SUMMARY_MODEL: &str = "llama3.2";

const PAGE_SUMMARY_SYSTEM_PROMPT: &str =
    "You are a browser assistant. Summarize the following page text in a few short paragraphs.";

const SELECTION_SUMMARY_SYSTEM_PROMPT: &str =
    "You are a browser assistant. Summarize the following selected text briefly.";

/// Messages workers deliver to the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum AssistEvent {
    /// One streamed text segment
    SummaryChunk(String),
    /// The in-flight generation completed
    SummaryFinished,
    SummaryFailed(String),
    ModelInstalled { name: String },
    ModelInstallFailed { name: String, reason: String },
}

/// Maps UI events onto the application state and the rendering surface.
///
/// Summarization and model installation are spawned with [`tokio::spawn`],
/// so dispatching `Summarize*` or `ModelInstallRequested` events requires
/// an ambient tokio runtime (the GUI host enters one before its event
/// loop starts). Every other event is handled synchronously and has no
/// runtime requirement.
pub struct ShellController<S: RenderingSurface> {
    state: Arc<AppState>,
    surface: S,
    assist: Arc<AssistClient>,
    summary_model: String,
    assist_tx: mpsc::UnboundedSender<AssistEvent>,
    assist_rx: mpsc::UnboundedReceiver<AssistEvent>,
    transcript: String,
    last_assist_error: Option<String>,
    load_progress: u8,
    address_display: String,
}

impl<S: RenderingSurface> ShellController<S> {
    pub fn new(state: Arc<AppState>, surface: S, assist: AssistClient) -> Self {
        let (assist_tx, assist_rx) = mpsc::unbounded_channel();

        Self {
            state,
            surface,
            assist: Arc::new(assist),
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            assist_tx,
            assist_rx,
            transcript: String::new(),
            last_assist_error: None,
            load_progress: 0,
            address_display: String::new(),
        }
    }

    pub fn with_summary_model(mut self, model: impl Into<String>) -> Self {
        self.summary_model = model.into();
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The accumulated summarization transcript. New requests append;
    /// nothing ever replaces it during a session.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn last_assist_error(&self) -> Option<&str> {
        self.last_assist_error.as_deref()
    }

    pub fn load_progress(&self) -> u8 {
        self.load_progress
    }

    /// What the address bar should show
    pub fn address_display(&self) -> &str {
        &self.address_display
    }

    /// Navigate to the configured start page (called once after the
    /// window is up)
    pub fn open_start_page(&mut self) {
        let url = self.state.start_page();
        self.navigate(&url);
    }

    /// Route one UI event to its handler
    pub fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::AddressSubmitted { input } => {
                let target = self.state.resolve_input(&input)?;
                self.navigate(target.url());
            }
            UiEvent::ReloadRequested => self.surface.reload(),
            UiEvent::StopRequested => self.surface.stop(),
            UiEvent::BackRequested => {
                if self.surface.can_go_back() {
                    self.surface.back();
                }
            }
            UiEvent::ForwardRequested => {
                if self.surface.can_go_forward() {
                    self.surface.forward();
                }
            }
            UiEvent::HomeRequested => self.open_start_page(),
            UiEvent::ZoomChanged { factor } => self.surface.set_zoom(factor),
            UiEvent::SettingsConfirmed { settings } => {
                self.state.update_settings(settings)?;
            }
            UiEvent::BookmarkAdded { name, url } => {
                self.state.add_bookmark(name, url)?;
            }
            UiEvent::BookmarkEdited { index, name, url } => {
                self.state.update_bookmark(index, name, url)?;
            }
            UiEvent::BookmarkRemoved { index } => {
                self.state.remove_bookmark(index)?;
            }
            UiEvent::BookmarkOpened { index } => {
                let bookmark = self.state.bookmark_at(index)?;
                self.navigate(&bookmark.url);
            }
            UiEvent::SummarizePageRequested => {
                let text = self.surface.extract_visible_text();
                self.spawn_summary(PAGE_SUMMARY_SYSTEM_PROMPT, text)?;
            }
            UiEvent::SummarizeSelectionRequested { text } => {
                self.spawn_summary(SELECTION_SUMMARY_SYSTEM_PROMPT, text)?;
            }
            UiEvent::ModelInstallRequested { name } => self.spawn_model_install(name),
        }

        Ok(())
    }

    /// React to a notification from the rendering surface. For
    /// `DownloadRequested` the created ledger record is returned so the
    /// widget adapter can tag its progress reports with the record's id.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) -> Result<Option<Download>> {
        match event {
            SurfaceEvent::LoadProgress(progress) => {
                self.load_progress = progress.min(100);
            }
            SurfaceEvent::LoadFinished { ok } => {
                self.load_progress = 100;
                self.address_display = self.surface.current_url();
                if !ok {
                    tracing::warn!(url = %self.address_display, "page load failed");
                }
            }
            SurfaceEvent::DownloadRequested {
                url,
                suggested_file_name,
            } => {
                let manager = self.state.download_manager();
                let download = manager.create_download(url, suggested_file_name)?;

                // Risky files wait for consent while warnings are on;
                // everything else starts immediately.
                let gated = download.needs_warning() && self.state.settings().download_warnings;
                if gated {
                    return Ok(Some(download));
                }
                return Ok(Some(manager.start_download(&download.id)?));
            }
            SurfaceEvent::DownloadProgress {
                download_id,
                downloaded_bytes,
                total_bytes,
            } => {
                self.state
                    .download_manager()
                    .update_progress(&download_id, downloaded_bytes, total_bytes)?;
            }
            SurfaceEvent::DownloadFinished { download_id, ok } => {
                let manager = self.state.download_manager();
                if ok {
                    manager.complete_download(&download_id)?;
                } else {
                    manager.fail_download(&download_id, "transfer failed")?;
                }
            }
        }

        Ok(None)
    }

    /// User accepted a gated download
    pub fn confirm_download(&mut self, download_id: &str) -> Result<Download> {
        Ok(self.state.download_manager().start_download(download_id)?)
    }

    /// User declined a gated download
    pub fn decline_download(&mut self, download_id: &str) -> Result<Download> {
        Ok(self.state.download_manager().cancel_download(download_id)?)
    }

    /// Probe the inference server. `None` means unreachable, and the
    /// settings dialog disables AI controls.
    pub async fn installed_models(&self) -> Option<Vec<String>> {
        match self.assist.list_installed_models().await {
            Ok(models) => Some(models),
            Err(e) => {
                tracing::warn!(error = %e, "inference server unreachable");
                None
            }
        }
    }

    /// Drain worker events and fold them into the transcript. Called from
    /// the UI thread, typically once per frame or on a channel-readable
    /// notification.
    pub fn pump_assist_events(&mut self) {
        while let Ok(event) = self.assist_rx.try_recv() {
            match event {
                AssistEvent::SummaryChunk(chunk) => self.transcript.push_str(&chunk),
                AssistEvent::SummaryFinished => self.transcript.push_str("\n\n"),
                AssistEvent::SummaryFailed(reason) => {
                    tracing::warn!(reason = %reason, "summarization failed");
                    self.last_assist_error = Some(reason);
                }
                AssistEvent::ModelInstalled { name } => {
                    tracing::info!(model = %name, "model installation finished");
                }
                AssistEvent::ModelInstallFailed { name, reason } => {
                    tracing::warn!(model = %name, reason = %reason, "model installation failed");
                    self.last_assist_error = Some(reason);
                }
            }
        }
    }

    fn navigate(&mut self, url: &str) {
        self.load_progress = 0;
        self.address_display = url.to_string();
        self.surface.navigate(url);
    }

    fn spawn_summary(&mut self, system: &str, text: String) -> Result<()> {
        if !self.state.settings().ai_summarization_enabled {
            return Err(ShellError::AssistDisabled);
        }

        let request = GenerateRequest::new(self.summary_model.clone(), system, text);
        let client = Arc::clone(&self.assist);
        let tx = self.assist_tx.clone();

        tokio::spawn(async move {
            let sender = tx.clone();
            let outcome = client
                .generate(&request, |chunk| {
                    let _ = sender.send(AssistEvent::SummaryChunk(chunk.to_string()));
                })
                .await;

            match outcome {
                Ok(()) => {
                    let _ = tx.send(AssistEvent::SummaryFinished);
                }
                Err(e) => {
                    let _ = tx.send(AssistEvent::SummaryFailed(e.to_string()));
                }
            }
        });

        Ok(())
    }

    fn spawn_model_install(&mut self, name: String) {
        let client = Arc::clone(&self.assist);
        let tx = self.assist_tx.clone();

        tokio::spawn(async move {
            match client.pull_model(&name).await {
                Ok(()) => {
                    let _ = tx.send(AssistEvent::ModelInstalled { name });
                }
                Err(e) => {
                    let _ = tx.send(AssistEvent::ModelInstallFailed {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        });
    }
}
