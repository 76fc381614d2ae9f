use std::path::PathBuf;

use crate::status::status_line;
use crate::view_model::{AppViewModel, Mp3View, RemoveBgView};

/// UI-facing progress record for the MP3 flow.
///
/// Created zeroed/empty when a submission starts, mutated on every decoded
/// progress event, and reset when the flow settles for any reason.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressState {
    pub progress: f64,
    pub status: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    // MP3 flow
    url_input: String,
    mp3_loading: bool,
    mp3_error: String,
    progress: ProgressState,
    saved: Option<PathBuf>,
    // RemoveBg flow
    selected_image: Option<PathBuf>,
    bg_loading: bool,
    bg_error: String,
    bg_result: Option<PathBuf>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mp3: Mp3View {
                url_input: self.url_input.clone(),
                loading: self.mp3_loading,
                error: self.mp3_error.clone(),
                // Raw value is displayed verbatim; percent is what the
                // progress bar label shows.
                progress: self.progress.progress,
                percent: self.progress.progress.round() as i64,
                status_text: status_line(&self.progress.status, &self.progress.title),
                saved: self.saved.clone(),
            },
            removebg: RemoveBgView {
                selected_image: self.selected_image.clone(),
                loading: self.bg_loading,
                error: self.bg_error.clone(),
                result: self.bg_result.clone(),
            },
        }
    }

    /// Returns and clears the dirty flag; the shell renders when it was set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn set_url_input(&mut self, url: String) {
        self.url_input = url;
    }

    pub(crate) fn mp3_in_flight(&self) -> bool {
        self.mp3_loading
    }

    /// Enter the MP3 loading state with a clean slate.
    pub(crate) fn begin_mp3(&mut self) {
        self.mp3_error.clear();
        self.progress = ProgressState::default();
        self.saved = None;
        self.mp3_loading = true;
    }

    pub(crate) fn set_mp3_error(&mut self, message: impl Into<String>) {
        self.mp3_error = message.into();
    }

    pub(crate) fn apply_progress(&mut self, progress: f64, status: String, title: String) {
        self.progress = ProgressState {
            progress,
            status,
            title,
        };
    }

    /// Settle the MP3 flow. Progress state resets regardless of outcome.
    pub(crate) fn finish_mp3(&mut self, result: Result<PathBuf, String>) {
        self.mp3_loading = false;
        self.progress = ProgressState::default();
        match result {
            Ok(path) => self.saved = Some(path),
            Err(message) => self.mp3_error = message,
        }
    }

    pub(crate) fn selected_image(&self) -> Option<&PathBuf> {
        self.selected_image.as_ref()
    }

    pub(crate) fn set_selected_image(&mut self, file: Option<PathBuf>) {
        self.selected_image = file;
    }

    pub(crate) fn bg_in_flight(&self) -> bool {
        self.bg_loading
    }

    pub(crate) fn begin_removebg(&mut self) {
        self.bg_error.clear();
        self.bg_result = None;
        self.bg_loading = true;
    }

    pub(crate) fn set_bg_error(&mut self, message: impl Into<String>) {
        self.bg_error = message.into();
    }

    pub(crate) fn finish_removebg(&mut self, result: Result<PathBuf, String>) {
        self.bg_loading = false;
        match result {
            Ok(path) => self.bg_result = Some(path),
            Err(message) => self.bg_error = message,
        }
    }
}
