use std::path::PathBuf;

use bytes::Bytes;

/// Decoded progress-channel event, defaults already applied per field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressEvent {
    pub progress: f64,
    pub status: String,
    pub title: String,
}

/// Events published by the engine back to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Progress update for the in-flight MP3 job.
    Progress(ProgressEvent),
    /// The MP3 flow settled: saved artifact path or display error text.
    Mp3Completed { result: Result<PathBuf, String> },
    /// The background-removal flow settled.
    RemoveBgCompleted { result: Result<PathBuf, String> },
}

/// Binary result of the MP3 work request before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mp3Payload {
    /// Filename recovered from the Content-Disposition header.
    pub filename: String,
    pub bytes: Bytes,
}

/// Binary result of the background-removal request before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Bytes,
}

/// Failure of a work request, resolved to a display message by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct WorkError {
    pub kind: WorkErrorKind,
    /// Human-readable `detail` extracted from a structured error body.
    pub detail: Option<String>,
}

impl WorkError {
    pub(crate) fn new(kind: WorkErrorKind) -> Self {
        Self { kind, detail: None }
    }

    pub(crate) fn with_detail(kind: WorkErrorKind, detail: Option<String>) -> Self {
        Self { kind, detail }
    }

    /// The message shown to the user: the server's `detail` when present,
    /// else the flow-specific fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match &self.detail {
            Some(detail) if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkErrorKind {
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("io error: {0}")]
    Io(String),
}
