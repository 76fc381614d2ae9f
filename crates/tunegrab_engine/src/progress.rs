use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::decode::decode_progress_payload;
use crate::ProgressEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Sink that republishes decoded events as [`crate::EngineEvent`]s.
pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<crate::EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<crate::EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.tx.send(crate::EngineEvent::Progress(event));
    }
}

/// Consume the server-push progress stream for one download id.
///
/// Runs until the server ends the stream, a transport error occurs, or the
/// token is cancelled. All exits are quiet: a broken channel only stops
/// further updates, the work request's own outcome stays authoritative.
/// Closure is client-local; no cancellation request is sent upstream.
pub async fn run_progress_channel(
    http: reqwest::Client,
    base: Url,
    download_id: String,
    sink: Box<dyn ProgressSink>,
    cancel: CancellationToken,
) {
    let endpoint = match base.join("progress") {
        Ok(endpoint) => endpoint,
        Err(err) => {
            log::debug!("progress channel: bad endpoint: {err}");
            return;
        }
    };

    let request = http
        .get(endpoint)
        .query(&[("download_id", download_id.as_str())])
        .header(ACCEPT, "text/event-stream")
        .send();
    let response = tokio::select! {
        _ = cancel.cancelled() => return,
        response = request => match response {
            Ok(response) => response,
            Err(err) => {
                log::debug!("progress channel: connect failed: {err}");
                return;
            }
        },
    };
    if !response.status().is_success() {
        log::debug!("progress channel: status {}", response.status());
        return;
    }

    let mut stream = response.bytes_stream();
    let mut frames = SseFrameBuffer::default();
    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => return,
            chunk = stream.next() => chunk,
        };
        match chunk {
            Some(Ok(chunk)) => {
                for payload in frames.feed(&chunk) {
                    // Malformed payloads are dropped without retry.
                    if let Some(event) = decode_progress_payload(&payload) {
                        sink.emit(event);
                    }
                }
            }
            Some(Err(err)) => {
                log::debug!("progress channel: transport error: {err}");
                return;
            }
            None => return,
        }
    }
}

/// Incremental SSE framing: splits a byte stream into event data payloads.
///
/// Only `data` fields matter to this client; `event`, `id`, `retry` and
/// comment lines are skipped. Multi-line data is joined with `\n` per the
/// SSE wire format.
#[derive(Debug, Default)]
pub(crate) struct SseFrameBuffer {
    pending: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseFrameBuffer {
    /// Feed one chunk; returns the data payloads of any completed events.
    pub(crate) fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(newline) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line).into_owned();
            if let Some(payload) = self.take_line(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    fn take_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            if self.data_lines.is_empty() {
                return None;
            }
            return Some(self.data_lines.drain(..).collect::<Vec<_>>().join("\n"));
        }
        if let Some(rest) = line.strip_prefix("data:") {
            self.data_lines
                .push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
        } else if line == "data" {
            self.data_lines.push(String::new());
        }
        None
    }
}
