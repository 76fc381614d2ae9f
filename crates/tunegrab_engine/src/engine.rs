use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::client::{MediaClient, MP3_FALLBACK_ERROR, REMOVEBG_FALLBACK_ERROR};
use crate::job_id::new_download_id;
use crate::persist::ArtifactWriter;
use crate::progress::{run_progress_channel, ChannelProgressSink};
use crate::{EngineEvent, PersistError, WorkError, WorkErrorKind};

/// Filename for a processed image; the backend suggests none.
pub const RESULT_IMAGE_NAME: &str = "no-bg.png";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: Url,
    pub output_dir: PathBuf,
}

impl EngineConfig {
    pub fn new(base_url: Url, output_dir: PathBuf) -> Self {
        Self {
            base_url,
            output_dir,
        }
    }
}

enum EngineCommand {
    StartMp3 { url: String },
    StartRemoveBg { file: PathBuf },
}

/// Clonable command side of the engine, for shells that poll events on a
/// separate thread from the one issuing commands.
#[derive(Clone)]
pub struct EngineCommands {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineCommands {
    pub fn start_mp3(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StartMp3 { url: url.into() });
    }

    pub fn start_remove_bg(&self, file: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::StartRemoveBg { file });
    }
}

/// Bridges the synchronous shell and the async transport: commands go in
/// over a channel, engine events come back out. A dedicated thread owns the
/// tokio runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, WorkError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = MediaClient::new(config.base_url.clone())?;

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let output_dir = config.output_dir.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client, output_dir, command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn commands(&self) -> EngineCommands {
        EngineCommands {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    pub fn start_mp3(&self, url: impl Into<String>) {
        self.commands().start_mp3(url);
    }

    pub fn start_remove_bg(&self, file: PathBuf) {
        self.commands().start_remove_bg(file);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    client: MediaClient,
    output_dir: PathBuf,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::StartMp3 { url } => {
            let result = run_mp3_job(&client, &output_dir, &url, &event_tx).await;
            let _ = event_tx.send(EngineEvent::Mp3Completed { result });
        }
        EngineCommand::StartRemoveBg { file } => {
            let result = run_removebg_job(&client, &output_dir, &file).await;
            let _ = event_tx.send(EngineEvent::RemoveBgCompleted { result });
        }
    }
}

/// One MP3 submission: progress channel and work request share a fresh
/// download id; the channel is closed in the settle path no matter how the
/// request ends.
async fn run_mp3_job(
    client: &MediaClient,
    output_dir: &Path,
    url: &str,
    event_tx: &mpsc::Sender<EngineEvent>,
) -> Result<PathBuf, String> {
    let download_id = new_download_id();
    log::info!("mp3 job start download_id={download_id} url={url}");

    let cancel = CancellationToken::new();
    let channel = tokio::spawn(run_progress_channel(
        client.http(),
        client.base().clone(),
        download_id.clone(),
        Box::new(ChannelProgressSink::new(event_tx.clone())),
        cancel.clone(),
    ));

    let outcome = client.download_mp3(url, &download_id).await;

    // Unconditional cleanup: progress updates stop once the request settles.
    cancel.cancel();
    let _ = channel.await;

    match outcome {
        Ok(payload) => {
            let writer = ArtifactWriter::new(output_dir.to_path_buf());
            writer
                .write(&payload.filename, &payload.bytes)
                .map_err(|err| persist_failure("mp3", err, MP3_FALLBACK_ERROR))
        }
        Err(err) => {
            log::warn!("mp3 job failed: {err}");
            Err(err.display_message(MP3_FALLBACK_ERROR))
        }
    }
}

/// One background-removal submission: read, upload, persist. No progress
/// channel and no download id; the round trip is the whole job.
async fn run_removebg_job(
    client: &MediaClient,
    output_dir: &Path,
    file: &Path,
) -> Result<PathBuf, String> {
    log::info!("removebg job start file={}", file.display());

    let image = tokio::fs::read(file)
        .await
        .map_err(|err| WorkError::new(WorkErrorKind::Io(err.to_string())));
    let outcome = match image {
        Ok(image) => {
            let original_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload");
            client.remove_background(image, original_name).await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(payload) => {
            let writer = ArtifactWriter::new(output_dir.to_path_buf());
            writer
                .write(RESULT_IMAGE_NAME, &payload.bytes)
                .map_err(|err| persist_failure("removebg", err, REMOVEBG_FALLBACK_ERROR))
        }
        Err(err) => {
            log::warn!("removebg job failed: {err}");
            Err(err.display_message(REMOVEBG_FALLBACK_ERROR))
        }
    }
}

fn persist_failure(flow: &str, err: PersistError, fallback: &str) -> String {
    log::warn!("{flow} job could not persist artifact: {err}");
    fallback.to_string()
}
