//! Tunegrab engine: transport, progress correlation, and effect execution.
mod client;
mod decode;
mod engine;
mod filename;
mod job_id;
mod persist;
mod progress;
mod types;

pub use client::{MediaClient, MP3_FALLBACK_ERROR, REMOVEBG_FALLBACK_ERROR};
pub use decode::decode_progress_payload;
pub use engine::{EngineCommands, EngineConfig, EngineHandle, RESULT_IMAGE_NAME};
pub use filename::{filename_from_disposition, DEFAULT_AUDIO_NAME};
pub use job_id::new_download_id;
pub use persist::{ensure_output_dir, ArtifactWriter, PersistError};
pub use progress::{run_progress_channel, ChannelProgressSink, ProgressSink};
pub use types::{
    EngineEvent, ImagePayload, Mp3Payload, ProgressEvent, WorkError, WorkErrorKind,
};
