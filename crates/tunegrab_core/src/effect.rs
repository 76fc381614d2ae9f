use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the MP3 conversion flow: progress channel plus work request.
    StartMp3Job { url: String },
    /// Start the background-removal flow (single round trip, no channel).
    StartRemoveBgJob { file: PathBuf },
}
