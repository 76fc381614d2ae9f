use std::path::PathBuf;

// No `Eq`: progress percentages arrive as raw floats from the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlChanged(String),
    /// User submitted the current URL for conversion.
    Mp3Submitted,
    /// Decoded progress event from the job's progress channel.
    Mp3Progress {
        progress: f64,
        status: String,
        title: String,
    },
    /// The MP3 work request settled: saved artifact path or display error.
    Mp3Finished { result: Result<PathBuf, String> },
    /// User picked (or cleared) the image to process.
    ImageChanged(Option<PathBuf>),
    /// User submitted the selected image for background removal.
    ImageSubmitted,
    /// The background-removal request settled.
    ImageFinished { result: Result<PathBuf, String> },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
