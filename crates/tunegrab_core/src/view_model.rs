use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub mp3: Mp3View,
    pub removebg: RemoveBgView,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mp3View {
    pub url_input: String,
    pub loading: bool,
    pub error: String,
    /// Raw progress value as received from the backend.
    pub progress: f64,
    /// Rounded percentage for the progress label.
    pub percent: i64,
    pub status_text: String,
    pub saved: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoveBgView {
    pub selected_image: Option<PathBuf>,
    pub loading: bool,
    pub error: String,
    pub result: Option<PathBuf>,
}
