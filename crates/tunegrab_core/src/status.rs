/// Maps the backend's status vocabulary to display text.
///
/// Pure projection, derived on every view; unrecognized or empty statuses
/// produce an empty string. The title suffix appears only while downloading
/// and only once the backend has resolved one.
pub fn status_line(status: &str, title: &str) -> String {
    match status {
        "starting" => "Starting...".to_string(),
        "downloading" => {
            if title.is_empty() {
                "Downloading".to_string()
            } else {
                format!("Downloading: {title}")
            }
        }
        "converting" => "Converting to MP3...".to_string(),
        "finished" => "Download ready!".to_string(),
        "error" => "Error during download.".to_string(),
        _ => String::new(),
    }
}
