use uuid::Uuid;

/// Ephemeral identifier correlating a progress channel with its work request.
///
/// Needs only low collision probability within the short-lived channel
/// namespace, not cryptographic strength. Never persisted; owned by the
/// submission that generated it.
pub fn new_download_id() -> String {
    Uuid::new_v4().simple().to_string()
}
