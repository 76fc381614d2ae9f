use serde_json::Value;

use crate::ProgressEvent;

/// Decode one progress-channel payload into a structured event.
///
/// The backend emits pseudo-JSON with single-quote string delimiters; the
/// rewrite to double quotes is confined to this function so a corrected
/// backend encoding only ever touches this step. The rewrite is lossy for
/// titles containing an apostrophe; such payloads fail to parse and are
/// dropped, matching the upstream client.
///
/// Returns `None` for anything that does not parse as a JSON object; the
/// caller drops such events silently. Missing or mistyped fields degrade to
/// their defaults (`0`, `""`, `""`) rather than failing the event.
pub fn decode_progress_payload(raw: &str) -> Option<ProgressEvent> {
    let normalized = raw.replace('\'', "\"");
    let value: Value = serde_json::from_str(&normalized).ok()?;
    let object = value.as_object()?;

    Some(ProgressEvent {
        progress: object.get("progress").and_then(Value::as_f64).unwrap_or(0.0),
        status: object
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        title: object
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}
