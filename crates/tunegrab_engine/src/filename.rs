/// Fallback artifact name when the header yields nothing usable.
pub const DEFAULT_AUDIO_NAME: &str = "audio.mp3";

/// Recover the suggested filename from a `Content-Disposition` header value.
///
/// Precedence: RFC 5987 extended parameter (`filename*=UTF-8''<value>`,
/// percent-decoded), then the plain `filename=` parameter with optional
/// quotes, then [`DEFAULT_AUDIO_NAME`]. An absent header short-circuits to
/// the default without attempting either pattern. The recovered name is
/// sanitized so a server-supplied header can never name a path outside the
/// output directory.
pub fn filename_from_disposition(header: Option<&str>) -> String {
    let Some(header) = header else {
        return DEFAULT_AUDIO_NAME.to_string();
    };

    if let Some(value) = extended_parameter(header) {
        return sanitize_filename(&percent_decode(value));
    }
    if let Some(value) = plain_parameter(header) {
        return sanitize_filename(&percent_decode(value));
    }
    DEFAULT_AUDIO_NAME.to_string()
}

/// Strip path separators, traversal dots, and other unsafe characters from
/// a header-supplied name; a name with nothing left falls back to the
/// default.
fn sanitize_filename(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    // Collapse runs of underscores left by replaced characters.
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    if compacted.is_empty() {
        DEFAULT_AUDIO_NAME.to_string()
    } else {
        compacted
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

/// `filename*=UTF-8''<value>`; the value runs to the next `;` or newline.
fn extended_parameter(header: &str) -> Option<&str> {
    let start = header.find("filename*=UTF-8''")? + "filename*=UTF-8''".len();
    let rest = &header[start..];
    let end = rest.find([';', '\n']).unwrap_or(rest.len());
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

/// `filename="<value>"` or `filename=<value>`; the value runs to the next
/// `"` or `;`. `filename*=` never matches here (the `*` breaks the needle).
fn plain_parameter(header: &str) -> Option<&str> {
    let start = header.find("filename=")? + "filename=".len();
    let rest = header[start..].strip_prefix('"').unwrap_or(&header[start..]);
    let end = rest.find(['"', ';']).unwrap_or(rest.len());
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

/// Lenient percent decoding: valid `%XX` escapes become bytes, anything
/// malformed passes through literally. Multi-byte UTF-8 sequences are
/// reassembled from their escaped bytes.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).copied().and_then(hex_value),
                bytes.get(i + 2).copied().and_then(hex_value),
            ) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
