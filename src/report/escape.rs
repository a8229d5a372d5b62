// YAML double-quoted scalar escaping for TAP diagnostics

/// Escape text for use inside a YAML double-quoted scalar.
///
/// The result never contains a raw newline, so it always fits on one line.
pub fn escape_yaml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            other => escaped.push(other),
        }
    }
    escaped
}
