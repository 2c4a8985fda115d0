//! Output-side text escaping.

/// Escapes a TEXT value (RFC 5545 §3.3.11): backslash, comma, semicolon, and
/// newline become backslash escapes.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Encodes one parameter value for output: RFC 6868 caret escapes, plus
/// quoting when the value contains a parameter delimiter.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '^' => encoded.push_str("^^"),
            '\n' => encoded.push_str("^n"),
            '"' => encoded.push_str("^'"),
            '\r' => {}
            _ => encoded.push(c),
        }
    }

    if needs_quoting(&encoded) {
        format!("\"{encoded}\"")
    } else {
        encoded
    }
}

fn needs_quoting(s: &str) -> bool {
    s.contains([':', ';', ','])
}
