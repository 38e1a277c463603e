/// What: Remove an inline comment from a configuration value.
///
/// Inputs:
/// - `s`: Raw value text
///
/// Output:
/// - Comment-free, trimmed value
///
/// Details:
/// - A `#` or `//` starts a comment only at the beginning of the value or
///   after whitespace, so URLs such as `https://host/#x` survive intact.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        let starts_comment = b == b'#' || (b == b'/' && bytes.get(i + 1) == Some(&b'/'));
        if starts_comment && (i == 0 || bytes[i - 1].is_ascii_whitespace()) {
            return s[..i].trim();
        }
    }
    s.trim()
}

/// `true` for empty lines and full-line comments (`#`, `//`, `;`).
pub(crate) fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// Interpret common truthy spellings.
pub(crate) fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
