//! Zero-argument string transforms.
//!
//! Each primitive is pure and keeps absent input absent when lifted into the
//! dispatcher; the only primitive that can turn a present value into an
//! absent one is [`normalize_sex`], which treats blank input as missing so a
//! static fallback can apply downstream.

/// Trim whitespace, then remove one surrounding quote character per end.
///
/// The two ends are stripped independently, so mismatched quoting like
/// `"value'` still loses both characters.
///
/// # Examples
///
/// ```
/// use clarid_transform::primitives::strip_quotes;
///
/// assert_eq!(strip_quotes("  \"hello\"  "), "hello");
/// assert_eq!(strip_quotes("'world\""), "world");
/// assert_eq!(strip_quotes("unquoted"), "unquoted");
/// ```
pub fn strip_quotes(value: &str) -> String {
    let mut trimmed = value.trim();
    if let Some(rest) = trimmed.strip_prefix(['\'', '"']) {
        trimmed = rest;
    }
    if let Some(rest) = trimmed.strip_suffix(['\'', '"']) {
        trimmed = rest;
    }
    trimmed.to_string()
}

/// Remove leading and trailing whitespace.
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Collapse every whitespace run, internal ones included, into one space.
pub fn collapse_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove every whitespace character.
pub fn remove_all_spaces(value: &str) -> String {
    value.split_whitespace().collect()
}

/// Capitalize a sex label: first letter upper, rest lower.
///
/// Blank input yields `None`, which lets a static fallback apply; the
/// literal token "unknown" becomes "Unknown" like any other label.
pub fn normalize_sex(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let mut label: String = first.to_uppercase().collect();
    label.push_str(&chars.as_str().to_lowercase());
    Some(label)
}

/// Case-insensitive suffix removal, plus any trailing whitespace left behind.
///
/// Unmatched input passes through unchanged.
pub fn remove_suffix(value: &str, suffix: &str) -> String {
    if suffix.is_empty() || suffix.len() > value.len() {
        return value.to_string();
    }
    let split = value.len() - suffix.len();
    if value.is_char_boundary(split) && value[split..].eq_ignore_ascii_case(suffix) {
        value[..split].trim_end().to_string()
    } else {
        value.to_string()
    }
}

/// Exact-match substitution through a value table; misses pass through.
pub fn map_values(value: String, table: &std::collections::BTreeMap<String, String>) -> String {
    table.get(&value).cloned().unwrap_or(value)
}
