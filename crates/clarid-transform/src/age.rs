//! Age bucketization.

use clarid_model::AgeGroup;

/// Sentinel for unparseable or out-of-range ages.
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// Map an integer age onto the first group whose inclusive range contains it.
///
/// Blank input yields `None` (static fallback territory); non-integer input
/// or an age no group covers resolves to [`UNKNOWN_BUCKET`]. Groups may
/// overlap; declaration order decides.
pub fn bucketize_age(value: &str, groups: &[AgeGroup]) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(age) = trimmed.parse::<i64>() else {
        return Some(UNKNOWN_BUCKET.to_string());
    };
    for group in groups {
        if group.contains(age) {
            return Some(group.name.clone());
        }
    }
    Some(UNKNOWN_BUCKET.to_string())
}
