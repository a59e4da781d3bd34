//! Multi-value cell normalization.

use std::collections::BTreeSet;

use clarid_model::MultivalueOptions;

use crate::primitives::strip_quotes;

/// Split a multi-valued cell, clean and map each token, then rejoin.
///
/// The configured delimiters act as a disjunction: a token ends at any one
/// of them. Processing order is fixed: split, trim and quote-strip, drop
/// empties, map, dedupe on the mapped token, join. Blank input yields `None`
/// so a static fallback can apply.
pub fn normalize_multivalue(value: &str, options: &MultivalueOptions) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }

    let mut kept: Vec<String> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for token in value.split(options.delimiters.as_slice()) {
        let cleaned = strip_quotes(token);
        if options.drop_empty && cleaned.is_empty() {
            continue;
        }
        let mapped = options
            .map_values
            .get(&cleaned)
            .cloned()
            .unwrap_or(cleaned);
        if options.dedupe && !seen.insert(mapped.clone()) {
            continue;
        }
        kept.push(mapped);
    }

    Some(kept.join(&options.join_with))
}
