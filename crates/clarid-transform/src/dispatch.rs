//! Pipeline application.

use clarid_model::Operation;

use crate::age::bucketize_age;
use crate::duration::days_to_iso8601_bin;
use crate::multivalue::normalize_multivalue;
use crate::primitives::{
    collapse_spaces, map_values, normalize_sex, remove_all_spaces, remove_suffix, strip_quotes,
    trim,
};

/// Apply a pipeline left to right, feeding each operation's output into the
/// next.
///
/// An empty pipeline is the identity function. Absent input stays absent
/// through every operation, so a value only becomes present when an input
/// cell carried one. Unknown operation names cannot reach this point; they
/// are rejected when the mapping document is loaded.
pub fn apply_operations(value: Option<String>, operations: &[Operation]) -> Option<String> {
    operations.iter().fold(value, apply)
}

fn apply(value: Option<String>, operation: &Operation) -> Option<String> {
    let value = value?;
    match operation {
        Operation::StripQuotes => Some(strip_quotes(&value)),
        Operation::Trim => Some(trim(&value)),
        Operation::CollapseSpaces => Some(collapse_spaces(&value)),
        Operation::RemoveAllSpaces => Some(remove_all_spaces(&value)),
        Operation::NormalizeSex => normalize_sex(&value),
        Operation::RemoveSuffix(suffix) => Some(remove_suffix(&value, suffix)),
        Operation::MapValues(table) => Some(map_values(value, table)),
        Operation::BucketizeAge(groups) => bucketize_age(&value, groups),
        Operation::NormalizeMultivalue(options) => normalize_multivalue(&value, options),
        Operation::DaysToIso8601Bin(options) => days_to_iso8601_bin(&value, options),
    }
}
