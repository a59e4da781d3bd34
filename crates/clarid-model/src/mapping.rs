//! The YAML mapping document: output columns, field pipelines, static
//! fallbacks.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::operation::Operation;

/// Output column whose value is synthesized by the subject-identity assigner.
pub const SUBJECT_ID_FIELD: &str = "subject_id";

/// How one output column obtains its value.
///
/// `source` names an input column; when absent the pipeline runs on an absent
/// value (useful together with a static fallback) or, for `subject_id`,
/// selects counter mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldMapping {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// A complete mapping document for one entity (subject or biosample).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingConfig {
    /// Output column names, in write order.
    pub output_headers: Vec<String>,

    /// Per-output-column source and pipeline.
    pub fields: BTreeMap<String, FieldMapping>,

    /// Literal fallbacks applied when a pipeline result is empty or absent.
    #[serde(default)]
    pub static_fields: BTreeMap<String, String>,
}

impl MappingConfig {
    /// Load and structurally validate a mapping document.
    ///
    /// Unknown operation names surface here as YAML errors; a header without
    /// a field mapping is a configuration error. Either way the run aborts
    /// before any input row is read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every output header is either mapped or `subject_id`.
    pub fn validate(&self) -> Result<()> {
        let unmapped: Vec<&str> = self
            .output_headers
            .iter()
            .filter(|header| {
                header.as_str() != SUBJECT_ID_FIELD && !self.fields.contains_key(header.as_str())
            })
            .map(String::as_str)
            .collect();
        if unmapped.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::Config(format!(
                "output headers without a field mapping: {}",
                unmapped.join(", ")
            )))
        }
    }

    /// Check that every declared source column exists in the input header.
    pub fn validate_source_columns(&self, input_headers: &[String]) -> Result<()> {
        let missing: Vec<&str> = self
            .fields
            .values()
            .filter_map(|field| field.source.as_deref())
            .filter(|source| !input_headers.iter().any(|header| header == source))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::Config(format!(
                "missing input columns: {}",
                missing.join(", ")
            )))
        }
    }

    /// The `subject_id` field mapping, when declared.
    pub fn subject_field(&self) -> Option<&FieldMapping> {
        self.fields.get(SUBJECT_ID_FIELD)
    }

    /// The field mapping for an output column.
    pub fn field(&self, header: &str) -> Option<&FieldMapping> {
        self.fields.get(header)
    }

    /// The static fallback for an output column.
    pub fn static_field(&self, header: &str) -> Option<&str> {
        self.static_fields.get(header).map(String::as_str)
    }
}
