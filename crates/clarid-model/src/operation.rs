//! Field operations and their argument shapes.
//!
//! A pipeline is an ordered list of [`Operation`] values bound to one output
//! column. In the mapping document an operation is either a bare name
//! (`trim`) or a single-key mapping from the name to its argument
//! (`remove_suffix: " cells"`). The externally tagged serde representation
//! matches both shapes, and an unrecognized name fails deserialization, so a
//! broken pipeline is rejected before any row is read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One step of a field pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Trim whitespace, then remove one surrounding quote character per end.
    StripQuotes,

    /// Remove leading/trailing whitespace.
    Trim,

    /// Collapse every whitespace run into a single space.
    CollapseSpaces,

    /// Remove all whitespace characters, internal ones included.
    RemoveAllSpaces,

    /// Capitalize a sex label; blank input stays absent.
    NormalizeSex,

    /// Case-insensitive suffix removal, plus trailing whitespace left behind.
    RemoveSuffix(String),

    /// Exact-match value substitution; unmapped values pass through.
    MapValues(BTreeMap<String, String>),

    /// Map an integer age onto the first matching named range.
    BucketizeAge(Vec<AgeGroup>),

    /// Split, clean, map, dedupe and rejoin a multi-valued cell.
    NormalizeMultivalue(MultivalueOptions),

    /// Encode a day count as a `P<digit><unit>` duration bin.
    DaysToIso8601Bin(DurationBinOptions),
}

/// A named inclusive age range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeGroup {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

impl AgeGroup {
    /// Check whether `age` falls inside this group's inclusive range.
    pub fn contains(&self, age: i64) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Options for multi-value normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultivalueOptions {
    /// Characters treated as token separators (disjunction, not sequence).
    pub delimiters: Vec<char>,

    /// Separator placed between surviving tokens.
    pub join_with: String,

    /// Exact-match token substitution, applied after cleaning.
    #[serde(alias = "mapping")]
    pub map_values: BTreeMap<String, String>,

    /// Drop tokens that are empty after trimming and quote-stripping.
    pub drop_empty: bool,

    /// Keep only the first occurrence of each mapped token.
    pub dedupe: bool,
}

impl Default for MultivalueOptions {
    fn default() -> Self {
        Self {
            delimiters: vec![',', ';', '|', '/'],
            join_with: ";".to_string(),
            map_values: BTreeMap::new(),
            drop_empty: true,
            dedupe: false,
        }
    }
}

/// Rounding applied to the W/M/Y arithmetic of duration binning.
///
/// The D branch always truncates, regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    #[default]
    Floor,
    Round,
    Ceil,
}

/// Duration units, in bin priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    D,
    W,
    M,
    Y,
}

impl DurationUnit {
    /// Single-letter code used in the emitted bin.
    pub fn code(self) -> char {
        match self {
            Self::D => 'D',
            Self::W => 'W',
            Self::M => 'M',
            Self::Y => 'Y',
        }
    }
}

/// Options for day-count binning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DurationBinOptions {
    pub rounding: Rounding,

    /// Units the encoder may use, tried in D, W, M, Y priority order.
    pub units: Vec<DurationUnit>,

    /// Value emitted for unparseable or negative input (absent by default).
    pub on_error: Option<String>,
}

impl Default for DurationBinOptions {
    fn default() -> Self {
        Self {
            rounding: Rounding::default(),
            units: vec![
                DurationUnit::D,
                DurationUnit::W,
                DurationUnit::M,
                DurationUnit::Y,
            ],
            on_error: None,
        }
    }
}

impl DurationBinOptions {
    /// Check whether a unit is allowed by this configuration.
    pub fn allows(&self, unit: DurationUnit) -> bool {
        self.units.contains(&unit)
    }
}
