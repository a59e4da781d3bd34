//! CLI argument definitions for the ClarID converter.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "clarid-convert",
    version,
    about = "Convert tabular clinical records to normalized ClarID CSV",
    long_about = "Convert subject or biosample exports from tab/comma delimited sources\n\
                  onto a fixed output schema, driven by a YAML mapping document of\n\
                  per-column transformation pipelines."
)]
pub struct Cli {
    /// Which record kind the mapping describes.
    #[arg(long = "entity", value_enum)]
    pub entity: Entity,

    /// Input file, delimited text (gzip transparent).
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Output CSV file (gzip transparent).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// YAML mapping document.
    #[arg(short = 'm', long = "mapping", value_name = "PATH")]
    pub mapping: PathBuf,

    /// Input delimiter (default: tab; use ',' for CSV sources).
    #[arg(short = 'd', long = "delimiter", default_value = "\t")]
    pub delimiter: String,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

/// Record kinds a mapping document can describe.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Subject,
    Biosample,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Biosample => "biosample",
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
