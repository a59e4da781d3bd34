//! Delimited input reading with an overflow bucket per row.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use flate2::read::GzDecoder;

/// One input row, aligned to the declared header.
///
/// `values` has one entry per declared header; `None` marks cells the
/// physical record did not carry (short rows under a malformed delimiter
/// count). `overflow` captures extra delimiter-separated tokens beyond the
/// declared header count.
#[derive(Debug, Clone, Default)]
pub struct SourceRow {
    pub values: Vec<Option<String>>,
    pub overflow: Vec<String>,
}

impl SourceRow {
    /// Cell value for a declared column index, when present.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|cell| cell.as_deref())
    }

    /// True when every declared cell and every overflow token is blank.
    ///
    /// Blank rows are skipped outright so trailing empty lines or
    /// delimiter-only lines never become output records.
    pub fn is_blank(&self) -> bool {
        let declared_blank = self
            .values
            .iter()
            .all(|cell| cell.as_deref().is_none_or(|value| value.trim().is_empty()));
        declared_blank && self.overflow.iter().all(|token| token.trim().is_empty())
    }
}

/// Reader over a delimited text file, transparently gunzipping `.gz` paths.
pub struct DelimitedReader {
    reader: csv::Reader<Box<dyn BufRead>>,
    headers: Vec<String>,
}

impl DelimitedReader {
    /// Open a file and capture its header line.
    pub fn open(path: &Path, delimiter: u8) -> Result<Self> {
        let input = open_input(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let headers = reader
            .headers()
            .with_context(|| format!("read header: {}", path.display()))?
            .iter()
            .map(normalize_header)
            .collect();
        Ok(Self { reader, headers })
    }

    /// Declared input column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Read the next row, or `None` at end of input.
    ///
    /// Cell values are passed through untouched; trimming is the pipeline's
    /// business, not the reader's.
    pub fn read_row(&mut self) -> Result<Option<SourceRow>> {
        let mut record = csv::StringRecord::new();
        if !self
            .reader
            .read_record(&mut record)
            .context("read input record")?
        {
            return Ok(None);
        }
        let declared = self.headers.len();
        let values = (0..declared)
            .map(|index| record.get(index).map(str::to_string))
            .collect();
        let overflow = (declared..record.len())
            .map(|index| record[index].to_string())
            .collect();
        Ok(Some(SourceRow { values, overflow }))
    }
}

/// Open a path for buffered reading, gunzipping when it ends in `.gz`.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("open input: {}", path.display()))?;
    if is_gzip_path(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub(crate) fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("gz"))
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}
