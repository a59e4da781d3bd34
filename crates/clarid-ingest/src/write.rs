//! CSV output writing, gzip-transparent.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::read::is_gzip_path;

/// Comma-delimited output writer; the header row is written on creation.
pub struct CsvWriter {
    writer: csv::Writer<OutputSink<BufWriter<File>>>,
}

impl CsvWriter {
    /// Create (or truncate) the output file and write the header row.
    pub fn create(path: &Path, headers: &[String]) -> Result<Self> {
        let output = open_output(path)?;
        let mut writer = csv::Writer::from_writer(output);
        writer
            .write_record(headers)
            .with_context(|| format!("write header: {}", path.display()))?;
        Ok(Self { writer })
    }

    /// Write one output record.
    pub fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.writer.write_record(row).context("write record")?;
        Ok(())
    }

    /// Flush buffered output and complete the underlying stream. The gzip
    /// trailer is written here, so a failure surfaces instead of being lost
    /// in a drop.
    pub fn finish(self) -> Result<()> {
        let sink = self
            .writer
            .into_inner()
            .map_err(|error| error.into_error())
            .context("flush output")?;
        sink.finish().context("finish output")?;
        Ok(())
    }
}

/// Output stream that is either plain or gzip-compressed.
pub enum OutputSink<W: Write> {
    Plain(W),
    Gz(GzEncoder<W>),
}

impl<W: Write> OutputSink<W> {
    /// Complete the stream: write the gzip trailer, when present, and flush
    /// through to the underlying writer.
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            OutputSink::Plain(mut writer) => writer.flush(),
            OutputSink::Gz(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl<W: Write> Write for OutputSink<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            OutputSink::Plain(writer) => writer.write(buf),
            OutputSink::Gz(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            OutputSink::Plain(writer) => writer.flush(),
            OutputSink::Gz(encoder) => encoder.flush(),
        }
    }
}

/// Open a path for buffered writing, gzipping when it ends in `.gz`.
pub fn open_output(path: &Path) -> Result<OutputSink<BufWriter<File>>> {
    let file = File::create(path).with_context(|| format!("create output: {}", path.display()))?;
    let writer = BufWriter::new(file);
    if is_gzip_path(path) {
        Ok(OutputSink::Gz(GzEncoder::new(
            writer,
            Compression::default(),
        )))
    } else {
        Ok(OutputSink::Plain(writer))
    }
}
