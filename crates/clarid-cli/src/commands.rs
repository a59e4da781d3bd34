use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use clarid_ingest::{CsvWriter, DelimitedReader};
use clarid_model::MappingConfig;
use clarid_transform::RecordMapper;

use crate::cli::Cli;

/// Counts from one completed conversion run.
#[derive(Debug)]
pub struct ConvertResult {
    pub output: PathBuf,
    pub records_written: usize,
    pub rows_skipped: usize,
    pub subjects_assigned: u64,
}

/// Run one conversion: load the mapping, stream rows through the record
/// mapper, write the normalized CSV.
///
/// Configuration errors (unparseable mapping, unknown operation, missing
/// source column) abort before the output file is created.
pub fn run_convert(args: &Cli) -> Result<ConvertResult> {
    let span = info_span!("convert", entity = args.entity.as_str());
    let _guard = span.enter();
    let start = Instant::now();

    let delimiter = parse_delimiter(&args.delimiter)?;
    let config = MappingConfig::from_path(&args.mapping)
        .with_context(|| format!("load mapping: {}", args.mapping.display()))?;

    let mut reader = DelimitedReader::open(&args.input, delimiter)?;
    let input_headers = reader.headers().to_vec();
    let mut mapper = RecordMapper::new(&config, &input_headers)
        .with_context(|| format!("apply mapping: {}", args.mapping.display()))?;
    info!(
        entity = args.entity.as_str(),
        input = %args.input.display(),
        input_columns = input_headers.len(),
        output_columns = config.output_headers.len(),
        "mapping validated"
    );

    let mut writer = CsvWriter::create(&args.output, &config.output_headers)?;
    let mut records_written = 0usize;
    let mut rows_skipped = 0usize;
    while let Some(row) = reader.read_row()? {
        match mapper.map_row(&row) {
            Some(record) => {
                writer.write_row(&record)?;
                records_written += 1;
            }
            None => rows_skipped += 1,
        }
    }
    writer.finish()?;

    info!(
        records = records_written,
        skipped = rows_skipped,
        subjects = mapper.subject_count(),
        duration_ms = start.elapsed().as_millis(),
        "conversion complete"
    );
    Ok(ConvertResult {
        output: args.output.clone(),
        records_written,
        rows_skipped,
        subjects_assigned: mapper.subject_count(),
    })
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [byte] => Ok(*byte),
        _ => bail!("delimiter must be a single byte, got {raw:?}"),
    }
}
