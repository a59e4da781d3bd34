//! Per-row record mapping.

use clarid_ingest::SourceRow;
use clarid_model::{ConvertError, MappingConfig, Operation, Result, SUBJECT_ID_FIELD};
use tracing::trace;

use crate::dispatch::apply_operations;
use crate::subject::SubjectIdAssigner;

/// Maps input rows onto the declared output columns.
///
/// For each output column in header order: resolve the raw value (the
/// synthesized subject ID, or the mapped source cell), run the column's
/// pipeline, and substitute the static default when the result is absent or
/// empty. Column lookups are resolved to input indices once, at
/// construction, which is also where missing source columns abort the run.
#[derive(Debug)]
pub struct RecordMapper<'a> {
    columns: Vec<OutputColumn<'a>>,
    assigner: SubjectIdAssigner,
    subject_source: Option<usize>,
    subject_operations: &'a [Operation],
    has_subject_column: bool,
}

#[derive(Debug)]
struct OutputColumn<'a> {
    kind: ColumnKind,
    operations: &'a [Operation],
    static_default: Option<&'a str>,
}

#[derive(Debug)]
enum ColumnKind {
    /// The synthesized `subject_id` column.
    SubjectId,
    /// A column read from the input at this index.
    Source(usize),
    /// A declared column with no source; the pipeline runs on absent input.
    Unsourced,
}

impl<'a> RecordMapper<'a> {
    /// Build a mapper for one conversion run.
    ///
    /// Fails when a field mapping names a source column the input header
    /// does not carry; that is a structural error for every row, so nothing
    /// gets written.
    pub fn new(config: &'a MappingConfig, input_headers: &[String]) -> Result<Self> {
        config.validate()?;
        config.validate_source_columns(input_headers)?;

        let column_index = |name: &str| input_headers.iter().position(|header| header == name);

        let (subject_source, subject_operations) = match config.subject_field() {
            Some(field) => {
                let index = match field.source.as_deref() {
                    Some(source) => Some(column_index(source).ok_or_else(|| {
                        ConvertError::Config(format!("missing input columns: {source}"))
                    })?),
                    None => None,
                };
                (index, field.operations.as_slice())
            }
            None => (None, &[] as &[Operation]),
        };

        let mut columns = Vec::with_capacity(config.output_headers.len());
        for header in &config.output_headers {
            if header == SUBJECT_ID_FIELD {
                columns.push(OutputColumn {
                    kind: ColumnKind::SubjectId,
                    operations: subject_operations,
                    static_default: None,
                });
                continue;
            }
            let field = config
                .field(header)
                .ok_or_else(|| ConvertError::Config(format!("no field mapping for {header}")))?;
            let kind = match field.source.as_deref() {
                Some(source) => match column_index(source) {
                    Some(index) => ColumnKind::Source(index),
                    None => {
                        return Err(ConvertError::Config(format!(
                            "missing input columns: {source}"
                        )));
                    }
                },
                None => ColumnKind::Unsourced,
            };
            columns.push(OutputColumn {
                kind,
                operations: field.operations.as_slice(),
                static_default: config.static_field(header),
            });
        }

        let has_subject_column = config
            .output_headers
            .iter()
            .any(|header| header == SUBJECT_ID_FIELD);
        Ok(Self {
            columns,
            assigner: SubjectIdAssigner::new(),
            subject_source,
            subject_operations,
            has_subject_column,
        })
    }

    /// Map one row, or `None` when the row is skipped.
    ///
    /// A row is skipped when it is entirely blank (declared and overflow
    /// cells alike) or, in group mode, when its raw subject-identity source
    /// cell is blank. Skipped rows advance no counter.
    pub fn map_row(&mut self, row: &SourceRow) -> Option<Vec<String>> {
        if row.is_blank() {
            trace!("skipping blank row");
            return None;
        }
        if let Some(index) = self.subject_source {
            if row.value(index).is_none_or(|value| value.trim().is_empty()) {
                trace!("skipping row with blank subject identity");
                return None;
            }
        }

        // The counter only advances when subject_id is a declared output.
        let subject_id = self
            .has_subject_column
            .then(|| self.next_subject_id(row));
        let mut output = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let value = match column.kind {
                ColumnKind::SubjectId => subject_id.clone(),
                ColumnKind::Source(index) => apply_operations(
                    row.value(index).map(str::to_string),
                    column.operations,
                ),
                ColumnKind::Unsourced => apply_operations(None, column.operations),
            };
            let cell = match value {
                Some(value) if !value.is_empty() => value,
                _ => column
                    .static_default
                    .map(str::to_string)
                    .unwrap_or_default(),
            };
            output.push(cell);
        }
        Some(output)
    }

    /// Number of logical subjects assigned so far.
    pub fn subject_count(&self) -> u64 {
        self.assigner.count()
    }

    fn next_subject_id(&mut self, row: &SourceRow) -> String {
        match self.subject_source {
            Some(index) => {
                let raw = row.value(index).map(str::to_string);
                let key = apply_operations(raw, self.subject_operations);
                self.assigner.assign(key).to_string()
            }
            None => self.assigner.next_row().to_string(),
        }
    }
}
