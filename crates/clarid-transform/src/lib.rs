//! Declarative per-column transformation engine.
//!
//! The engine applies an ordered pipeline of named operations to each field
//! value, synthesizes sequential subject identifiers, and maps input rows
//! onto a fixed output schema. Pipelines and their arguments come from the
//! mapping document in `clarid-model`; rows come from `clarid-ingest`.

pub mod age;
pub mod dispatch;
pub mod duration;
pub mod multivalue;
pub mod primitives;
pub mod record;
pub mod subject;

pub use age::{UNKNOWN_BUCKET, bucketize_age};
pub use dispatch::apply_operations;
pub use duration::days_to_iso8601_bin;
pub use multivalue::normalize_multivalue;
pub use record::RecordMapper;
pub use subject::SubjectIdAssigner;
