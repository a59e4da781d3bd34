pub mod read;
pub mod write;

pub use read::{DelimitedReader, SourceRow, open_input};
pub use write::{CsvWriter, OutputSink, open_output};
