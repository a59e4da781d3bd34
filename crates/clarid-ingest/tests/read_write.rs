//! Tests for delimited reading and CSV writing.

use std::fs;
use std::io::Read;
use std::path::Path;

use clarid_ingest::{CsvWriter, DelimitedReader, open_input};

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn reads_headers_and_aligned_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "input.tsv", "id\tsex\nA\tm\nB\tf\n");

    let mut reader = DelimitedReader::open(&path, b'\t').unwrap();
    assert_eq!(reader.headers(), ["id", "sex"]);

    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row.value(0), Some("A"));
    assert_eq!(row.value(1), Some("m"));
    assert!(row.overflow.is_empty());

    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row.value(0), Some("B"));
    assert!(reader.read_row().unwrap().is_none());
}

#[test]
fn cell_values_are_not_trimmed_by_the_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "input.tsv", "id\n  spaced  \n");

    let mut reader = DelimitedReader::open(&path, b'\t').unwrap();
    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row.value(0), Some("  spaced  "));
}

#[test]
fn overflow_tokens_beyond_declared_headers_are_captured() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "input.tsv", "id\tsex\nA\tm\textra\tmore\n");

    let mut reader = DelimitedReader::open(&path, b'\t').unwrap();
    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row.value(0), Some("A"));
    assert_eq!(row.overflow, vec!["extra", "more"]);
    assert!(!row.is_blank());
}

#[test]
fn short_rows_pad_with_absent_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "input.tsv", "id\tsex\tage\nA\n");

    let mut reader = DelimitedReader::open(&path, b'\t').unwrap();
    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row.value(0), Some("A"));
    assert_eq!(row.value(1), None);
    assert_eq!(row.value(2), None);
}

#[test]
fn blank_row_detection_covers_declared_and_overflow_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "input.tsv", "id\tsex\n\t\n\t\t  \t\nA\t\n");

    let mut reader = DelimitedReader::open(&path, b'\t').unwrap();
    assert!(reader.read_row().unwrap().unwrap().is_blank());
    assert!(reader.read_row().unwrap().unwrap().is_blank());
    assert!(!reader.read_row().unwrap().unwrap().is_blank());
}

#[test]
fn comma_delimited_input_is_supported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "input.csv", "id,sex\nA,m\n");

    let mut reader = DelimitedReader::open(&path, b',').unwrap();
    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row.value(1), Some("m"));
}

#[test]
fn bom_is_stripped_from_the_first_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "input.tsv", "\u{feff}id\tsex\nA\tm\n");

    let reader = DelimitedReader::open(&path, b'\t').unwrap();
    assert_eq!(reader.headers(), ["id", "sex"]);
}

#[test]
fn writer_emits_header_then_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let headers = vec!["subject_id".to_string(), "sex".to_string()];

    let mut writer = CsvWriter::create(&path, &headers).unwrap();
    writer
        .write_row(&["1".to_string(), "Male".to_string()])
        .unwrap();
    writer.finish().unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "subject_id,sex\n1,Male\n");
}

#[test]
fn gzip_output_roundtrips_through_gzip_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv.gz");
    let headers = vec!["subject_id".to_string(), "sex".to_string()];

    let mut writer = CsvWriter::create(&path, &headers).unwrap();
    writer
        .write_row(&["1".to_string(), "Female".to_string()])
        .unwrap();
    writer.finish().unwrap();

    // compressed on disk, with the trailer already written by finish():
    // the last four bytes carry the uncompressed length
    let raw = fs::read(&path).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);
    let expected = "subject_id,sex\n1,Female\n";
    let trailer = u32::from_le_bytes(raw[raw.len() - 4..].try_into().unwrap());
    assert_eq!(trailer as usize, expected.len());

    let mut text = String::new();
    open_input(&path).unwrap().read_to_string(&mut text).unwrap();
    assert_eq!(text, expected);

    let mut reader = DelimitedReader::open(&path, b',').unwrap();
    assert_eq!(reader.headers(), ["subject_id", "sex"]);
    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row.value(1), Some("Female"));
}
