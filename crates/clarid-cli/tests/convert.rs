//! End-to-end conversion tests driven through the CLI surface.

use std::fs;
use std::io::Read;
use std::path::Path;

use clap::Parser;
use clarid_cli::cli::Cli;
use clarid_cli::commands::run_convert;

const MAPPING: &str = "\
output_headers: [subject_id, sex, age_group]
fields:
  subject_id:
    source: Participant
    operations: [strip_quotes]
  sex:
    source: Sex
    operations: [normalize_sex]
  age_group:
    source: Age
    operations:
      - trim
      - bucketize_age:
          - { name: child, min: 0, max: 17 }
          - { name: adult, min: 18, max: 120 }
static_fields:
  sex: Unknown
  age_group: Unknown
";

fn cli(dir: &Path, input: &str, output: &str, extra: &[&str]) -> Cli {
    let input = dir.join(input);
    let output = dir.join(output);
    let mapping = dir.join("mapping.yaml");
    let mut args = vec![
        "clarid-convert".to_string(),
        "--entity".to_string(),
        "subject".to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
        "-m".to_string(),
        mapping.display().to_string(),
    ];
    args.extend(extra.iter().map(|arg| (*arg).to_string()));
    Cli::try_parse_from(args).expect("parse cli args")
}

#[test]
fn converts_grouped_subjects_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mapping.yaml"), MAPPING).unwrap();
    fs::write(
        dir.path().join("input.tsv"),
        "Participant\tSex\tAge\n\
         \"P1\"\tmale\t4\n\
         \"P1\"\tmale\t\n\
         P2\t\t44\n\
         \t\t\n",
    )
    .unwrap();

    let args = cli(dir.path(), "input.tsv", "out.csv", &[]);
    let result = run_convert(&args).unwrap();
    assert_eq!(result.records_written, 3);
    assert_eq!(result.rows_skipped, 1);
    assert_eq!(result.subjects_assigned, 2);

    let written = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(
        written,
        "subject_id,sex,age_group\n\
         1,Male,child\n\
         1,Male,Unknown\n\
         2,Unknown,adult\n"
    );
}

#[test]
fn comma_delimited_input_via_flag() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mapping.yaml"), MAPPING).unwrap();
    fs::write(
        dir.path().join("input.csv"),
        "Participant,Sex,Age\nP1,female,30\n",
    )
    .unwrap();

    let args = cli(dir.path(), "input.csv", "out.csv", &["-d", ","]);
    let result = run_convert(&args).unwrap();
    assert_eq!(result.records_written, 1);

    let written = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert!(written.contains("1,Female,adult"), "{written}");
}

#[test]
fn gzip_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mapping.yaml"), MAPPING).unwrap();

    let raw = "Participant\tSex\tAge\nP1\tmale\t4\n";
    let gz = fs::File::create(dir.path().join("input.tsv.gz")).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(gz, flate2::Compression::default());
    std::io::Write::write_all(&mut encoder, raw.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let args = cli(dir.path(), "input.tsv.gz", "out.csv.gz", &[]);
    let result = run_convert(&args).unwrap();
    assert_eq!(result.records_written, 1);

    let file = fs::File::open(dir.path().join("out.csv.gz")).unwrap();
    let mut decoder = flate2::read::GzDecoder::new(file);
    let mut text = String::new();
    decoder.read_to_string(&mut text).unwrap();
    assert_eq!(text, "subject_id,sex,age_group\n1,Male,child\n");
}

#[test]
fn unknown_operation_aborts_before_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("mapping.yaml"),
        "output_headers: [subject_id, sex]\n\
         fields:\n  \
           sex:\n    \
             source: Sex\n    \
             operations: [uppercase]\n",
    )
    .unwrap();
    fs::write(dir.path().join("input.tsv"), "Sex\nmale\n").unwrap();

    let args = cli(dir.path(), "input.tsv", "out.csv", &[]);
    let error = run_convert(&args).unwrap_err();
    assert!(format!("{error:#}").contains("unknown variant"), "{error:#}");
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn missing_source_column_aborts_before_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mapping.yaml"), MAPPING).unwrap();
    fs::write(dir.path().join("input.tsv"), "Participant\tSex\nP1\tmale\n").unwrap();

    let args = cli(dir.path(), "input.tsv", "out.csv", &[]);
    let error = run_convert(&args).unwrap_err();
    assert!(format!("{error:#}").contains("Age"), "{error:#}");
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn multibyte_delimiter_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mapping.yaml"), MAPPING).unwrap();
    fs::write(dir.path().join("input.tsv"), "Participant\tSex\tAge\n").unwrap();

    let args = cli(dir.path(), "input.tsv", "out.csv", &["-d", "||"]);
    let error = run_convert(&args).unwrap_err();
    assert!(
        format!("{error:#}").contains("single byte"),
        "{error:#}"
    );
}
