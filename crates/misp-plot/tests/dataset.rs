// File: crates/misp-plot/tests/dataset.rs
// Purpose: CSV loading, column checks and per-testcase grouping.

mod common;

use std::path::Path;

use misp_plot::{Dataset, PlotError};

fn parse(csv: &str) -> Result<Dataset, PlotError> {
    Dataset::from_reader(csv.as_bytes(), Path::new("input.csv"))
}

#[test]
fn example_groups_in_first_appearance_order() {
    let ds = parse(common::EXAMPLE_CSV).expect("parse");
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.testcases(), vec!["gcc", "mcf"]);

    let groups = ds.group_by_testcase();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].testcase, "gcc");
    assert_eq!(groups[0].points, vec![(4.0, 12.5), (8.0, 9.1)]);
    assert_eq!(groups[1].testcase, "mcf");
    assert_eq!(groups[1].points, vec![(4.0, 20.0), (8.0, 15.3)]);
}

#[test]
fn interleaved_rows_keep_row_order_without_sorting() {
    let csv = "\
TESTCASE,history_bits,misp_rate
mcf,16,3.0
gcc,8,9.0
mcf,4,7.5
gcc,8,9.0
gcc,2,11.0
";
    let groups = parse(csv).expect("parse").group_by_testcase();
    assert_eq!(groups.iter().map(|g| g.testcase.as_str()).collect::<Vec<_>>(), vec!["mcf", "gcc"]);
    assert_eq!(groups[0].points, vec![(16.0, 3.0), (4.0, 7.5)]);
    // duplicates are kept
    assert_eq!(groups[1].points, vec![(8.0, 9.0), (8.0, 9.0), (2.0, 11.0)]);
}

#[test]
fn extra_columns_and_column_order_do_not_matter() {
    let csv = "\
misp_rate,predictor,TESTCASE,history_bits,num_branches
12.5,bimodal,gcc,4,1000
9.25,bimodal,gcc,8.0,1000
";
    let ds = parse(csv).expect("parse");
    assert_eq!(ds.group_by_testcase()[0].points, vec![(4.0, 12.5), (8.0, 9.25)]);
}

#[test]
fn header_only_is_an_empty_dataset() {
    let ds = parse("TESTCASE,history_bits,misp_rate\n").expect("parse");
    assert!(ds.is_empty());
    assert!(ds.group_by_testcase().is_empty());
}

#[test]
fn missing_column_is_reported_by_name() {
    let err = parse("TESTCASE,history_bits\ngcc,4\n").unwrap_err();
    assert!(err.is_malformed());
    match err {
        PlotError::MissingColumn { column, .. } => assert_eq!(column, "misp_rate"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_file_misses_every_column() {
    let err = parse("").unwrap_err();
    assert!(matches!(err, PlotError::MissingColumn { column: "TESTCASE", .. }));
}

#[test]
fn unparseable_number_names_column_and_line() {
    let csv = "TESTCASE,history_bits,misp_rate\ngcc,4,12.5\ngcc,eight,9.1\n";
    match parse(csv).unwrap_err() {
        PlotError::MalformedInput { column, line, .. } => {
            assert_eq!(column, "history_bits");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_finite_rate_is_malformed() {
    let csv = "TESTCASE,history_bits,misp_rate\ngcc,4,NaN\n";
    match parse(csv).unwrap_err() {
        PlotError::MalformedInput { column, .. } => assert_eq!(column, "misp_rate"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let csv = "TESTCASE, history_bits, misp_rate\n gcc , 4 , 12.5\n";
    let ds = parse(csv).expect("parse");
    assert_eq!(ds.records()[0].testcase, "gcc");
    assert_eq!(ds.records()[0].history_bits, 4.0);
}

#[test]
fn missing_file_is_not_found() {
    let dir = common::scratch_dir("dataset-missing");
    let err = Dataset::from_path(&dir.join("nope.csv")).unwrap_err();
    assert!(matches!(err, PlotError::InputNotFound { .. }));
    assert_eq!(err.exit_code(), 3);
}
