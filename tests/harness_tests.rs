//! End-to-end harness runs over real files on disk.

mod common;

use common::{TempCsv, CROSS_HEADER, SCALAR_HEADER, VOLUME_HEADER};
use vecalc::{
    config::Config,
    csv::CsvReader,
    geometry::{volume, Vector3},
    harness::{run_all, run_file, run_kinds, TestKind, TestRunner},
    CalcError, ErrorType,
};

#[test]
fn unit_cube_row_passes_parallelepiped_volume() {
    let csv = TempCsv::new("unit-cube", &format!("{VOLUME_HEADER}\n1,0,0,0,1,0,0,0,1,1.0\n"));
    let report = run_file(csv.path(), TestKind::ParallelepipedVolume, &Config::default()).unwrap();
    assert_eq!((report.total, report.passed, report.failed), (1, 1, 0));
}

#[test]
fn coplanar_row_passes_without_error() {
    let csv = TempCsv::new("coplanar", &format!("{VOLUME_HEADER}\n1,0,0,2,0,0,3,0,0,0.0\n"));
    let report = run_file(csv.path(), TestKind::ParallelepipedVolume, &Config::default()).unwrap();
    assert_eq!((report.total, report.passed, report.failed), (1, 1, 0));
    assert!(report.failures.is_empty());
}

#[test]
fn cross_product_row_passes() {
    let csv = TempCsv::new("cross", &format!("{CROSS_HEADER}\n1,0,0,0,1,0,0,0,1\n"));
    let reader = CsvReader::open(csv.path(), 1024).unwrap();
    let report = TestRunner::new().run_cross_product_tests(reader).unwrap();
    assert_eq!((report.total, report.passed), (1, 1));
}

#[test]
fn twelve_field_row_is_an_arity_failure_for_cross_product() {
    let csv = TempCsv::new("cross-12", &format!("{CROSS_HEADER}\n1,0,0,0,1,0,0,0,1,0,0,1\n"));
    let report = run_file(csv.path(), TestKind::CrossProduct, &Config::default()).unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.failures[0].reason, "expected 9 fields, found 12");
}

#[test]
fn scalar_mismatch_is_reported_with_line_number() {
    let content = format!("{SCALAR_HEADER}\n1,0,0,0,1,0,0\n1,0,0,0,2,0,5.0\n1,0,0,2,0,0,5.0\n");
    let csv = TempCsv::new("scalar-mismatch", &content);
    let report = run_file(csv.path(), TestKind::ScalarProduct, &Config::default()).unwrap();
    assert_eq!((report.total, report.passed, report.failed), (3, 1, 2));
    assert_eq!(report.failures[0].line, 3);
    assert_eq!(report.failures[0].reason, "expected 5.0 got 0.0");
    assert_eq!(report.failures[1].line, 4);
    assert_eq!(report.failures[1].reason, "expected 5.0 got 2.0");
}

#[test]
fn header_only_file_has_zero_counts() {
    let csv = TempCsv::new("header-only", &format!("{SCALAR_HEADER}\n"));
    let report = run_file(csv.path(), TestKind::ScalarProduct, &Config::default()).unwrap();
    assert_eq!((report.total, report.passed, report.failed), (0, 0, 0));
}

#[test]
fn empty_file_is_distinct_from_missing_file() {
    let csv = TempCsv::new("empty", "");
    let empty = run_file(csv.path(), TestKind::ScalarProduct, &Config::default()).unwrap_err();
    assert!(matches!(empty, CalcError::EmptyFile { .. }));

    let missing = run_file("no/such/cases.csv", TestKind::ScalarProduct, &Config::default())
        .unwrap_err();
    assert!(matches!(missing, CalcError::FileOpen { .. }));
    assert_eq!(missing.error_type(), ErrorType::File);
}

#[test]
fn malformed_row_does_not_stop_later_rows() {
    let content =
        format!("{SCALAR_HEADER}\n1,2,3,4\n1,2,3,4,5,6,32\n1,2,3,4,5,6,x\n0,0,1,0,0,1,1\n");
    let csv = TempCsv::new("malformed", &content);
    let report = run_file(csv.path(), TestKind::ScalarProduct, &Config::default()).unwrap();
    assert_eq!((report.total, report.passed, report.failed), (4, 2, 2));
    let lines: Vec<usize> = report.failures.iter().map(|f| f.line).collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn verdicts_agree_with_direct_volume_computation() {
    let rows = [
        ([1.0, 2.0, 3.0, 0.5, -1.0, 2.0, 4.0, 0.0, 1.0], 12.0),
        ([2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0], 24.0),
        ([1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0], 2.0),
        ([0.3, 0.1, 0.7, 1.1, -0.4, 0.2, 0.9, 0.8, -0.6], 0.5),
    ];
    let mut content = format!("{VOLUME_HEADER}\n");
    let mut expected_passes = 0;
    for (c, expected) in &rows {
        let fields: Vec<String> = c.iter().map(|v| v.to_string()).collect();
        content.push_str(&format!("{},{expected}\n", fields.join(",")));
        let direct = volume(
            &Vector3::new(c[0], c[1], c[2]),
            &Vector3::new(c[3], c[4], c[5]),
            &Vector3::new(c[6], c[7], c[8]),
            1.0,
        );
        if (direct - expected).abs() < 1e-3 {
            expected_passes += 1;
        }
    }
    let csv = TempCsv::new("direct", &content);
    let report = run_file(csv.path(), TestKind::ParallelepipedVolume, &Config::default()).unwrap();
    assert_eq!(report.total, rows.len() as u32);
    assert_eq!(report.passed, expected_passes);
}

#[test]
fn running_twice_gives_identical_reports() {
    let content = format!("{CROSS_HEADER}\n1,0,0,0,1,0,0,0,1\n0,1,0,1,0,0,0,0,1\nbad\n");
    let csv = TempCsv::new("idempotent", &content);
    let first = run_file(csv.path(), TestKind::CrossProduct, &Config::default()).unwrap();
    let second = run_file(csv.path(), TestKind::CrossProduct, &Config::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!((first.passed, first.failed), (1, 2));
}

#[test]
fn run_all_gives_every_kind_the_whole_file() {
    let content = format!("{VOLUME_HEADER}\n1,0,0,0,1,0,0,0,6,6.0\n1,0,0,0,1,0,0,0,6,1.0\n");
    let csv = TempCsv::new("run-all", &content);
    let suite = run_all(csv.path(), &Config::default()).unwrap();
    assert_eq!(suite.reports.len(), 4);
    for report in &suite.reports {
        assert_eq!(report.total, 2, "{} saw {} records", report.label, report.total);
    }
    assert_eq!(suite.reports[0].passed, 1); // parallelepiped: 6.0
    assert_eq!(suite.reports[1].passed, 1); // pyramid: 1.0
    assert_eq!(suite.reports[2].failed, 2); // cross needs 9 fields
    assert_eq!(suite.reports[3].failed, 2); // scalar needs 7 fields
}

#[test]
fn line_limit_comes_from_config() {
    let content = format!("{SCALAR_HEADER}\n1,0,0,0,1,0,0.000000000000000\n1,0,0,0,1,0,0\n");
    let csv = TempCsv::new("line-limit", &content);
    let config = Config {
        max_line_length: 20,
        ..Config::default()
    };
    let suite = run_kinds(csv.path(), &[TestKind::ScalarProduct], &config).unwrap();
    let report = &suite.reports[0];
    assert_eq!((report.total, report.passed, report.failed), (2, 1, 1));
    assert!(report.failures[0].reason.contains("20-byte limit"));
}
