use std::{io::BufRead, path::Path};

use log::{debug, info, warn};

use crate::{
    config::Config,
    csv::{interpret, CsvReader, Quantity, RawLine, RecordLayout, ResultShape},
    diagnostics::CalcError,
    geometry::{self, Vector3, TOLERANCE},
    harness::{SuiteReport, TestKind, TestReport},
};

/// Checks CSV records against the geometry functions.
///
/// Every run takes its [`CsvReader`] by value and closes it when done, so a
/// reader serves exactly one run. The reader must not have been read from yet:
/// the runner consumes the header itself.
#[derive(Debug, Clone, Copy)]
pub struct TestRunner {
    tolerance: f64,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
        }
    }
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `kind` over every record of `reader`.
    pub fn run_kind<R: BufRead>(
        &self,
        reader: CsvReader<R>,
        kind: TestKind,
    ) -> Result<TestReport, CalcError> {
        let spec = kind.spec();
        self.run_records(reader, spec.label, spec.layout, spec.evaluate)
    }

    /// Volume records (`x1..z3,expected`) checked against `|v1 · (v2 × v3)| / k`.
    pub fn run_volume_tests<R: BufRead>(
        &self,
        reader: CsvReader<R>,
        shape_label: &str,
        k: f64,
    ) -> Result<TestReport, CalcError> {
        let layout = RecordLayout::new(3, ResultShape::Scalar);
        self.run_records(reader, shape_label, layout, |v: &[Vector3]| {
            Quantity::Scalar(geometry::volume(&v[0], &v[1], &v[2], k))
        })
    }

    pub fn run_cross_product_tests<R: BufRead>(
        &self,
        reader: CsvReader<R>,
    ) -> Result<TestReport, CalcError> {
        self.run_kind(reader, TestKind::CrossProduct)
    }

    pub fn run_scalar_product_tests<R: BufRead>(
        &self,
        reader: CsvReader<R>,
    ) -> Result<TestReport, CalcError> {
        self.run_kind(reader, TestKind::ScalarProduct)
    }

    fn run_records<R, F>(
        &self,
        mut reader: CsvReader<R>,
        label: &str,
        layout: RecordLayout,
        evaluate: F,
    ) -> Result<TestReport, CalcError>
    where
        R: BufRead,
        F: Fn(&[Vector3]) -> Quantity,
    {
        info!("running {label} tests from {}", reader.name());
        reader.read_header()?;

        let mut report = TestReport::new(label);
        loop {
            let line = match reader.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) if e.is_record_level() => {
                    let number = e.line().unwrap_or_else(|| reader.line_number());
                    warn!("{}:{number}: {e}", reader.name());
                    report.record_failure(number, &e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            if line.is_blank() {
                continue;
            }

            match self.check_record(&line, layout, &evaluate) {
                Ok(()) => {
                    debug!("{}:{}: pass", line.origin, line.number);
                    report.record_pass();
                }
                Err(e) => {
                    warn!("{}:{}: {e}", line.origin, line.number);
                    report.record_failure(line.number, &e);
                }
            }
        }
        reader.close();

        info!(
            "{label}: {} total, {} passed, {} failed",
            report.total, report.passed, report.failed
        );
        Ok(report)
    }

    fn check_record<F>(&self, line: &RawLine, layout: RecordLayout, evaluate: &F) -> Result<(), CalcError>
    where
        F: Fn(&[Vector3]) -> Quantity,
    {
        let case = interpret(line, layout)?;
        let actual = evaluate(&case.inputs);
        if actual.within_tolerance(&case.expected, self.tolerance) {
            return Ok(());
        }
        Err(CalcError::ToleranceMismatch {
            line: case.line,
            expected: case.expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

// ============================================================================
// FILE-LEVEL ENTRY POINTS
// ============================================================================

/// Runs one kind over the file at `path`.
pub fn run_file<P: AsRef<Path>>(path: P, kind: TestKind, config: &Config) -> Result<TestReport, CalcError> {
    let reader = CsvReader::open(path, config.max_line_length)?;
    TestRunner::new().run_kind(reader, kind)
}

/// Runs each of `kinds` over the file at `path`, reopening it for every kind so
/// each run starts from the header.
pub fn run_kinds<P: AsRef<Path>>(
    path: P,
    kinds: &[TestKind],
    config: &Config,
) -> Result<SuiteReport, CalcError> {
    let mut suite = SuiteReport::default();
    for &kind in kinds {
        suite.push(run_file(path.as_ref(), kind, config)?);
    }
    Ok(suite)
}

/// Runs every [`TestKind`] over the file at `path`.
pub fn run_all<P: AsRef<Path>>(path: P, config: &Config) -> Result<SuiteReport, CalcError> {
    run_kinds(path, &TestKind::ALL, config)
}
