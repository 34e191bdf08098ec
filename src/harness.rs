//! # Test Harness
//!
//! Runs CSV test files against the geometry functions and tallies the results.
//!
//! A run reads the header line, then checks every non-blank record: the record
//! is interpreted, the geometry function for its [`TestKind`] is evaluated, and
//! the result is compared with the expected value within
//! [`TOLERANCE`](crate::geometry::TOLERANCE). Malformed or mismatching records
//! are counted as failures with a diagnostic; only file-level errors stop a run.

use serde::Serialize;

use crate::diagnostics::CalcError;

pub mod kind;
pub mod runner;

pub use kind::TestKind;
pub use runner::{run_all, run_file, run_kinds, TestRunner};

/// A single failed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// 1-based line of the record in its file.
    pub line: usize,
    pub reason: String,
}

/// Outcome of running one test kind over one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub label: String,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub failures: Vec<Failure>,
}

impl TestReport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            total: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    pub fn record_pass(&mut self) {
        self.total = self.total.saturating_add(1);
        self.passed = self.passed.saturating_add(1);
    }

    pub fn record_failure(&mut self, line: usize, error: &CalcError) {
        self.total = self.total.saturating_add(1);
        self.failed = self.failed.saturating_add(1);
        self.failures.push(Failure {
            line,
            reason: error.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }
}

/// Reports of several kinds run against the same file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SuiteReport {
    pub reports: Vec<TestReport>,
}

impl SuiteReport {
    pub fn push(&mut self, report: TestReport) {
        self.reports.push(report);
    }

    pub fn total(&self) -> u32 {
        self.reports.iter().fold(0u32, |acc, r| acc.saturating_add(r.total))
    }

    pub fn passed(&self) -> u32 {
        self.reports.iter().fold(0u32, |acc, r| acc.saturating_add(r.passed))
    }

    pub fn failed(&self) -> u32 {
        self.reports.iter().fold(0u32, |acc, r| acc.saturating_add(r.failed))
    }

    pub fn has_failures(&self) -> bool {
        self.reports.iter().any(TestReport::has_failures)
    }
}
