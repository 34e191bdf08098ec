//! Handles all user-facing output for the CLI and the interactive menu.
//!
//! Every writer takes a `WriteColor` so the same code renders to a colored
//! terminal, to a plain pipe, or into a buffer under test.

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::{
    diagnostics::CalcError,
    geometry::{self, Combination, Containment, Shape, Vector3},
    harness::{SuiteReport, TestReport},
};

// ============================================================================
// TEST REPORTS
// ============================================================================

/// Writes one report: header, itemized failures, then the tally.
pub fn write_report<W: WriteColor>(w: &mut W, report: &TestReport) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(w, "--- {} Tests ---", report.label)?;
    w.reset()?;

    for failure in &report.failures {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(w, "✗ line {}", failure.line)?;
        w.reset()?;
        writeln!(w, ": {}", failure.reason)?;
    }

    write_tally(w, report.total, report.passed, report.failed)?;
    writeln!(w)
}

/// Writes every report of a suite followed by an overall summary.
pub fn write_suite<W: WriteColor>(w: &mut W, suite: &SuiteReport) -> io::Result<()> {
    for report in &suite.reports {
        write_report(w, report)?;
    }
    if suite.reports.len() > 1 {
        w.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(w, "Overall Summary")?;
        writeln!(w, "═══════════════")?;
        w.reset()?;
        write_tally(w, suite.total(), suite.passed(), suite.failed())?;
    }
    Ok(())
}

/// Writes a suite as pretty-printed JSON.
pub fn write_json<W: Write>(w: &mut W, suite: &SuiteReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, suite).map_err(io::Error::other)?;
    writeln!(w)
}

fn write_tally<W: WriteColor>(w: &mut W, total: u32, passed: u32, failed: u32) -> io::Result<()> {
    writeln!(w, "Total:  {total}")?;
    w.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(w, "✓ Passed: {passed}")?;
    if failed > 0 {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    } else {
        w.reset()?;
    }
    writeln!(w, "✗ Failed: {failed}")?;
    w.reset()?;
    let rate = if total > 0 {
        (passed as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    writeln!(w, "Success Rate: {rate:.1}% ({passed}/{total})")
}

// ============================================================================
// CALCULATIONS
// ============================================================================

pub fn write_volumes<W: WriteColor>(w: &mut W, v: &[Vector3; 3]) -> io::Result<()> {
    let parallelepiped = geometry::shape_volume(Shape::Parallelepiped, &v[0], &v[1], &v[2]);
    let pyramid = geometry::shape_volume(Shape::Pyramid, &v[0], &v[1], &v[2]);
    writeln!(w, "{}: {parallelepiped:.6}", Shape::Parallelepiped.label())?;
    writeln!(w, "{}: {pyramid:.6}", Shape::Pyramid.label())?;
    if geometry::is_coplanar(&v[0], &v[1], &v[2]) {
        write_warning(w, "Vectors are coplanar (parallel or in same plane)")?;
    }
    Ok(())
}

pub fn write_cross<W: WriteColor>(w: &mut W, a: &Vector3, b: &Vector3) -> io::Result<()> {
    let result = geometry::cross_product(a, b);
    let (dot_a, dot_b) = geometry::verify_orthogonality(a, b, &result);
    writeln!(w, "V1 × V2 = {result}")?;
    writeln!(w, "Magnitude: {:.6}", result.magnitude())?;
    writeln!(
        w,
        "Verification: V1·result = {dot_a:.6}, V2·result = {dot_b:.6} (should be ~0)"
    )
}

pub fn write_scalar<W: WriteColor>(w: &mut W, a: &Vector3, b: &Vector3) -> io::Result<()> {
    writeln!(w, "V1 · V2 = {:.6}", geometry::scalar_product(a, b))
}

pub fn write_combination<W: WriteColor>(
    w: &mut W,
    op: Combination,
    result: &Vector3,
) -> io::Result<()> {
    let name = match op {
        Combination::Sum => "Sum",
        Combination::Difference => "Difference",
    };
    writeln!(w, "{name}: {result}")?;
    writeln!(w, "Magnitude: {:.6}", result.magnitude())
}

pub fn write_normal<W: WriteColor>(w: &mut W, normal: &Vector3) -> io::Result<()> {
    writeln!(w, "Normal (Unit) Vector: {normal}")?;
    writeln!(w, "Magnitude: {:.6}", normal.magnitude())
}

/// Writes the location of the point numbered `index` (1-based, as entered).
pub fn write_containment<W: WriteColor>(
    w: &mut W,
    index: usize,
    located: &Containment,
) -> io::Result<()> {
    let [u, v, t] = located.coordinates;
    writeln!(w, "Checking Vector {index}:")?;
    writeln!(w, "  Edge coordinates: ({u:.6}, {v:.6}, {t:.6})")?;
    if located.inside {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(w, "  Result: Vector IS inside the parallelepiped")?;
    } else {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(w, "  Result: Vector IS NOT inside the parallelepiped")?;
    }
    w.reset()
}

pub fn write_warning<W: WriteColor>(w: &mut W, message: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    write!(w, "Warning:")?;
    w.reset()?;
    writeln!(w, " {message}")
}

// ============================================================================
// ERRORS
// ============================================================================

/// Renders an error as a miette report on stderr.
pub fn print_error(error: CalcError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
