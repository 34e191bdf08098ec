//! The vecalc Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{io, path::Path, process};

use clap::Parser;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::{
    cli::args::{Command, KindSelection, VecalcArgs},
    config::{Config, OutputFormat},
    diagnostics::CalcError,
    geometry::{self, Combination, Vector3},
    harness,
    menu::Menu,
};

pub mod args;
pub mod output;

/// Exit status when at least one record failed.
const EXIT_FAILURES: i32 = 1;
/// Exit status for file-level, configuration and input errors.
const EXIT_ERROR: i32 = 2;

/// The main entry point for the CLI.
pub fn run() {
    let args = VecalcArgs::parse();

    let mut config = Config::load_or_default(args.config.as_deref()).unwrap_or_else(|e| {
        output::print_error(e);
        process::exit(EXIT_ERROR);
    });
    if let Some(color) = args.color {
        config.color = color;
    }
    log::debug!("configuration: {config:?}");

    let choice = config.color.color_choice();
    let code = match args.command {
        None | Some(Command::Menu) => run_menu(config, choice),
        Some(Command::Test { file, kind, json }) => {
            if json {
                config.format = OutputFormat::Json;
            }
            run_tests(&file, kind, &config, choice)
        }
        Some(command) => run_calculation(command, choice),
    };

    if code != 0 {
        process::exit(code);
    }
}

// ============================================================================
// SUBCOMMAND HANDLERS
// ============================================================================

fn run_tests(file: &Path, selection: KindSelection, config: &Config, choice: ColorChoice) -> i32 {
    let suite = match harness::run_kinds(file, &selection.kinds(), config) {
        Ok(suite) => suite,
        Err(e) => {
            output::print_error(e);
            return EXIT_ERROR;
        }
    };

    let written = match config.format {
        OutputFormat::Json => output::write_json(&mut io::stdout().lock(), &suite),
        OutputFormat::Text => {
            let mut stdout = StandardStream::stdout(choice);
            output::write_suite(&mut stdout, &suite)
        }
    };
    if let Err(e) = written {
        eprintln!("Error writing report: {e}");
        return EXIT_ERROR;
    }

    if suite.has_failures() {
        EXIT_FAILURES
    } else {
        0
    }
}

fn run_calculation(command: Command, choice: ColorChoice) -> i32 {
    let mut stdout = StandardStream::stdout(choice);
    match calculate(command, &mut stdout) {
        Ok(()) => 0,
        Err(e) => {
            output::print_error(e);
            EXIT_ERROR
        }
    }
}

/// Runs a one-shot calculation subcommand.
pub fn calculate<W: WriteColor>(command: Command, w: &mut W) -> Result<(), CalcError> {
    let io_err = |e: io::Error| CalcError::invalid_input(format!("cannot write output: {e}"));
    match command {
        Command::Volume { values } => {
            let v = to_vectors(&values)?;
            output::write_volumes(w, &[v[0], v[1], v[2]]).map_err(io_err)
        }
        Command::Cross { values } => {
            let v = to_vectors(&values)?;
            output::write_cross(w, &v[0], &v[1]).map_err(io_err)
        }
        Command::Scalar { values } => {
            let v = to_vectors(&values)?;
            output::write_scalar(w, &v[0], &v[1]).map_err(io_err)
        }
        Command::Combine { op, values } => {
            let op = Combination::from(op);
            let result = geometry::combine(&to_vectors(&values)?, op)?;
            output::write_combination(w, op, &result).map_err(io_err)
        }
        Command::Normalize { values } => {
            let v = to_vectors(&values)?;
            let normal = geometry::normalize(&v[0])?;
            output::write_normal(w, &normal).map_err(io_err)
        }
        Command::Contains { values } => {
            let v = to_vectors(&values)?;
            if !(4..=10).contains(&v.len()) {
                return Err(CalcError::invalid_input(format!(
                    "expected 3 shape vectors and 1 to 7 points, got {} vectors",
                    v.len()
                )));
            }
            let shape = [v[0], v[1], v[2]];
            for (i, point) in v.iter().enumerate().skip(3) {
                let located = geometry::locate_point(&shape, point)?;
                if i == 3 {
                    writeln!(w, "Shape Volume: {:.6}\n", located.volume).map_err(io_err)?;
                }
                output::write_containment(w, i + 1, &located).map_err(io_err)?;
            }
            Ok(())
        }
        Command::Test { .. } | Command::Menu => Err(CalcError::invalid_input(
            "not a calculation subcommand",
        )),
    }
}

fn run_menu(config: Config, choice: ColorChoice) -> i32 {
    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), StandardStream::stdout(choice), config);
    match menu.run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Groups a flat list of components into vectors, three at a time.
fn to_vectors(values: &[f64]) -> Result<Vec<Vector3>, CalcError> {
    if values.is_empty() || values.len() % 3 != 0 {
        return Err(CalcError::invalid_input(format!(
            "vector components come in threes, got {} numbers",
            values.len()
        )));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(CalcError::invalid_input(format!("{bad} is not a finite number")));
    }
    Ok(values
        .chunks_exact(3)
        .map(|c| Vector3::new(c[0], c[1], c[2]))
        .collect())
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::*;
    use crate::cli::args::CombineOp;

    fn render(command: Command) -> Result<String, CalcError> {
        let mut out = NoColor::new(Vec::new());
        calculate(command, &mut out)?;
        Ok(String::from_utf8(out.into_inner()).unwrap())
    }

    #[test]
    fn to_vectors_requires_triples() {
        assert_eq!(to_vectors(&[1.0, 2.0, 3.0]).unwrap().len(), 1);
        assert!(to_vectors(&[1.0, 2.0]).is_err());
        assert!(to_vectors(&[]).is_err());
        assert!(to_vectors(&[1.0, f64::NAN, 3.0]).is_err());
    }

    #[test]
    fn scalar_subcommand() {
        let out = render(Command::Scalar {
            values: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        })
        .unwrap();
        assert_eq!(out, "V1 · V2 = 32.000000\n");
    }

    #[test]
    fn combine_subcommand_adds() {
        let out = render(Command::Combine {
            op: CombineOp::Add,
            values: vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        })
        .unwrap();
        assert!(out.contains("Sum: [1.000000, 1.000000, 0.000000]"));
    }

    #[test]
    fn contains_rejects_flat_shape() {
        let err = render(Command::Contains {
            values: vec![1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.1, 0.1, 0.0],
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::DegenerateShape { .. }));
    }

    #[test]
    fn contains_needs_at_least_one_point() {
        let err = render(Command::Contains {
            values: vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }
}
