//! Defines the command-line arguments and subcommands for the vecalc CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{config::ColorMode, geometry::Combination, harness::TestKind};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "vecalc",
    version,
    about = "A 3D vector and volume calculator with a CSV-driven test harness."
)]
pub struct VecalcArgs {
    /// YAML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// When to use colored output. Overrides the configuration file.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check every record of a CSV test file and report pass/fail counts.
    ///
    /// With `--kind all` the file is reopened for each kind, so every kind
    /// sees every record.
    Test {
        /// The CSV test file. Its first line is a header and is skipped.
        #[arg(required = true)]
        file: PathBuf,
        /// Which operation the records are checked against.
        #[arg(long, value_enum, default_value_t = KindSelection::All)]
        kind: KindSelection,
        /// Print the reports as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Parallelepiped and pyramid volume of three vectors.
    Volume {
        /// x1 y1 z1 x2 y2 z2 x3 y3 z3
        #[arg(num_args = 9, required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Cross product of two vectors.
    Cross {
        /// x1 y1 z1 x2 y2 z2
        #[arg(num_args = 6, required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Scalar (dot) product of two vectors.
    Scalar {
        /// x1 y1 z1 x2 y2 z2
        #[arg(num_args = 6, required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Add or subtract 2 to 10 vectors.
    Combine {
        /// `add` sums every vector; `sub` subtracts the rest from the first.
        #[arg(long, value_enum, default_value_t = CombineOp::Add)]
        op: CombineOp,
        /// Components of each vector, three per vector.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Unit vector with the same direction.
    Normalize {
        /// x y z
        #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Check whether points lie inside the parallelepiped spanned by three vectors.
    Contains {
        /// Three shape vectors followed by 1 to 7 points, three components each.
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Start the interactive menu.
    Menu,
}

/// Test kinds selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindSelection {
    Parallelepiped,
    Pyramid,
    Cross,
    Scalar,
    All,
}

impl KindSelection {
    pub fn kinds(&self) -> Vec<TestKind> {
        match self {
            KindSelection::Parallelepiped => vec![TestKind::ParallelepipedVolume],
            KindSelection::Pyramid => vec![TestKind::PyramidVolume],
            KindSelection::Cross => vec![TestKind::CrossProduct],
            KindSelection::Scalar => vec![TestKind::ScalarProduct],
            KindSelection::All => TestKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CombineOp {
    Add,
    Sub,
}

impl From<CombineOp> for Combination {
    fn from(op: CombineOp) -> Self {
        match op {
            CombineOp::Add => Combination::Sum,
            CombineOp::Sub => Combination::Difference,
        }
    }
}
