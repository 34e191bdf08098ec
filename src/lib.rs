//! vecalc: 3D vector algebra and triple-product volumes, plus a CSV-driven
//! test harness that checks tabulated cases against the geometry functions.

pub use crate::diagnostics::{CalcError, ErrorType};

pub mod cli;
pub mod config;
pub mod csv;
pub mod diagnostics;
pub mod geometry;
pub mod harness;
pub mod menu;
