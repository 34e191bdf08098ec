//! vecalc interactive menu
//!
//! Text menus over any `BufRead`/`WriteColor` pair: run a CSV test suite,
//! perform single calculations, show the about page, or exit. Invalid input
//! returns to the main menu; end of input exits cleanly.

use std::{
    io::{self, BufRead},
    path::Path,
};

use termcolor::WriteColor;

use crate::{
    cli::output,
    config::Config,
    csv::CsvReader,
    geometry::{self, Combination, Vector3, MAX_COMBINE, MIN_COMBINE},
    harness::{self, TestKind},
};

/// Most vectors accepted by the point-location check (3 shape + points).
const MAX_LOCATE: usize = 10;

/// What the caller should do after a menu step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive menu state.
pub struct Menu<R, W> {
    input: R,
    out: W,
    config: Config,
}

impl<R: BufRead, W: WriteColor> Menu<R, W> {
    pub fn new(input: R, out: W, config: Config) -> Self {
        Self { input, out, config }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Main loop: runs until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_main_menu()?;
            let flow = match self.read_choice("Enter your choice (1-4): ")? {
                None => {
                    writeln!(self.out)?;
                    Flow::Quit
                }
                Some(1) => self.test_suite()?,
                Some(2) => self.calculations()?,
                Some(3) => self.about()?,
                Some(4) => Flow::Quit,
                Some(_) => {
                    writeln!(self.out, "\nInvalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                writeln!(self.out, "\nThank you for using the calculator!")?;
                return Ok(());
            }
        }
    }

    fn print_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "=============================================")?;
        writeln!(self.out, "||   Vector Calculator - Main Menu         ||")?;
        writeln!(self.out, "=============================================")?;
        writeln!(self.out, "  1. Run Automated Test Suite")?;
        writeln!(self.out, "  2. Calculations")?;
        writeln!(self.out, "  3. About")?;
        writeln!(self.out, "  4. Exit")?;
        writeln!(self.out)
    }

    // ========================================================================
    // TEST SUITE
    // ========================================================================

    fn test_suite(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Automated Test Suite Runner ---")?;
        let Some(path) = self.prompt("Enter the CSV test file path: ")? else {
            return Ok(Flow::Quit);
        };
        if path.is_empty() {
            writeln!(self.out, "Error: Empty filename")?;
            return Ok(Flow::Continue);
        }

        // Surface open and empty-file problems before asking which tests to run.
        let probe = CsvReader::open(&path, self.config.max_line_length)
            .and_then(|mut reader| reader.read_header());
        if let Err(e) = probe {
            writeln!(self.out, "Error: {e}")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.out, "\n--- Test Options ---")?;
        writeln!(self.out, "1. Test Parallelepiped Volume (k=1)")?;
        writeln!(self.out, "2. Test Pyramid Volume (k=6)")?;
        writeln!(self.out, "3. Test Cross Product")?;
        writeln!(self.out, "4. Test Scalar Product")?;
        writeln!(self.out, "5. Run All Tests")?;
        writeln!(self.out, "0. Cancel and Return to Main Menu")?;
        let kinds = match self.read_choice("Enter choice (0-5): ")? {
            None => return Ok(Flow::Quit),
            Some(0) => return Ok(Flow::Continue),
            Some(1) => vec![TestKind::ParallelepipedVolume],
            Some(2) => vec![TestKind::PyramidVolume],
            Some(3) => vec![TestKind::CrossProduct],
            Some(4) => vec![TestKind::ScalarProduct],
            Some(5) => TestKind::ALL.to_vec(),
            Some(_) => {
                writeln!(self.out, "Invalid choice.")?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.out)?;
        match harness::run_kinds(Path::new(&path), &kinds, &self.config) {
            Ok(suite) => output::write_suite(&mut self.out, &suite)?,
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    // ========================================================================
    // CALCULATIONS
    // ========================================================================

    fn calculations(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Calculation Mode ---")?;
        writeln!(self.out, "  1. Volume of a Shape")?;
        writeln!(self.out, "  2. Vector Operations")?;
        writeln!(self.out, "  0. Cancel")?;
        match self.read_choice("Enter your choice (0-2): ")? {
            None => Ok(Flow::Quit),
            Some(0) => Ok(Flow::Continue),
            Some(1) => self.volume_calculation(),
            Some(2) => self.vector_operation(),
            Some(_) => {
                writeln!(self.out, "Invalid choice.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn volume_calculation(&mut self) -> io::Result<Flow> {
        let Some(vectors) = self.read_vectors(3)? else {
            return Ok(Flow::Continue);
        };
        writeln!(self.out, "\n--- Results ---")?;
        output::write_volumes(&mut self.out, &[vectors[0], vectors[1], vectors[2]])?;
        Ok(Flow::Continue)
    }

    fn vector_operation(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- Vector Operation ---")?;
        writeln!(self.out, "  1. Cross Product")?;
        writeln!(self.out, "  2. Scalar Product")?;
        writeln!(self.out, "  3. Addition/Subtraction")?;
        writeln!(self.out, "  4. Get Normal Vector")?;
        writeln!(self.out, "  5. Check if Vector is in Shape")?;
        writeln!(self.out, "  0. Cancel")?;
        let operation = match self.read_choice("Enter your choice (0-5): ")? {
            None => return Ok(Flow::Quit),
            Some(0) => return Ok(Flow::Continue),
            Some(op @ 1..=5) => op,
            Some(_) => {
                writeln!(self.out, "Invalid choice.")?;
                return Ok(Flow::Continue);
            }
        };

        let count = match operation {
            1 | 2 => 2,
            4 => 1,
            3 => {
                let prompt =
                    format!("Enter how many vectors to add/sub (min: {MIN_COMBINE}, max: {MAX_COMBINE}): ");
                match self.read_count(&prompt, MIN_COMBINE, MAX_COMBINE)? {
                    Some(n) => n,
                    None => return Ok(Flow::Continue),
                }
            }
            _ => {
                let prompt = format!(
                    "Enter how many vectors (3 for shape + at least 1 to check) (min: 4, max: {MAX_LOCATE}): "
                );
                match self.read_count(&prompt, 4, MAX_LOCATE)? {
                    Some(n) => n,
                    None => return Ok(Flow::Continue),
                }
            }
        };

        let Some(vectors) = self.read_vectors(count)? else {
            return Ok(Flow::Continue);
        };

        match operation {
            1 => {
                writeln!(self.out, "\n--- Results ---")?;
                output::write_cross(&mut self.out, &vectors[0], &vectors[1])?;
            }
            2 => {
                writeln!(self.out, "\n--- Results ---")?;
                output::write_scalar(&mut self.out, &vectors[0], &vectors[1])?;
            }
            3 => {
                let op = match self.prompt("Addition or Subtraction (+/-): ")?.as_deref() {
                    Some("+") => Combination::Sum,
                    Some("-") => Combination::Difference,
                    _ => {
                        writeln!(self.out, "Invalid operation.")?;
                        return Ok(Flow::Continue);
                    }
                };
                writeln!(self.out, "\n--- Results ---")?;
                match geometry::combine(&vectors, op) {
                    Ok(result) => output::write_combination(&mut self.out, op, &result)?,
                    Err(e) => writeln!(self.out, "Error: {e}")?,
                }
            }
            4 => {
                writeln!(self.out, "\n--- Results ---")?;
                match geometry::normalize(&vectors[0]) {
                    Ok(normal) => output::write_normal(&mut self.out, &normal)?,
                    Err(e) => writeln!(self.out, "Error: {e}")?,
                }
            }
            _ => {
                writeln!(self.out, "\n--- Results ---")?;
                self.locate_points(&vectors)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn locate_points(&mut self, vectors: &[Vector3]) -> io::Result<()> {
        let shape = [vectors[0], vectors[1], vectors[2]];
        for (i, point) in vectors.iter().enumerate().skip(3) {
            match geometry::locate_point(&shape, point) {
                Ok(located) => {
                    if i == 3 {
                        writeln!(self.out, "Shape Volume: {:.6}\n", located.volume)?;
                    }
                    output::write_containment(&mut self.out, i + 1, &located)?;
                }
                Err(e) => {
                    output::write_warning(&mut self.out, &e.to_string())?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // ABOUT
    // ========================================================================

    fn about(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "\n--- About This Program ---")?;
        writeln!(self.out, "vecalc {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.out, "  • Scalar (dot) product calculations")?;
        writeln!(self.out, "  • Cross product calculations")?;
        writeln!(self.out, "  • Vector addition and subtraction")?;
        writeln!(self.out, "  • Vector normalization")?;
        writeln!(self.out, "  • Point-in-parallelepiped testing")?;
        writeln!(self.out, "  • Parallelepiped and pyramid volumes")?;
        writeln!(self.out, "  • Automated CSV-based testing")?;
        writeln!(self.out)?;
        writeln!(self.out, "  Scalar Product:  V1 · V2 = x1*x2 + y1*y2 + z1*z2")?;
        writeln!(self.out, "  Cross Product:   V1 × V2 = perpendicular vector")?;
        writeln!(self.out, "  Volume:          |(V1 × V2) · V3| / k")?;
        writeln!(self.out, "                   k=1 (parallelepiped), k=6 (pyramid)")?;
        writeln!(self.out)?;
        Ok(Flow::Continue)
    }

    // ========================================================================
    // INPUT HELPERS
    // ========================================================================

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads an integer choice. Non-numeric input yields `Some(-1)`.
    fn read_choice(&mut self, text: &str) -> io::Result<Option<i64>> {
        Ok(self
            .prompt(text)?
            .map(|line| line.parse::<i64>().unwrap_or(-1)))
    }

    fn read_count(&mut self, text: &str, min: usize, max: usize) -> io::Result<Option<usize>> {
        match self.prompt(text)?.map(|line| line.parse::<usize>()) {
            Some(Ok(n)) if (min..=max).contains(&n) => Ok(Some(n)),
            Some(_) => {
                writeln!(self.out, "Invalid input. Must be between {min} and {max}.")?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Reads `count` vectors, one "X Y Z" line each. `None` on bad input or end of input.
    fn read_vectors(&mut self, count: usize) -> io::Result<Option<Vec<Vector3>>> {
        let mut vectors = Vec::with_capacity(count);
        for i in 1..=count {
            let Some(line) = self.prompt(&format!("Enter Vector {i} (X Y Z): "))? else {
                return Ok(None);
            };
            match parse_vector(&line) {
                Some(v) => vectors.push(v),
                None => {
                    writeln!(
                        self.out,
                        "Invalid input. Please enter three numbers separated by spaces."
                    )?;
                    return Ok(None);
                }
            }
        }
        Ok(Some(vectors))
    }
}

/// Parses exactly three whitespace-separated finite numbers.
fn parse_vector(line: &str) -> Option<Vector3> {
    let values: Vec<f64> = line
        .split_whitespace()
        .map(|part| part.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<_>>()?;
    match values.as_slice() {
        [x, y, z] => Some(Vector3::new(*x, *y, *z)),
        _ => None,
    }
}
