//! Turns raw CSV lines into typed test records.
//!
//! The interpreter knows how many vectors and what kind of expected value a
//! record carries (its [`RecordLayout`]), but not which geometry function the
//! record will be checked against.

use crate::{
    csv::RawLine,
    diagnostics::{line_source, CalcError},
    geometry::Vector3,
};

/// Field delimiter. Quoting and escaping are not supported.
pub const DELIMITER: char = ',';

// ============================================================================
// RECORD LAYOUT
// ============================================================================

/// Shape of the expected result at the end of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Scalar,
    Vector,
}

impl ResultShape {
    pub const fn width(&self) -> usize {
        match self {
            ResultShape::Scalar => 1,
            ResultShape::Vector => 3,
        }
    }
}

/// Positional layout of a record: `inputs` vectors followed by the expected result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub inputs: usize,
    pub result: ResultShape,
}

impl RecordLayout {
    pub const fn new(inputs: usize, result: ResultShape) -> Self {
        Self { inputs, result }
    }

    pub const fn field_count(&self) -> usize {
        self.inputs * 3 + self.result.width()
    }
}

// ============================================================================
// VALUES
// ============================================================================

/// A computed or expected test result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Scalar(f64),
    Vector([f64; 3]),
}

impl Quantity {
    /// Absolute-difference comparison. Vectors match only if every component does.
    pub fn within_tolerance(&self, other: &Quantity, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() < tolerance;
        match (self, other) {
            (Quantity::Scalar(a), Quantity::Scalar(b)) => close(*a, *b),
            (Quantity::Vector(a), Quantity::Vector(b)) => {
                a.iter().zip(b.iter()).all(|(x, y)| close(*x, *y))
            }
            _ => false,
        }
    }
}

impl From<Vector3> for Quantity {
    fn from(v: Vector3) -> Self {
        Quantity::Vector(v.direction())
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Scalar(n) => write!(f, "{n:?}"),
            Quantity::Vector(v) => write!(f, "{v:?}"),
        }
    }
}

/// One interpreted test row.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub line: usize,
    pub inputs: Vec<Vector3>,
    pub expected: Quantity,
}

// ============================================================================
// PARSING
// ============================================================================

/// Splits `line` into exactly `expected` finite numbers.
pub fn parse_record(line: &RawLine, expected: usize) -> Result<Vec<f64>, CalcError> {
    let actual = line.text.split(DELIMITER).count();
    if actual != expected {
        return Err(CalcError::FieldCount {
            line: line.number,
            expected,
            actual,
        });
    }

    let mut values = Vec::with_capacity(expected);
    let mut offset = 0;
    for (field_index, field) in line.text.split(DELIMITER).enumerate() {
        let trimmed = field.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            _ => {
                let start = offset + (field.len() - field.trim_start().len());
                return Err(CalcError::NumericParse {
                    line: line.number,
                    field_index,
                    raw_value: trimmed.to_string(),
                    src: line_source(&line.origin, line.number, &line.text),
                    span: (start, trimmed.len().max(1)).into(),
                });
            }
        }
        offset += field.len() + DELIMITER.len_utf8();
    }
    Ok(values)
}

/// Parses `line` according to `layout` and assembles its vectors and expected result.
pub fn interpret(line: &RawLine, layout: RecordLayout) -> Result<TestCase, CalcError> {
    let values = parse_record(line, layout.field_count())?;
    let (vectors, result) = values.split_at(layout.inputs * 3);

    let inputs = vectors
        .chunks_exact(3)
        .map(|c| Vector3::new(c[0], c[1], c[2]))
        .collect();
    let expected = match layout.result {
        ResultShape::Scalar => Quantity::Scalar(result[0]),
        ResultShape::Vector => Quantity::Vector([result[0], result[1], result[2]]),
    };

    Ok(TestCase {
        line: line.number,
        inputs,
        expected,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn raw(number: usize, text: &str) -> RawLine {
        RawLine {
            origin: Arc::from("cases.csv"),
            number,
            text: text.to_string(),
        }
    }

    #[test]
    fn field_counts_per_layout() {
        assert_eq!(RecordLayout::new(3, ResultShape::Scalar).field_count(), 10);
        assert_eq!(RecordLayout::new(2, ResultShape::Vector).field_count(), 9);
        assert_eq!(RecordLayout::new(2, ResultShape::Scalar).field_count(), 7);
    }

    #[test]
    fn parses_numbers_with_surrounding_whitespace() {
        let values = parse_record(&raw(2, " 1, -2.5 ,3e2,.5"), 4).unwrap();
        assert_eq!(values, vec![1.0, -2.5, 300.0, 0.5]);
    }

    #[test]
    fn wrong_arity_reports_expected_and_actual() {
        match parse_record(&raw(5, "1,2,3"), 7) {
            Err(CalcError::FieldCount {
                line,
                expected,
                actual,
            }) => {
                assert_eq!((line, expected, actual), (5, 7, 3));
            }
            other => panic!("expected FieldCount, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_field_is_located() {
        match parse_record(&raw(3, "1, x ,3"), 3) {
            Err(CalcError::NumericParse {
                field_index,
                raw_value,
                span,
                ..
            }) => {
                assert_eq!(field_index, 1);
                assert_eq!(raw_value, "x");
                assert_eq!(span.offset(), 3);
                assert_eq!(span.len(), 1);
            }
            other => panic!("expected NumericParse, got {other:?}"),
        }
    }

    #[test]
    fn empty_and_non_finite_fields_are_rejected() {
        assert!(matches!(
            parse_record(&raw(1, "1,,3"), 3),
            Err(CalcError::NumericParse { field_index: 1, .. })
        ));
        assert!(matches!(
            parse_record(&raw(1, "1,2,NaN"), 3),
            Err(CalcError::NumericParse { field_index: 2, .. })
        ));
        assert!(matches!(
            parse_record(&raw(1, "inf,2,3"), 3),
            Err(CalcError::NumericParse { field_index: 0, .. })
        ));
    }

    #[test]
    fn interpret_builds_vectors_and_expected_vector() {
        let layout = RecordLayout::new(2, ResultShape::Vector);
        let case = interpret(&raw(7, "3,4,0,0,0,1,4,-3,0"), layout).unwrap();
        assert_eq!(case.line, 7);
        assert_eq!(case.inputs.len(), 2);
        assert_eq!(case.inputs[0].magnitude(), 5.0);
        assert_eq!(case.expected, Quantity::Vector([4.0, -3.0, 0.0]));
    }

    #[test]
    fn vector_comparison_is_component_wise() {
        let expected = Quantity::Vector([0.0, 0.0, 1.0]);
        assert!(expected.within_tolerance(&Quantity::Vector([0.0, 0.0, 1.0005]), 1e-3));
        assert!(!expected.within_tolerance(&Quantity::Vector([0.0, 0.002, 1.0]), 1e-3));
        assert!(!expected.within_tolerance(&Quantity::Scalar(1.0), 1e-3));
    }

    #[test]
    fn quantities_display_in_shortest_form() {
        assert_eq!(Quantity::Scalar(5.0).to_string(), "5.0");
        assert_eq!(Quantity::Scalar(0.0).to_string(), "0.0");
        assert_eq!(
            Quantity::Vector([0.0, 0.0, 1.0]).to_string(),
            "[0.0, 0.0, 1.0]"
        );
    }
}
