use crate::{
    csv::{self, Quantity, RawLine, RecordLayout, ResultShape, TestCase},
    diagnostics::CalcError,
    geometry::{cross_product, scalar_product, shape_volume, Shape, Vector3},
};

/// The closed set of test kinds a CSV file can be checked against.
///
/// Each kind maps, through [`KIND_TABLE`], to its label, record layout and the
/// geometry function that produces the actual result. Adding a kind means
/// adding a variant and a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    ParallelepipedVolume,
    PyramidVolume,
    CrossProduct,
    ScalarProduct,
}

/// Static description of a test kind.
pub struct KindSpec {
    pub label: &'static str,
    pub layout: RecordLayout,
    pub evaluate: fn(&[Vector3]) -> Quantity,
}

const VOLUME_LAYOUT: RecordLayout = RecordLayout::new(3, ResultShape::Scalar);
const CROSS_LAYOUT: RecordLayout = RecordLayout::new(2, ResultShape::Vector);
const SCALAR_LAYOUT: RecordLayout = RecordLayout::new(2, ResultShape::Scalar);

/// Indexed by `TestKind as usize`.
static KIND_TABLE: [KindSpec; 4] = [
    KindSpec {
        label: Shape::Parallelepiped.label(),
        layout: VOLUME_LAYOUT,
        evaluate: eval_parallelepiped,
    },
    KindSpec {
        label: Shape::Pyramid.label(),
        layout: VOLUME_LAYOUT,
        evaluate: eval_pyramid,
    },
    KindSpec {
        label: "Cross Product",
        layout: CROSS_LAYOUT,
        evaluate: eval_cross,
    },
    KindSpec {
        label: "Scalar Product",
        layout: SCALAR_LAYOUT,
        evaluate: eval_scalar,
    },
];

impl TestKind {
    /// Every kind, in "run all" order.
    pub const ALL: [TestKind; 4] = [
        TestKind::ParallelepipedVolume,
        TestKind::PyramidVolume,
        TestKind::CrossProduct,
        TestKind::ScalarProduct,
    ];

    pub fn spec(&self) -> &'static KindSpec {
        &KIND_TABLE[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    pub fn layout(&self) -> RecordLayout {
        self.spec().layout
    }

    pub fn field_count(&self) -> usize {
        self.layout().field_count()
    }

    pub fn evaluate(&self, inputs: &[Vector3]) -> Quantity {
        (self.spec().evaluate)(inputs)
    }

    /// Interprets `line` with this kind's record layout.
    pub fn interpret(&self, line: &RawLine) -> Result<TestCase, CalcError> {
        csv::interpret(line, self.layout())
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn eval_parallelepiped(v: &[Vector3]) -> Quantity {
    Quantity::Scalar(shape_volume(Shape::Parallelepiped, &v[0], &v[1], &v[2]))
}

fn eval_pyramid(v: &[Vector3]) -> Quantity {
    Quantity::Scalar(shape_volume(Shape::Pyramid, &v[0], &v[1], &v[2]))
}

fn eval_cross(v: &[Vector3]) -> Quantity {
    cross_product(&v[0], &v[1]).into()
}

fn eval_scalar(v: &[Vector3]) -> Quantity {
    Quantity::Scalar(scalar_product(&v[0], &v[1]))
}
