//! # Geometry
//!
//! Pure 3D vector algebra: scalar and cross products, triple-product volumes,
//! additive combination, normalization and point-in-parallelepiped location.
//!
//! All functions are pure and never mutate their operands. [`Vector3`] caches
//! its magnitude at construction and offers no way to change one field without
//! the other.

use crate::diagnostics::CalcError;

/// Absolute tolerance used for every floating-point comparison.
pub const TOLERANCE: f64 = 1e-3;

/// Fewest and most vectors accepted by [`combine`].
pub const MIN_COMBINE: usize = 2;
pub const MAX_COMBINE: usize = 10;

// ============================================================================
// VECTOR TYPE
// ============================================================================

/// A 3D vector with its Euclidean magnitude computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    direction: [f64; 3],
    magnitude: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_direction([x, y, z])
    }

    pub fn from_direction(direction: [f64; 3]) -> Self {
        let [x, y, z] = direction;
        Self {
            direction,
            magnitude: (x * x + y * y + z * z).sqrt(),
        }
    }

    pub fn zero() -> Self {
        Self::from_direction([0.0; 3])
    }

    pub fn direction(&self) -> [f64; 3] {
        self.direction
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn x(&self) -> f64 {
        self.direction[0]
    }

    pub fn y(&self) -> f64 {
        self.direction[1]
    }

    pub fn z(&self) -> f64 {
        self.direction[2]
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(direction: [f64; 3]) -> Self {
        Self::from_direction(direction)
    }
}

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.6}, {:.6}, {:.6}]", self.x(), self.y(), self.z())
    }
}

// ============================================================================
// PRODUCTS AND VOLUMES
// ============================================================================

/// The solid a triple-product volume is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Parallelepiped,
    Pyramid,
}

impl Shape {
    /// Divisor applied to the absolute triple product.
    pub const fn k(&self) -> f64 {
        match self {
            Shape::Parallelepiped => 1.0,
            Shape::Pyramid => 6.0,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Shape::Parallelepiped => "Parallelepiped Volume",
            Shape::Pyramid => "Pyramid Volume",
        }
    }
}

pub fn scalar_product(a: &Vector3, b: &Vector3) -> f64 {
    a.direction
        .iter()
        .zip(b.direction.iter())
        .map(|(l, r)| l * r)
        .sum()
}

pub fn cross_product(a: &Vector3, b: &Vector3) -> Vector3 {
    let [x1, y1, z1] = a.direction;
    let [x2, y2, z2] = b.direction;
    Vector3::new(y1 * z2 - y2 * z1, z1 * x2 - x1 * z2, x1 * y2 - x2 * y1)
}

/// Signed scalar triple product `(v1 × v2) · v3`.
pub fn triple_product(v1: &Vector3, v2: &Vector3, v3: &Vector3) -> f64 {
    scalar_product(&cross_product(v1, v2), v3)
}

/// `|(v1 × v2) · v3| / k`; `k = 1` is the parallelepiped, `k = 6` the pyramid.
pub fn volume(v1: &Vector3, v2: &Vector3, v3: &Vector3, k: f64) -> f64 {
    triple_product(v1, v2, v3).abs() / k
}

pub fn shape_volume(shape: Shape, v1: &Vector3, v2: &Vector3, v3: &Vector3) -> f64 {
    volume(v1, v2, v3, shape.k())
}

/// True when the three vectors span (almost) no volume.
pub fn is_coplanar(v1: &Vector3, v2: &Vector3, v3: &Vector3) -> bool {
    volume(v1, v2, v3, Shape::Parallelepiped.k()) < TOLERANCE
}

/// Dot products of `cross` with each operand; both are ~0 for a correct cross product.
pub fn verify_orthogonality(a: &Vector3, b: &Vector3, cross: &Vector3) -> (f64, f64) {
    (scalar_product(cross, a), scalar_product(cross, b))
}

// ============================================================================
// COMBINATION AND NORMALIZATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combination {
    /// Sum of every vector.
    Sum,
    /// The first vector minus every following vector.
    Difference,
}

pub fn combine(vectors: &[Vector3], op: Combination) -> Result<Vector3, CalcError> {
    if !(MIN_COMBINE..=MAX_COMBINE).contains(&vectors.len()) {
        return Err(CalcError::invalid_input(format!(
            "combining needs between {MIN_COMBINE} and {MAX_COMBINE} vectors, got {}",
            vectors.len()
        )));
    }

    let mut acc = vectors[0].direction;
    for v in &vectors[1..] {
        for (slot, component) in acc.iter_mut().zip(v.direction) {
            match op {
                Combination::Sum => *slot += component,
                Combination::Difference => *slot -= component,
            }
        }
    }
    Ok(Vector3::from_direction(acc))
}

/// Unit vector with the direction of `v`.
pub fn normalize(v: &Vector3) -> Result<Vector3, CalcError> {
    if v.magnitude == 0.0 {
        return Err(CalcError::ZeroVector);
    }
    Ok(Vector3::from_direction(v.direction.map(|c| c / v.magnitude)))
}

// ============================================================================
// POINT LOCATION
// ============================================================================

/// Where a point sits relative to the parallelepiped spanned by three edge vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Containment {
    /// Volume of the parallelepiped.
    pub volume: f64,
    /// Coordinates of the point in the edge basis.
    pub coordinates: [f64; 3],
    pub inside: bool,
}

/// Locates `point` relative to the parallelepiped with corner at the origin and
/// edges `shape`. Each coordinate comes from Cramer's rule on triple products;
/// the point is inside when all three lie in `[0, 1]` within [`TOLERANCE`].
pub fn locate_point(shape: &[Vector3; 3], point: &Vector3) -> Result<Containment, CalcError> {
    let [a, b, c] = shape;
    let signed = triple_product(a, b, c);
    let volume = signed.abs();
    if volume < TOLERANCE {
        return Err(CalcError::DegenerateShape { volume });
    }

    let coordinates = [
        triple_product(point, b, c) / signed,
        triple_product(a, point, c) / signed,
        triple_product(a, b, point) / signed,
    ];
    let inside = coordinates
        .iter()
        .all(|&u| (-TOLERANCE..=1.0 + TOLERANCE).contains(&u));

    Ok(Containment {
        volume,
        coordinates,
        inside,
    })
}
