#![warn(missing_docs)]

//! Math types and planar kernels for the poincare tiling workspace.
//!
//! Thin wrappers around nalgebra providing the 2D point/vector and
//! complex types used throughout the disk model, the fixed absolute
//! tolerances, and the two low-level solvers everything else is built
//! on: the three-point circle fit and the circle/parametric-line
//! intersection.

use nalgebra::Vector2;

/// A point in the canvas plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the canvas plane.
pub type Vec2 = Vector2<f64>;

/// A complex number, used for unit-disk coordinates.
pub type Complex = nalgebra::Complex<f64>;

/// Radius reported by [`circle_from_three_points`] when the points are collinear.
pub const INFINITE_RADIUS: f64 = -1.0;

/// Tolerance constants for geometric comparisons.
///
/// Both values are absolute. They decide which tilings close up, so they
/// are not scaled by the size of the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Per-coordinate distance under which two vertices are the same vertex.
    pub vertex: f64,
    /// Threshold for coincident fit points and for collinearity.
    pub degenerate: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 vertex matching, 1e-7 degeneracy).
    pub const DEFAULT: Self = Self {
        vertex: 1e-6,
        degenerate: 1e-7,
    };

    /// Check if two points are the same vertex (strictly inside the box).
    pub fn same_vertex(&self, a: &Point2, b: &Point2) -> bool {
        (a.x - b.x).abs() < self.vertex && (a.y - b.y).abs() < self.vertex
    }

    /// Check if two points coincide for the purposes of a circle fit.
    pub fn coincident(&self, a: &Point2, b: &Point2) -> bool {
        (a.x - b.x).abs() <= self.degenerate && (a.y - b.y).abs() <= self.degenerate
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fit the circle passing through three points.
///
/// Returns `(radius, center)`. Follows O'Rourke's explicit-to-implicit
/// construction: `P2 - P1` and `P3 - P1` are secants, each forming a right
/// triangle with the diameter from `P1`, which gives a 2x2 system for the
/// center.
///
/// - all three points coincide: radius `0`, center `p1`
/// - exactly two coincide: the circle with the two distinct points as diameter
/// - collinear: radius [`INFINITE_RADIUS`], center at the origin
pub fn circle_from_three_points(p1: &Point2, p2: &Point2, p3: &Point2) -> (f64, Point2) {
    let tol = Tolerance::DEFAULT;

    if tol.coincident(p1, p2) && tol.coincident(p1, p3) {
        return (0.0, *p1);
    }
    if tol.coincident(p1, p2) {
        return (0.5 * (p1 - p3).norm(), nalgebra::center(p1, p3));
    }
    if tol.coincident(p1, p3) || tol.coincident(p2, p3) {
        return (0.5 * (p1 - p2).norm(), nalgebra::center(p1, p2));
    }

    let a = p2.x - p1.x;
    let b = p2.y - p1.y;
    let c = p3.x - p1.x;
    let d = p3.y - p1.y;

    let e = a * (p1.x + p2.x) + b * (p1.y + p2.y);
    let f = c * (p1.x + p3.x) + d * (p1.y + p3.y);

    // Same determinant as a*(d - b) - b*(c - a), but computed from the raw
    // coordinates, which rounds better.
    let g = a * (p3.y - p2.y) - b * (p3.x - p2.x);
    if g.abs() <= tol.degenerate {
        return (INFINITE_RADIUS, Point2::origin());
    }

    let center = Point2::new(0.5 * (d * e - b * f) / g, 0.5 * (a * f - c * e) / g);
    ((p1 - center).norm(), center)
}

/// Result of intersecting a parametric line with a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCircleHits {
    /// The line misses the circle.
    None,
    /// The line is tangent to the circle.
    Tangent(Point2),
    /// The line crosses the circle; points are ordered by line parameter.
    Secant(Point2, Point2),
}

/// Intersect the line `origin + t * dir` with the circle `(center, radius)`.
///
/// `dir` is expected to be a unit vector but the solve does not depend on it.
pub fn line_circle_intersections(
    radius: f64,
    center: &Point2,
    origin: &Point2,
    dir: &Vec2,
) -> LineCircleHits {
    let (x0, y0) = (origin.x, origin.y);
    let (f, g) = (dir.x, dir.y);
    let len_sq = f * f + g * g;

    let cross = f * (center.y - y0) - g * (center.x - x0);
    let root = radius * radius * len_sq - cross * cross;
    let along = f * (center.x - x0) + g * (center.y - y0);

    if root.is_nan() || root < 0.0 {
        LineCircleHits::None
    } else if root == 0.0 {
        let t = along / len_sq;
        LineCircleHits::Tangent(Point2::new(x0 + f * t, y0 + g * t))
    } else {
        let t0 = (along - root.sqrt()) / len_sq;
        let t1 = (along + root.sqrt()) / len_sq;
        LineCircleHits::Secant(
            Point2::new(x0 + f * t0, y0 + g * t0),
            Point2::new(x0 + f * t1, y0 + g * t1),
        )
    }
}

/// Signed angle in radians from `u` to `v`, in `(-π, π]`.
pub fn signed_angle(u: &Vec2, v: &Vec2) -> f64 {
    let cross = u.x * v.y - u.y * v.x;
    let dot = u.dot(v);
    cross.atan2(dot)
}
