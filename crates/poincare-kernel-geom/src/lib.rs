#![warn(missing_docs)]

//! Planar primitives for the poincare tiling kernel.
//!
//! Circles, lines and hyperbolic geodesics of the Poincaré disk, plus the
//! two mirror operations the tiling is generated by: inversion through a
//! circle and reflection across a line.

use poincare_kernel_math::{
    circle_from_three_points, line_circle_intersections, LineCircleHits, Point2, Vec2,
    INFINITE_RADIUS,
};
use thiserror::Error;

/// Radius at or beyond which a circle is treated as a straight line.
pub const LINE_RADIUS_THRESHOLD: f64 = 10000.0;

/// Errors from planar constructions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeomError {
    /// A line that must cross a circle misses it.
    #[error("line from ({x:.6}, {y:.6}) does not intersect the circle")]
    NoIntersection {
        /// Line origin x.
        x: f64,
        /// Line origin y.
        y: f64,
    },

    /// Inversion was requested through a circle of infinite radius.
    #[error("inversion on circles of infinite radius is not supported")]
    InfiniteRadiusInversion,
}

// =============================================================================
// Circle
// =============================================================================

/// A circle in the canvas plane.
///
/// A radius of `-1` or of at least [`LINE_RADIUS_THRESHOLD`] marks a circle
/// of infinite radius, i.e. a straight line. A radius of `0` is a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center point.
    pub center: Point2,
    /// Radius, or the infinite-radius sentinel.
    pub radius: f64,
}

impl Circle {
    /// Create a circle from center and radius.
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Fit the circle through three points.
    pub fn through(p1: &Point2, p2: &Point2, p3: &Point2) -> Self {
        let (radius, center) = circle_from_three_points(p1, p2, p3);
        Self { center, radius }
    }

    /// Whether this circle stands for a straight line.
    pub fn has_infinite_radius(&self) -> bool {
        self.radius == INFINITE_RADIUS || self.radius >= LINE_RADIUS_THRESHOLD
    }

    /// Whether this circle collapsed to a point.
    pub fn is_degenerate(&self) -> bool {
        self.radius == 0.0
    }

    /// Invert a point through this circle.
    ///
    /// `P' = C + (P - C) * r² / |P - C|²`
    pub fn invert(&self, p: &Point2) -> Result<Point2, GeomError> {
        if self.has_infinite_radius() {
            return Err(GeomError::InfiniteRadiusInversion);
        }
        let d = *p - self.center;
        Ok(self.center + d * (self.radius * self.radius) / d.norm_squared())
    }
}

// =============================================================================
// Line
// =============================================================================

/// A line through `origin` along the unit vector `dir`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// A point on the line.
    pub origin: Point2,
    /// Unit direction.
    pub dir: Vec2,
}

impl Line {
    /// Create a line. `dir` is normalized.
    pub fn new(origin: Point2, dir: Vec2) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    /// Line through two points, directed from `a` to `b`.
    pub fn from_points(a: Point2, b: Point2) -> Self {
        Self::new(a, b - a)
    }

    /// Mirror a point across this line.
    pub fn reflect(&self, p: &Point2) -> Point2 {
        let p = *p;
        let d = (p - self.origin).dot(&self.dir);
        let foot = self.origin + self.dir * d;
        p + 2.0 * (foot - p)
    }

    /// The intersection with `circle` nearest to the line origin.
    pub fn nearest_circle_intersection(&self, circle: &Circle) -> Result<Point2, GeomError> {
        match line_circle_intersections(circle.radius, &circle.center, &self.origin, &self.dir) {
            LineCircleHits::None => Err(GeomError::NoIntersection {
                x: self.origin.x,
                y: self.origin.y,
            }),
            LineCircleHits::Tangent(p) => Ok(p),
            LineCircleHits::Secant(p0, p1) => {
                if (p0 - self.origin).norm() < (p1 - self.origin).norm() {
                    Ok(p0)
                } else {
                    Ok(p1)
                }
            }
        }
    }
}

// =============================================================================
// Geodesic
// =============================================================================

/// A hyperbolic line through two points of the disk.
///
/// Either an arc of `circle`, which meets the disk boundary at right angles,
/// or, when the circle has infinite radius, the diameter stored in `line`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodesic {
    /// First point the geodesic passes through.
    pub a: Point2,
    /// Second point the geodesic passes through.
    pub b: Point2,
    /// Supporting circle (infinite radius for diameters).
    pub circle: Circle,
    /// Supporting line, present exactly when `circle` has infinite radius.
    pub line: Option<Line>,
}

impl Geodesic {
    /// Build a geodesic from its endpoints and supporting circle.
    pub fn new(a: Point2, b: Point2, circle: Circle) -> Self {
        let line = circle
            .has_infinite_radius()
            .then(|| Line::from_points(a, b));
        Self { a, b, circle, line }
    }

    /// A geodesic that is a diameter of the disk.
    pub fn diameter(a: Point2, b: Point2) -> Self {
        Self::new(a, b, Circle::new(Point2::origin(), INFINITE_RADIUS))
    }

    /// Whether this geodesic is drawn as a straight segment.
    pub fn is_line(&self) -> bool {
        self.circle.has_infinite_radius()
    }

    /// Mirror a point across this geodesic.
    pub fn invert(&self, p: &Point2) -> Result<Point2, GeomError> {
        match &self.line {
            Some(line) => Ok(line.reflect(p)),
            None => self.circle.invert(p),
        }
    }
}
