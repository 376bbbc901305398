#![warn(missing_docs)]

//! Drawing paths and SVG output for Poincaré disk tilings.
//!
//! Every tile edge is a geodesic, so a tile outline is a closed path of
//! circular arcs and, for edges on a diameter, straight segments. This
//! crate turns a [`Tessellation`] into those paths and writes them as SVG.
//!
//! # Example
//!
//! ```
//! use poincare_kernel_geom::Circle;
//! use poincare_kernel_math::Point2;
//! use poincare_kernel_tessellate::Tessellation;
//! use poincare_render::{to_svg_string, RenderStyle};
//!
//! let mut tess = Tessellation::new(Circle::new(Point2::new(200.0, 200.0), 190.0));
//! tess.tessellate(5, 4, 2).unwrap();
//! let svg = to_svg_string(&tess, &RenderStyle::default()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod svg;

pub use svg::{export_svg, to_svg_string, write_svg, SvgDocument};

use poincare_kernel_geom::Geodesic;
use poincare_kernel_math::{signed_angle, Point2};
use poincare_kernel_tessellate::{Poly, TessellateError, Tessellation};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;

/// Errors from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A geodesic could not be computed.
    #[error(transparent)]
    Tessellate(#[from] TessellateError),

    /// The style cannot be rendered.
    #[error("invalid render style: {0}")]
    InvalidStyle(String),

    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

// =============================================================================
// Paths
// =============================================================================

/// Direction an arc is swept in, in screen space (y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Clockwise on screen.
    Clockwise,
    /// Counterclockwise on screen.
    Counterclockwise,
}

impl Sweep {
    /// Sweep of the short arc from `a` to `b` about `center`.
    pub fn between(a: &Point2, b: &Point2, center: &Point2) -> Self {
        if signed_angle(&(a - center), &(b - center)) < 0.0 {
            Sweep::Counterclockwise
        } else {
            Sweep::Clockwise
        }
    }

    /// The SVG `sweep-flag` for this direction.
    pub fn svg_flag(self) -> u8 {
        match self {
            Sweep::Clockwise => 1,
            Sweep::Counterclockwise => 0,
        }
    }
}

/// One drawing step, continuing from the end of the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Straight segment, for geodesics on a diameter.
    Line {
        /// End point.
        to: Point2,
    },
    /// Circular arc of the geodesic's supporting circle.
    Arc {
        /// End point.
        to: Point2,
        /// Circle radius.
        radius: f64,
        /// Sweep direction.
        sweep: Sweep,
    },
}

impl PathSegment {
    /// The segment drawing `geodesic` from its first point to its second.
    pub fn from_geodesic(geodesic: &Geodesic) -> Self {
        if geodesic.is_line() {
            PathSegment::Line { to: geodesic.b }
        } else {
            PathSegment::Arc {
                to: geodesic.b,
                radius: geodesic.circle.radius,
                sweep: Sweep::between(&geodesic.a, &geodesic.b, &geodesic.circle.center),
            }
        }
    }

    /// End point of the segment.
    pub fn end(&self) -> Point2 {
        match *self {
            PathSegment::Line { to } | PathSegment::Arc { to, .. } => to,
        }
    }
}

/// Fill parity of a tile, from its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// Even level.
    Even,
    /// Odd level; the central tile is odd.
    Odd,
}

/// Closed outline of one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyPath {
    /// First point of the outline.
    pub start: Point2,
    /// One segment per edge, in edge order.
    pub segments: Vec<PathSegment>,
    /// Which fill the tile takes.
    pub parity: Parity,
}

impl PolyPath {
    /// SVG path data, closed.
    pub fn svg_data(&self) -> String {
        path_data(&self.start, &self.segments, true)
    }
}

/// Open path for one dual-graph edge, between two tile centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualPath {
    /// Center of the first tile.
    pub start: Point2,
    /// The geodesic to the second center.
    pub segment: PathSegment,
}

impl DualPath {
    /// SVG path data, open.
    pub fn svg_data(&self) -> String {
        path_data(&self.start, std::slice::from_ref(&self.segment), false)
    }
}

/// Outline of `poly`, starting at the first endpoint of its first edge.
pub fn polygon_path(tess: &Tessellation, poly: &Poly) -> Result<PolyPath> {
    let start_index = poly.edges.first().map_or(poly.center, |e| e.v0);
    let segments = poly
        .edges
        .iter()
        .map(|edge| Ok(PathSegment::from_geodesic(&tess.geodesic_line(edge)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(PolyPath {
        start: tess.points()[start_index],
        segments,
        parity: if poly.is_even() {
            Parity::Even
        } else {
            Parity::Odd
        },
    })
}

/// One path per edge of the dual graph.
pub fn dual_paths(tess: &Tessellation) -> Result<Vec<DualPath>> {
    tess.dual_edges()
        .map(|edge| {
            let geodesic = tess.geodesic_line(&edge)?;
            Ok(DualPath {
                start: tess.points()[edge.v0],
                segment: PathSegment::from_geodesic(&geodesic),
            })
        })
        .collect()
}

fn path_data(start: &Point2, segments: &[PathSegment], close: bool) -> String {
    let mut d = format!("M {:.3} {:.3}", start.x, start.y);
    for segment in segments {
        match *segment {
            PathSegment::Line { to } => write!(d, " L {:.3} {:.3}", to.x, to.y).unwrap(),
            PathSegment::Arc { to, radius, sweep } => write!(
                d,
                " A {radius:.3} {radius:.3} 0 0 {} {:.3} {:.3}",
                sweep.svg_flag(),
                to.x,
                to.y
            )
            .unwrap(),
        }
    }
    if close {
        d.push_str(" Z");
    }
    d
}

// =============================================================================
// Style
// =============================================================================

/// Colors and stroke settings for SVG output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Stroke color of the disk boundary.
    pub disk_stroke: String,
    /// Stroke color of tile edges.
    pub tile_stroke: String,
    /// Fill of tiles on even levels.
    pub even_fill: String,
    /// Fill of tiles on odd levels.
    pub odd_fill: String,
    /// Stroke color of dual-graph edges.
    pub dual_stroke: String,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Draw the dual graph over the tiles.
    pub show_dual: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            disk_stroke: "#d3d3d3".into(),
            tile_stroke: "#ffff00".into(),
            even_fill: "#000080".into(),
            odd_fill: "#b22222".into(),
            dual_stroke: "#ff8c00".into(),
            stroke_width: 1.0,
            show_dual: false,
        }
    }
}

impl RenderStyle {
    /// Validate style settings.
    pub fn validate(&self) -> Result<()> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(RenderError::InvalidStyle(
                "stroke_width must be positive".into(),
            ));
        }
        let colors = [
            ("disk_stroke", &self.disk_stroke),
            ("tile_stroke", &self.tile_stroke),
            ("even_fill", &self.even_fill),
            ("odd_fill", &self.odd_fill),
            ("dual_stroke", &self.dual_stroke),
        ];
        for (name, color) in colors {
            if color.trim().is_empty() {
                return Err(RenderError::InvalidStyle(format!("{name} is empty")));
            }
            if color.contains(['"', '<', '>', '&']) {
                return Err(RenderError::InvalidStyle(format!(
                    "{name} contains markup characters: {color}"
                )));
            }
        }
        Ok(())
    }

    /// Fill color for a tile of the given parity.
    pub fn fill(&self, parity: Parity) -> &str {
        match parity {
            Parity::Even => &self.even_fill,
            Parity::Odd => &self.odd_fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use poincare_kernel_geom::Circle;

    fn canvas_disk() -> Circle {
        Circle::new(Point2::new(400.0, 300.0), 280.0)
    }

    #[test]
    fn test_sweep_follows_signed_angle() {
        let c = Point2::new(0.0, 0.0);
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(0.0, 1.0);
        assert_eq!(Sweep::between(&a, &b, &c), Sweep::Clockwise);
        assert_eq!(Sweep::between(&b, &a, &c), Sweep::Counterclockwise);
        assert_eq!(Sweep::Clockwise.svg_flag(), 1);
        assert_eq!(Sweep::Counterclockwise.svg_flag(), 0);
    }

    #[test]
    fn test_diameter_is_a_line_segment() {
        let g = Geodesic::diameter(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0));
        assert_eq!(
            PathSegment::from_geodesic(&g),
            PathSegment::Line {
                to: Point2::new(2.0, 2.0)
            }
        );
    }

    #[test]
    fn test_fundamental_outline_closes() {
        let mut tess = Tessellation::new(canvas_disk());
        tess.tessellate(4, 5, 1).unwrap();
        let poly = tess.polygon(4).unwrap();
        let path = polygon_path(&tess, poly).unwrap();

        assert_eq!(path.segments.len(), 4);
        assert_eq!(path.parity, Parity::Odd);
        assert_eq!(path.start, tess.points()[0]);
        let last = path.segments.last().unwrap().end();
        assert_relative_eq!(last.x, path.start.x, epsilon = 1e-9);
        assert_relative_eq!(last.y, path.start.y, epsilon = 1e-9);
        for segment in &path.segments {
            assert!(matches!(segment, PathSegment::Arc { radius, .. } if *radius > 0.0));
        }
    }

    #[test]
    fn test_segments_chain_end_to_start() {
        let mut tess = Tessellation::new(canvas_disk());
        tess.tessellate(5, 4, 2).unwrap();
        for poly in tess.polygons() {
            let path = polygon_path(&tess, poly).unwrap();
            for (segment, edge) in path.segments.iter().zip(&poly.edges) {
                assert_eq!(segment.end(), tess.points()[edge.v1]);
            }
            let expected = if poly.level == 1 { Parity::Odd } else { Parity::Even };
            assert_eq!(path.parity, expected);
        }
    }

    #[test]
    fn test_dual_paths_count() {
        let mut tess = Tessellation::new(canvas_disk());
        tess.tessellate(4, 5, 2).unwrap();
        let duals = dual_paths(&tess).unwrap();
        assert_eq!(duals.len(), 4);
        for dual in &duals {
            assert_eq!(dual.start, tess.disk().center);
            assert!(!dual.svg_data().ends_with('Z'));
        }
    }

    #[test]
    fn test_path_data_format() {
        let path = PolyPath {
            start: Point2::new(1.0, 2.0),
            segments: vec![
                PathSegment::Arc {
                    to: Point2::new(3.0, 4.0),
                    radius: 5.0,
                    sweep: Sweep::Clockwise,
                },
                PathSegment::Line {
                    to: Point2::new(1.0, 2.0),
                },
            ],
            parity: Parity::Even,
        };
        assert_eq!(
            path.svg_data(),
            "M 1.000 2.000 A 5.000 5.000 0 0 1 3.000 4.000 L 1.000 2.000 Z"
        );
    }

    #[test]
    fn test_style_validation() {
        assert!(RenderStyle::default().validate().is_ok());

        let style = RenderStyle {
            stroke_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(style.validate(), Err(RenderError::InvalidStyle(_))));

        let style = RenderStyle {
            odd_fill: "red\" onload=\"x".into(),
            ..Default::default()
        };
        assert!(style.validate().is_err());

        let style = RenderStyle {
            tile_stroke: "  ".into(),
            ..Default::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_style_from_partial_toml() {
        let style: RenderStyle = toml::from_str("even_fill = \"#123456\"\nshow_dual = true\n").unwrap();
        assert_eq!(style.even_fill, "#123456");
        assert!(style.show_dual);
        assert_eq!(style.odd_fill, RenderStyle::default().odd_fill);
        assert_eq!(style.fill(Parity::Even), "#123456");
    }
}
