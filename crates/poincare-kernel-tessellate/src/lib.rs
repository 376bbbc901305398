#![warn(missing_docs)]

//! Regular {p,q} tilings of the Poincaré disk.
//!
//! Builds a tiling by:
//! 1. Constructing the central p-gon from Coxeter's fundamental triangle
//! 2. Reflecting polygons across their edges, breadth first, up to a level
//! 3. Deduplicating vertices (fixed absolute tolerance) and tiles (by center)
//!
//! and moves the finished tiling with Möbius isometries.
//!
//! # Example
//!
//! ```
//! use poincare_kernel_geom::Circle;
//! use poincare_kernel_math::Point2;
//! use poincare_kernel_tessellate::Tessellation;
//!
//! let mut tess = Tessellation::new(Circle::new(Point2::new(300.0, 300.0), 300.0));
//! tess.tessellate(4, 5, 2).unwrap();
//! assert_eq!(tess.polygon_count(), 5);
//!
//! tess.move_by(Point2::new(310.0, 300.0), Point2::new(300.0, 300.0));
//! for poly in tess.polygons() {
//!     for edge in &poly.edges {
//!         let _arc = tess.geodesic_line(edge).unwrap();
//!     }
//! }
//! ```

pub mod error;
pub mod poly;
pub mod store;
pub mod tessellation;

pub use error::{Result, TessellateError};
pub use poly::{Edge, Poly};
pub use store::VertexStore;
pub use tessellation::{to_canvas, to_disk, Tessellation};

use serde::{Deserialize, Serialize};

/// Tiling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingParams {
    /// Sides per polygon.
    pub p: usize,
    /// Polygons meeting at each vertex.
    pub q: usize,
    /// Deepest level generated; the central polygon is level 1.
    pub max_level: usize,
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            p: 7,
            q: 3,
            max_level: 4,
        }
    }
}

impl TilingParams {
    /// Whether `1/p + 1/q < 1/2`, i.e. the tiling lives in the hyperbolic plane.
    pub fn is_hyperbolic(&self) -> bool {
        // (p - 2)(q - 2) > 4, in integers.
        self.p >= 3 && self.q >= 3 && (self.p - 2) * (self.q - 2) > 4
    }

    /// Validate parameters.
    pub fn validate(&self) -> Result<()> {
        if self.p < 3 {
            return Err(TessellateError::InvalidParams(
                "p must be at least 3".into(),
            ));
        }
        if self.q < 3 {
            return Err(TessellateError::InvalidParams(
                "q must be at least 3".into(),
            ));
        }
        if self.max_level < 1 {
            return Err(TessellateError::InvalidParams(
                "max_level must be at least 1".into(),
            ));
        }
        if !self.is_hyperbolic() {
            return Err(TessellateError::InvalidParams(format!(
                "{{{},{}}} is not hyperbolic: 1/p + 1/q must be below 1/2",
                self.p, self.q
            )));
        }
        Ok(())
    }
}

/// Snapshot passed to the progress hook each time a polygon is dequeued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Level of the polygon about to be expanded.
    pub level: usize,
    /// Polygons still waiting in the queue.
    pub queued: usize,
    /// Tiles found so far.
    pub polygons: usize,
    /// Vertices found so far.
    pub points: usize,
}

/// Summary counts of a tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TessellationStats {
    /// Number of vertices, center vertices included.
    pub points: usize,
    /// Number of tiles.
    pub polygons: usize,
    /// Sum of polygon sides.
    pub edges: usize,
    /// Number of dual-graph edges.
    pub dual_edges: usize,
    /// Deepest level present.
    pub max_level: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = TilingParams::default();
        assert!(params.validate().is_ok());
        assert!(params.is_hyperbolic());
    }

    #[test]
    fn test_euclidean_and_spherical_rejected() {
        for (p, q) in [(4, 4), (6, 3), (3, 6), (5, 3), (3, 3)] {
            let params = TilingParams { p, q, max_level: 2 };
            assert!(!params.is_hyperbolic(), "{{{p},{q}}}");
            assert!(matches!(
                params.validate(),
                Err(TessellateError::InvalidParams(_))
            ));
        }
        assert!(TilingParams { p: 4, q: 5, max_level: 2 }.is_hyperbolic());
        assert!(TilingParams { p: 3, q: 7, max_level: 2 }.is_hyperbolic());
    }

    #[test]
    fn test_small_values_rejected() {
        let bad = [
            TilingParams { p: 2, q: 7, max_level: 1 },
            TilingParams { p: 7, q: 2, max_level: 1 },
            TilingParams { p: 7, q: 3, max_level: 0 },
        ];
        for params in bad {
            assert!(params.validate().is_err());
        }
    }

    #[test]
    fn test_params_from_json() {
        let params: TilingParams =
            serde_json::from_str(r#"{"p": 5, "q": 4, "max_level": 3}"#).unwrap();
        assert_eq!(params, TilingParams { p: 5, q: 4, max_level: 3 });

        let partial: TilingParams = serde_json::from_str(r#"{"max_level": 6}"#).unwrap();
        assert_eq!(partial, TilingParams { p: 7, q: 3, max_level: 6 });
    }
}
