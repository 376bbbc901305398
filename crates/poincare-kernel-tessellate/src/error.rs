//! Error types for tessellation.

use poincare_kernel_geom::GeomError;
use thiserror::Error;

/// Errors that can occur while building or querying a tessellation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TessellateError {
    /// A planar construction failed (no intersection, infinite-radius inversion).
    #[error("geometric construction failed: {0}")]
    Geometry(#[from] GeomError),

    /// Tiling parameters rejected by [`TilingParams::validate`](crate::TilingParams::validate).
    #[error("invalid tiling parameters: {0}")]
    InvalidParams(String),

    /// The progress hook asked to stop.
    #[error("tessellation cancelled while expanding level {level}")]
    Cancelled {
        /// Level of the polygon that was about to be expanded.
        level: usize,
    },
}

/// Result type for tessellation operations.
pub type Result<T> = std::result::Result<T, TessellateError>;
