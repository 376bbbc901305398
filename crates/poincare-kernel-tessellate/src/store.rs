//! Vertex arena with stable indices and an epsilon lookup.
//!
//! Vertices are only ever appended. Lookup answers "the lowest index
//! whose coordinates are both within [`Tolerance::vertex`] of the query",
//! which is what a front-to-back linear scan returns, but goes through a
//! uniform grid so the cost does not grow with the tiling.

use std::collections::HashMap;
use std::ops::Index;

use poincare_kernel_math::{Point2, Tolerance};

/// Grid cell edge length. Must not be smaller than the vertex tolerance, so
/// every match lies in the 3x3 block of cells around the query.
const CELL_SIZE: f64 = 1e-4;

type Cell = (i64, i64);

fn cell_of(p: &Point2) -> Cell {
    (
        (p.x / CELL_SIZE).floor() as i64,
        (p.y / CELL_SIZE).floor() as i64,
    )
}

/// Growing sequence of vertices shared by index from edges and polygons.
#[derive(Debug, Clone, Default)]
pub struct VertexStore {
    points: Vec<Point2>,
    grid: HashMap<Cell, Vec<usize>>,
    // False after a remap until the next lookup rebuilds the grid.
    indexed: bool,
}

impl VertexStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            grid: HashMap::new(),
            indexed: true,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All vertices, by index.
    pub fn as_slice(&self) -> &[Point2] {
        &self.points
    }

    /// Append a vertex without looking for a match. Returns its index.
    pub fn push(&mut self, p: Point2) -> usize {
        let index = self.points.len();
        self.points.push(p);
        if self.indexed {
            self.grid.entry(cell_of(&p)).or_default().push(index);
        }
        index
    }

    /// Lowest index of a vertex matching `p`, if any.
    pub fn find(&mut self, p: &Point2) -> Option<usize> {
        self.ensure_indexed();
        let tol = Tolerance::DEFAULT;
        let (cx, cy) = cell_of(p);
        let mut best: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                // Buckets are filled in index order.
                if let Some(&i) = bucket
                    .iter()
                    .find(|&&i| tol.same_vertex(&self.points[i], p))
                {
                    best = Some(best.map_or(i, |b| b.min(i)));
                }
            }
        }
        best
    }

    /// Index of the vertex matching `p`, appending `p` if there is none.
    ///
    /// The flag is true when a new vertex was appended.
    pub fn find_or_insert(&mut self, p: Point2) -> (usize, bool) {
        match self.find(&p) {
            Some(i) => (i, false),
            None => (self.push(p), true),
        }
    }

    /// Move every vertex through `f`, keeping indices.
    pub fn remap(&mut self, mut f: impl FnMut(&Point2) -> Point2) {
        for p in &mut self.points {
            *p = f(&*p);
        }
        self.grid.clear();
        self.indexed = false;
    }

    fn ensure_indexed(&mut self) {
        if self.indexed {
            return;
        }
        self.grid.clear();
        for (i, p) in self.points.iter().enumerate() {
            self.grid.entry(cell_of(p)).or_default().push(i);
        }
        self.indexed = true;
    }
}

impl Index<usize> for VertexStore {
    type Output = Point2;

    fn index(&self, index: usize) -> &Point2 {
        &self.points[index]
    }
}
