//! Edges and polygons of a tiling, referencing vertices by index.

use std::hash::{Hash, Hasher};

/// An edge between two vertex indices.
///
/// Equality and hashing ignore direction and neighbors: `Edge(3, 7)` and
/// `Edge(7, 3)` are the same edge.
#[derive(Debug, Clone, Default)]
pub struct Edge {
    /// First vertex index.
    pub v0: usize,
    /// Second vertex index.
    pub v1: usize,
    /// Center vertex of every polygon registered on this edge, in registration order.
    pub neighbors: Vec<usize>,
}

impl Edge {
    /// Edge between `v0` and `v1` with no neighbors.
    pub fn new(v0: usize, v1: usize) -> Self {
        Self {
            v0,
            v1,
            neighbors: Vec::new(),
        }
    }

    /// Direction-independent key `(min, max)`.
    pub fn key(&self) -> (usize, usize) {
        (self.v0.min(self.v1), self.v0.max(self.v1))
    }

    /// Whether `v` is one of the endpoints.
    pub fn has_vertex(&self, v: usize) -> bool {
        self.v0 == v || self.v1 == v
    }

    /// The dual-graph edge joining the two polygons on either side.
    ///
    /// `None` unless exactly two polygons are registered.
    pub fn dual(&self) -> Option<Edge> {
        match self.neighbors.as_slice() {
            [a, b] => Some(Edge::new(*a, *b)),
            _ => None,
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A tile of the tessellation.
///
/// Two polygons are the same tile exactly when they share a center vertex;
/// equality looks at nothing else.
#[derive(Debug, Clone, Default)]
pub struct Poly {
    /// Expansion level; the fundamental polygon is level 1.
    pub level: usize,
    /// Index of the center vertex.
    pub center: usize,
    /// Boundary edges in cyclic order.
    pub edges: Vec<Edge>,
}

impl Poly {
    /// Polygon closing the vertex loop `vertices` (wrap-around), each edge
    /// registered with `center` as its first neighbor.
    pub fn from_loop(level: usize, center: usize, vertices: &[usize]) -> Self {
        let n = vertices.len();
        let edges = (0..n)
            .map(|i| {
                let mut edge = Edge::new(vertices[i], vertices[(i + 1) % n]);
                edge.neighbors.push(center);
                edge
            })
            .collect();
        Self {
            level,
            center,
            edges,
        }
    }

    /// Vertex indices in cyclic order (the first endpoint of each edge).
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().map(|e| e.v0)
    }

    /// Number of sides.
    pub fn sides(&self) -> usize {
        self.edges.len()
    }

    /// Whether the polygon sits on an even level.
    pub fn is_even(&self) -> bool {
        self.level % 2 == 0
    }
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
    }
}

impl Eq for Poly {}
