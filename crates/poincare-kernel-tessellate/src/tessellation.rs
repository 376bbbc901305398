//! The tessellation aggregate: construction by reflection, geodesic
//! lookup, and the interactive isometries.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::f64::consts::PI;
use std::ops::ControlFlow;

use poincare_kernel_geom::{Circle, Geodesic, Line};
use poincare_kernel_math::{Complex, Point2, Tolerance, Vec2};
use poincare_kernel_mobius::Mobius;
use tracing::{debug, info, warn};

use crate::error::{Result, TessellateError};
use crate::poly::{Edge, Poly};
use crate::store::VertexStore;
use crate::{Progress, TessellationStats, TilingParams};

/// A {p,q} tiling of a disk drawn on a canvas.
///
/// Vertices live in canvas coordinates; `disk` maps them to the unit disk.
#[derive(Debug, Clone)]
pub struct Tessellation {
    disk: Circle,
    points: VertexStore,
    polygons: BTreeMap<usize, Poly>,
}

/// Unit-disk coordinate of a canvas point.
pub fn to_disk(disk: &Circle, p: &Point2) -> Complex {
    Complex::new(
        (p.x - disk.center.x) / disk.radius,
        (p.y - disk.center.y) / disk.radius,
    )
}

/// Canvas point of a unit-disk coordinate.
pub fn to_canvas(disk: &Circle, z: Complex) -> Point2 {
    Point2::new(
        z.re * disk.radius + disk.center.x,
        z.im * disk.radius + disk.center.y,
    )
}

impl Tessellation {
    /// An empty tessellation of `disk`.
    pub fn new(disk: Circle) -> Self {
        Self {
            disk,
            points: VertexStore::new(),
            polygons: BTreeMap::new(),
        }
    }

    /// The disk the tiling is drawn in.
    pub fn disk(&self) -> &Circle {
        &self.disk
    }

    /// All vertices by index.
    pub fn points(&self) -> &[Point2] {
        self.points.as_slice()
    }

    /// Polygons in ascending order of center index.
    pub fn polygons(&self) -> impl Iterator<Item = &Poly> + '_ {
        self.polygons.values()
    }

    /// The polygon whose center vertex is `center`.
    pub fn polygon(&self, center: usize) -> Option<&Poly> {
        self.polygons.get(&center)
    }

    /// Number of polygons.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Number of vertices.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Unit-disk coordinate of a canvas point.
    pub fn to_disk(&self, p: &Point2) -> Complex {
        to_disk(&self.disk, p)
    }

    /// Canvas point of a unit-disk coordinate.
    pub fn to_canvas(&self, z: Complex) -> Point2 {
        to_canvas(&self.disk, z)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Replace the contents with the {p,q} tiling expanded to `max_level`.
    ///
    /// On error the previous contents are kept.
    pub fn tessellate(&mut self, p: usize, q: usize, max_level: usize) -> Result<()> {
        self.tessellate_with(&TilingParams { p, q, max_level })
    }

    /// [`tessellate`](Self::tessellate) from a parameter set.
    pub fn tessellate_with(&mut self, params: &TilingParams) -> Result<()> {
        self.tessellate_with_progress(params, |_| ControlFlow::Continue(()))
    }

    /// [`tessellate`](Self::tessellate), calling `on_progress` every time a
    /// polygon is taken off the queue. Returning `Break` stops with
    /// [`TessellateError::Cancelled`] and keeps the previous contents.
    pub fn tessellate_with_progress<F>(&mut self, params: &TilingParams, on_progress: F) -> Result<()>
    where
        F: FnMut(&Progress) -> ControlFlow<()>,
    {
        let (points, polygons) = expand(&self.disk, params, on_progress)?;
        self.points = points;
        self.polygons = polygons;
        info!(
            p = params.p,
            q = params.q,
            max_level = params.max_level,
            polygons = self.polygons.len(),
            points = self.points.len(),
            "tessellation complete"
        );
        Ok(())
    }

    /// Reflect `poly` across `edge`, registering any new vertices.
    pub fn reflect_poly(&mut self, poly: &Poly, edge: &Edge) -> Result<Poly> {
        reflect_poly(&self.disk, &mut self.points, poly, edge)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The hyperbolic line through the endpoints of `edge`.
    pub fn geodesic_line(&self, edge: &Edge) -> Result<Geodesic> {
        geodesic_line(&self.disk, &self.points, edge)
    }

    /// Dual-graph edges: one per polygon edge shared by exactly two polygons,
    /// joining their centers.
    pub fn dual_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.polygons
            .values()
            .flat_map(|poly| poly.edges.iter())
            .filter_map(Edge::dual)
    }

    /// Summary counts.
    pub fn stats(&self) -> TessellationStats {
        TessellationStats {
            points: self.points.len(),
            polygons: self.polygons.len(),
            edges: self.polygons.values().map(Poly::sides).sum(),
            dual_edges: self.dual_edges().count(),
            max_level: self.polygons.values().map(|p| p.level).max().unwrap_or(0),
        }
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Move the tiling to a new disk. Topology is unchanged.
    pub fn resize(&mut self, disk: Circle) {
        let old = self.disk;
        self.disk = disk;
        self.points.remap(|p| to_canvas(&disk, to_disk(&old, p)));
    }

    /// Apply an isometry to every vertex, in unit-disk coordinates.
    pub fn transform(&mut self, isometry: &Mobius) {
        let disk = self.disk;
        self.points
            .remap(|p| to_canvas(&disk, isometry.apply(to_disk(&disk, p))));
    }

    /// Pan by the pointer motion from `previous` to `point` (canvas pixels).
    ///
    /// Each call builds a fresh translation from the raw delta, so long drags
    /// accumulate rounding in the vertex positions.
    pub fn move_by(&mut self, point: Point2, previous: Point2) {
        let (dx, dy) = self.pixel_delta(&point, &previous);
        self.transform(&Mobius::translation(dx, dy));
    }

    /// Rotate about the disk center by the vertical pointer motion.
    pub fn rotate_by(&mut self, point: Point2, previous: Point2) {
        let (_, dy) = self.pixel_delta(&point, &previous);
        self.transform(&Mobius::rotation(dy));
    }

    fn pixel_delta(&self, point: &Point2, previous: &Point2) -> (f64, f64) {
        let dir_x = if point.x > previous.x { 1.0 } else { -1.0 };
        let dir_y = if point.y > previous.y { 1.0 } else { -1.0 };
        let inc_x = (point.x - previous.x).abs() / self.disk.radius;
        let inc_y = (point.y - previous.y).abs() / self.disk.radius;
        (dir_x * inc_x, dir_y * inc_y)
    }
}

// =============================================================================
// Expansion
// =============================================================================

/// Build the tiling on scratch state; nothing is published until it succeeds.
fn expand<F>(
    disk: &Circle,
    params: &TilingParams,
    mut on_progress: F,
) -> Result<(VertexStore, BTreeMap<usize, Poly>)>
where
    F: FnMut(&Progress) -> ControlFlow<()>,
{
    let mut points = VertexStore::new();
    let fundamental = fundamental_polygon(disk, &mut points, params.p, params.q)?;

    // Every polygon ever enqueued, by arena id. `by_center` picks the one
    // that represents each tile; later polygons with a taken center are
    // still expanded but not published.
    let mut arena = vec![fundamental];
    let mut by_center = BTreeMap::from([(arena[0].center, 0)]);
    let mut queue = VecDeque::from([0usize]);
    let mut processed: HashSet<Edge> = HashSet::new();
    let mut current_level = 0;

    while let Some(current) = queue.pop_front() {
        let level = arena[current].level;
        let progress = Progress {
            level,
            queued: queue.len(),
            polygons: by_center.len(),
            points: points.len(),
        };
        if on_progress(&progress).is_break() {
            warn!(level, polygons = by_center.len(), "tessellation cancelled");
            return Err(TessellateError::Cancelled { level });
        }
        if level != current_level {
            debug!(level, queued = queue.len(), points = points.len(), "expanding level");
            current_level = level;
        }

        if level >= params.max_level {
            continue;
        }

        for e in 0..arena[current].edges.len() {
            let edge = Edge::new(arena[current].edges[e].v0, arena[current].edges[e].v1);
            if !processed.insert(edge.clone()) {
                continue;
            }

            let before = points.len();
            let mirror = reflect_poly(disk, &mut points, &arena[current], &edge)?;
            let center = mirror.center;
            let duplicate = points.len() == before && by_center.contains_key(&center);
            if !duplicate {
                let id = arena.len();
                arena.push(mirror);
                by_center.entry(center).or_insert(id);
                queue.push_back(id);
            }
            arena[current].edges[e].neighbors.push(center);
        }
    }

    let polygons = by_center
        .into_iter()
        .map(|(center, id)| (center, std::mem::take(&mut arena[id])))
        .collect();
    Ok((points, polygons))
}

/// The central regular p-gon, from Coxeter's construction of the
/// fundamental triangle. Vertices `0..p` lie on a circle about the disk
/// center; vertex `p` is the center itself.
fn fundamental_polygon(
    disk: &Circle,
    points: &mut VertexStore,
    p: usize,
    q: usize,
) -> Result<Poly> {
    let s = (PI / p as f64).sin();
    let c = (PI / q as f64).cos();
    let oc = 1.0 / ((c * c) / (s * s) - 1.0).sqrt();
    let ao = 1.0 / (1.0 - (s * s) / (c * c)).sqrt();

    let mirror = Circle::new(Point2::new(ao, 0.0), oc);
    let ray = Line::new(
        Point2::origin(),
        Vec2::new((PI / p as f64).cos(), (PI / p as f64).sin()),
    );
    let b = ray.nearest_circle_intersection(&mirror)?;
    let dist = (b - ray.origin).norm();

    let mut vertices = Vec::with_capacity(p);
    for i in 0..p {
        let alpha = i as f64 / p as f64 * 2.0 * PI;
        vertices.push(points.push(to_canvas(disk, Complex::from_polar(dist, alpha))));
    }
    let center = points.push(to_canvas(disk, Complex::new(0.0, 0.0)));

    Ok(Poly::from_loop(1, center, &vertices))
}

/// Mirror image of `poly` across `edge`, one level deeper.
///
/// Endpoints of `edge` map to themselves; every other vertex and the
/// center are inverted and deduplicated. The vertex loop keeps the source
/// order.
fn reflect_poly(
    disk: &Circle,
    points: &mut VertexStore,
    poly: &Poly,
    edge: &Edge,
) -> Result<Poly> {
    let geodesic = geodesic_line(disk, points, edge)?;

    let mut vertices = Vec::with_capacity(poly.sides());
    for v in poly.vertices() {
        if edge.has_vertex(v) {
            vertices.push(v);
        } else {
            vertices.push(reflect_point(points, &geodesic, v)?);
        }
    }
    let center = reflect_point(points, &geodesic, poly.center)?;

    Ok(Poly::from_loop(poly.level + 1, center, &vertices))
}

fn reflect_point(points: &mut VertexStore, geodesic: &Geodesic, index: usize) -> Result<usize> {
    let image = geodesic.invert(&points[index])?;
    Ok(points.find_or_insert(image).0)
}

/// The circle through both endpoints orthogonal to the disk boundary: it
/// also passes through the inverse of `v1` in the disk.
fn geodesic_line(disk: &Circle, points: &VertexStore, edge: &Edge) -> Result<Geodesic> {
    let a = points[edge.v0];
    let b = points[edge.v1];

    // The disk center has no inverse; a geodesic through it is a diameter.
    if Tolerance::DEFAULT.coincident(&b, &disk.center) {
        return Ok(Geodesic::diameter(a, b));
    }

    let b_inv = disk.invert(&b)?;
    Ok(Geodesic::new(a, b, Circle::through(&a, &b, &b_inv)))
}
