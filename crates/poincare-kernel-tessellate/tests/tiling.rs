//! End-to-end properties of generated tilings.

use std::collections::HashSet;

use poincare_kernel_geom::Circle;
use poincare_kernel_math::{Complex, Point2};
use poincare_kernel_mobius::Mobius;
use poincare_kernel_tessellate::{to_disk, Edge, Tessellation};

fn canvas_disk() -> Circle {
    Circle::new(Point2::new(512.0, 384.0), 360.0)
}

fn build(p: usize, q: usize, max_level: usize) -> Tessellation {
    let mut tess = Tessellation::new(canvas_disk());
    tess.tessellate(p, q, max_level).unwrap();
    tess
}

#[test]
fn test_known_counts() {
    let cases = [
        ((7, 3, 2), 43, 8),
        ((7, 3, 3), 141, 29),
        ((5, 4, 3), 81, 21),
        ((4, 5, 3), 49, 17),
        ((3, 7, 4), 43, 22),
    ];
    for ((p, q, level), points, polygons) in cases {
        let tess = build(p, q, level);
        assert_eq!(tess.point_count(), points, "{{{p},{q}}} level {level}");
        assert_eq!(tess.polygon_count(), polygons, "{{{p},{q}}} level {level}");
    }
}

#[test]
fn test_counts_are_deterministic() {
    for (p, q, level) in [(7, 3, 4), (5, 4, 4), (8, 3, 3)] {
        let a = build(p, q, level);
        let b = build(p, q, level);
        assert_eq!(a.stats(), b.stats());
        assert_eq!(a.points(), b.points());
    }
}

#[test]
fn test_regenerating_replaces_contents() {
    let mut tess = build(7, 3, 3);
    tess.tessellate(4, 5, 2).unwrap();
    assert_eq!(tess.point_count(), 17);
    assert_eq!(tess.polygon_count(), 5);
}

#[test]
fn test_tiles_are_distinct() {
    let tess = build(5, 4, 4);
    let mut seen = HashSet::new();
    for poly in tess.polygons() {
        let mut verts: Vec<_> = poly.vertices().collect();
        assert_eq!(verts.len(), 5);
        verts.sort_unstable();
        verts.dedup();
        assert_eq!(verts.len(), 5, "polygon {} repeats a vertex", poly.center);
        assert!(seen.insert(verts), "polygon {} duplicates a tile", poly.center);
    }
}

#[test]
fn test_polygons_ordered_by_center() {
    let tess = build(7, 3, 3);
    let centers: Vec<_> = tess.polygons().map(|p| p.center).collect();
    assert!(centers.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_edges_have_at_most_two_neighbors() {
    let tess = build(6, 4, 3);
    for poly in tess.polygons() {
        for edge in &poly.edges {
            assert!(!edge.neighbors.is_empty());
            assert!(edge.neighbors.len() <= 2);
            assert_eq!(edge.neighbors[0], poly.center);
        }
    }
}

#[test]
fn test_vertices_inside_disk() {
    let tess = build(7, 3, 4);
    let disk = *tess.disk();
    for p in tess.points() {
        assert!(to_disk(&disk, p).norm() < 1.0);
    }
}

#[test]
fn test_geodesic_reflection_is_involution() {
    let tess = build(5, 4, 3);
    let probe = Point2::new(530.0, 370.0);
    for poly in tess.polygons().take(6) {
        for edge in &poly.edges {
            let g = tess.geodesic_line(edge).unwrap();
            let twice = g.invert(&g.invert(&probe).unwrap()).unwrap();
            assert!((twice - probe).norm() < 1e-6);
        }
    }
}

#[test]
fn test_mobius_reflection_matches_geodesic_inversion() {
    let mut tess = Tessellation::new(Circle::new(Point2::origin(), 1.0));
    tess.tessellate(7, 3, 2).unwrap();
    let z = Complex::new(0.05, -0.1);
    for poly in tess.polygons() {
        for edge in &poly.edges {
            let a = tess.points()[edge.v0];
            let b = tess.points()[edge.v1];
            let m = Mobius::reflection_across_line(Complex::new(a.x, a.y), Complex::new(b.x, b.y));
            let g = tess.geodesic_line(edge).unwrap();
            let expected = g.invert(&Point2::new(z.re, z.im)).unwrap();
            let got = m.apply(z);
            assert!((got - Complex::new(expected.x, expected.y)).norm() < 1e-9);
        }
    }
}

#[test]
fn test_dual_edges_join_neighbor_centers() {
    let tess = build(7, 3, 3);
    let centers: HashSet<_> = tess.polygons().map(|p| p.center).collect();
    let duals: Vec<Edge> = tess.dual_edges().collect();
    assert_eq!(duals.len(), tess.stats().dual_edges);
    for dual in &duals {
        assert!(centers.contains(&dual.v0));
        assert!(centers.contains(&dual.v1));
        assert_ne!(dual.v0, dual.v1);
    }
}

#[test]
fn test_rotation_drift_is_bounded() {
    let radius = canvas_disk().radius;
    let step = 2.0;
    for n in [10usize, 100, 1000] {
        let mut stepped = build(7, 3, 3);
        let mut once = stepped.clone();

        for _ in 0..n {
            stepped.rotate_by(Point2::new(0.0, step), Point2::origin());
        }
        once.transform(&Mobius::rotation(n as f64 * step / radius));

        // Per-frame transforms drift; the bound grows with sqrt(n).
        let tol = 1e-10 * (n as f64).sqrt() * radius;
        let worst = stepped
            .points()
            .iter()
            .zip(once.points())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max);
        assert!(worst < tol, "n = {n}: drift {worst:e} exceeds {tol:e}");
    }
}

#[test]
fn test_resize_then_move_keeps_topology() {
    let mut tess = build(7, 3, 3);
    let before = tess.stats();
    tess.resize(Circle::new(Point2::new(200.0, 200.0), 150.0));
    tess.move_by(Point2::new(220.0, 190.0), Point2::new(200.0, 200.0));
    tess.rotate_by(Point2::new(0.0, 30.0), Point2::origin());
    assert_eq!(tess.stats(), before);
    let disk = *tess.disk();
    assert!(tess.points().iter().all(|p| to_disk(&disk, p).norm() < 1.0));
}
