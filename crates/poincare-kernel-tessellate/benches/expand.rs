use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use poincare_kernel_geom::Circle;
use poincare_kernel_math::Point2;
use poincare_kernel_tessellate::Tessellation;

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    for (p, q, level) in [(7, 3, 5), (5, 4, 5), (4, 5, 6)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{p}-{q}-{level}")),
            &(p, q, level),
            |b, &(p, q, level)| {
                b.iter(|| {
                    let mut tess = Tessellation::new(Circle::new(Point2::new(400.0, 400.0), 400.0));
                    tess.tessellate(black_box(p), black_box(q), black_box(level))
                        .unwrap();
                    tess
                })
            },
        );
    }
    group.finish();
}

fn bench_interaction(c: &mut Criterion) {
    let mut tess = Tessellation::new(Circle::new(Point2::new(400.0, 400.0), 400.0));
    tess.tessellate(7, 3, 5).unwrap();
    c.bench_function("move_by {7,3} level 5", |b| {
        b.iter(|| tess.move_by(black_box(Point2::new(401.0, 400.5)), Point2::new(400.0, 400.0)))
    });
}

criterion_group!(benches, bench_expand, bench_interaction);
criterion_main!(benches);
