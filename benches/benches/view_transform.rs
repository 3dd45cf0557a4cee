// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_view_transform::{
    DragTransform, ExpandTransform, NullTransform, ResizeTransform, Transform, TransformKind,
    ViewTransform,
};

/// Builds a chain nested `depth` levels deep, alternating drags and resizes.
fn nested_chain(depth: usize) -> ViewTransform<u32> {
    let mut current: ViewTransform<u32> = NullTransform::new().into();
    for level in 0..depth {
        current = if level % 2 == 0 {
            DragTransform::new(1.0, -1.0).with_pre_transform(current).into()
        } else {
            ResizeTransform::new(Point::new(50.0, 50.0), 1.01, 0.99)
                .with_pre_transform(current)
                .into()
        };
    }
    current
}

/// Points on a coarse grid around the 100x100 expand shape.
fn grid_points() -> Vec<Point> {
    let mut points = Vec::new();
    for i in 0..32 {
        for j in 0..32 {
            points.push(Point::new(-300.0 + f64::from(i) * 22.0, -300.0 + f64::from(j) * 22.0));
        }
    }
    points
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_transform/chain");
    let rect = Rect::from_origin_size((10.0, 10.0), (40.0, 20.0));

    for depth in [1usize, 8, 64] {
        let transform = nested_chain(depth);
        group.bench_with_input(BenchmarkId::new("transform_rect", depth), &transform, |b, t| {
            b.iter(|| black_box(t.transform_rect(&0, black_box(rect))));
        });
        group.bench_with_input(BenchmarkId::new("collect_by_kind", depth), &transform, |b, t| {
            b.iter(|| black_box(t.collect_by_kind(TransformKind::Resize).len()));
        });
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_transform/expand");
    let expand = ExpandTransform::centered(
        0_u32,
        Rect::from_origin_size((0.0, 0.0), (100.0, 100.0)),
        Vec2::new(20.0, 20.0),
        [1],
    )
    .expect("valid expand geometry");
    let points = grid_points();
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("transform_point", |b| {
        b.iter(|| {
            for p in &points {
                black_box(expand.transform_point(&2, *p));
            }
        });
    });

    group.bench_function("undo_point", |b| {
        b.iter(|| {
            for p in &points {
                black_box(expand.undo_point(&2, *p));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_chain, bench_expand);
criterion_main!(benches);
