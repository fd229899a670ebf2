// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strata_scale::{Domain, ScaleHandler, ScaleKind};

fn handler(breakpoints: Vec<f64>) -> ScaleHandler {
    let mut handler =
        ScaleHandler::new(ScaleKind::Linear, Domain::new(breakpoints).unwrap()).unwrap();
    handler.set_range(0.0..2_000.0).unwrap();
    handler.zoom_by(4.0, 700.0);
    handler
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale/transform");
    let depths: Vec<f64> = (0..10_000).map(|i| f64::from(i) * 0.5).collect();
    group.throughput(Throughput::Elements(depths.len() as u64));

    // Segment lookup is a binary search; this shows how it grows with the
    // breakpoint count.
    for segments in [1_u32, 8, 64, 512] {
        let step = 5_000.0 / f64::from(segments);
        let breakpoints: Vec<f64> = (0..=segments).map(|i| f64::from(i) * step).collect();
        let h = handler(breakpoints);
        group.bench_with_input(BenchmarkId::new("segments", segments), &h, |b, h| {
            b.iter(|| {
                let mut acc = 0.0;
                for &d in &depths {
                    acc += h.transform(black_box(d));
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let h = handler(vec![0.0, 100.0, 1_500.0, 5_000.0]);
    c.bench_function("scale/invert_transform", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for px in 0..2_000 {
                acc += h.transform(h.invert(black_box(f64::from(px))));
            }
            black_box(acc)
        });
    });
}

criterion_group!(benches, bench_transform, bench_round_trip);
criterion_main!(benches);
