// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use strata_layout::{Orientation, TrackSize, compute_layout};

fn sizes(count: usize) -> Vec<TrackSize> {
    (0..count)
        .map(|i| {
            if i % 3 == 0 {
                TrackSize::Fixed(40.0)
            } else {
                TrackSize::Flex(1.0 + (i % 4) as f64)
            }
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/compute");
    for count in [4_usize, 32, 256] {
        let sizes = sizes(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &sizes, |b, sizes| {
            b.iter(|| {
                let layout =
                    compute_layout(black_box(sizes), Size::new(20_000.0, 900.0), Orientation::Vertical)
                        .unwrap();
                black_box(layout)
            });
        });
    }
    group.finish();
}

fn bench_slot_at(c: &mut Criterion) {
    let layout = compute_layout(&sizes(256), Size::new(20_000.0, 900.0), Orientation::Vertical)
        .unwrap();
    c.bench_function("layout/slot_at", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for x in (0..20_000).step_by(7) {
                hits += layout
                    .slot_at(black_box(Point::new(f64::from(x), 450.0)))
                    .unwrap_or(0);
            }
            black_box(hits)
        });
    });
}

criterion_group!(benches, bench_compute, bench_slot_at);
criterion_main!(benches);
