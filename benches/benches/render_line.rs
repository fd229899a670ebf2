// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use strata_data::{DataSeries, Diagnostics, Sample};
use strata_layout::Orientation;
use strata_plot::{LineStyle, PlotFrame, render_line};
use strata_scale::{Domain, Scale, ScaleHandler, ScaleKind};

fn series(len: u32) -> DataSeries {
    let samples = (0..len)
        .map(|i| {
            let depth = f64::from(i) * 0.1524;
            // Every 500th sample is a gap.
            let value = if i % 500 == 499 {
                f64::NAN
            } else {
                75.0 + 50.0 * (depth * 0.05).sin()
            };
            Sample::new(depth, value)
        })
        .collect();
    DataSeries::new(samples, &mut Diagnostics::new())
}

fn bench_render_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot/render_line");
    let value = Scale::linear(Domain::linear(0.0, 150.0).unwrap(), 0.0..200.0).unwrap();
    for len in [1_000_u32, 20_000, 100_000] {
        let data = series(len);
        let extent = f64::from(len) * 0.1524;
        let mut depth =
            ScaleHandler::new(ScaleKind::Linear, Domain::linear(0.0, extent).unwrap()).unwrap();
        depth.set_range(0.0..900.0).unwrap();
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("full", len), &data, |b, data| {
            let frame = PlotFrame::new(&depth, &value, Orientation::Vertical);
            b.iter(|| black_box(render_line(data, &frame, &LineStyle::default())));
        });

        // Zoomed in, only the visible span is walked.
        let mut zoomed = depth.clone();
        zoomed.zoom_by(50.0, 450.0);
        group.bench_with_input(BenchmarkId::new("zoomed", len), &data, |b, data| {
            let frame = PlotFrame::new(&zoomed, &value, Orientation::Vertical);
            b.iter(|| black_box(render_line(data, &frame, &LineStyle::default())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_line);
criterion_main!(benches);
