// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry properties of the plot renderers.

use kurbo::PathEl;
use proptest::prelude::*;
use strata_data::{DataSeries, Diagnostics, Sample};
use strata_layout::Orientation;
use peniko::Color;
use strata_plot::{
    DifferentialStyle, LineStyle, PlotFrame, Primitive, differential_regions, render_differential,
    render_line,
};
use strata_scale::{Domain, Scale, ScaleHandler, ScaleKind};

fn series(points: &[(f64, f64)]) -> DataSeries {
    let samples = points.iter().map(|&(d, v)| Sample::new(d, v)).collect();
    DataSeries::new(samples, &mut Diagnostics::new())
}

fn on_grid(values: &[f64]) -> DataSeries {
    let samples = values
        .iter()
        .enumerate()
        .map(|(i, v)| Sample::new(i as f64, *v))
        .collect();
    DataSeries::new(samples, &mut Diagnostics::new())
}

#[test]
fn crossover_splits_regions_at_the_intersection() {
    let a = series(&[(0.0, 10.0), (10.0, 20.0)]);
    let b = series(&[(0.0, 15.0), (10.0, 15.0)]);
    let regions = differential_regions(&a, &b);
    assert_eq!(regions.len(), 2);
    let end = regions[0].points.last().unwrap();
    assert!(end.depth > 0.0 && end.depth < 10.0);
    assert_eq!(regions[0].first_above, !regions[1].first_above);
}

#[test]
fn zoomed_differential_fills_stay_near_the_window() {
    let mut depth =
        ScaleHandler::new(ScaleKind::Linear, Domain::linear(0.0, 999.0).unwrap()).unwrap();
    depth.set_range(0.0..999.0).unwrap();
    depth.zoom_to(100.0..110.0);
    let value = Scale::linear(Domain::linear(-1.0, 1.0).unwrap(), 0.0..10.0).unwrap();
    let frame = PlotFrame::new(&depth, &value, Orientation::Vertical);

    let a = on_grid(&[1.0; 1000]);
    let b = series(&[(0.0, 0.0), (999.0, 0.0)]);
    let style = DifferentialStyle {
        first: LineStyle::default(),
        second: LineStyle::default(),
        first_above: Color::BLACK,
        second_above: Color::WHITE,
    };
    let prims = render_differential(&a, &b, &frame, &style);
    let fills: Vec<_> = prims
        .iter()
        .filter_map(|p| match p {
            Primitive::Fill { path, .. } => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), 1);

    let (top, bottom) = (depth.transform(99.0) - 1e-6, depth.transform(111.0) + 1e-6);
    let ys: Vec<f64> = fills[0]
        .elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p.y),
            _ => None,
        })
        .collect();
    assert!(ys.len() <= 2 * 13, "{} vertices", ys.len());
    assert!(ys.iter().all(|y| (top..=bottom).contains(y)), "{ys:?}");
}

#[test]
fn lines_over_a_piecewise_axis_stay_continuous() {
    let domain = Domain::new(vec![0.0, 20.0, 50.0, 100.0]).unwrap();
    let mut depth = ScaleHandler::new(ScaleKind::Linear, domain).unwrap();
    depth.set_range(0.0..300.0).unwrap();
    let value = Scale::linear(Domain::linear(0.0, 1.0).unwrap(), 0.0..10.0).unwrap();
    let frame = PlotFrame::new(&depth, &value, Orientation::Vertical);

    let s = series(&[(0.0, 0.5), (20.0, 0.5), (50.0, 0.5), (100.0, 0.5)]);
    let prims = render_line(&s, &frame, &LineStyle::default());
    assert_eq!(prims.len(), 1);
    let Primitive::Stroke { path, .. } = &prims[0] else {
        panic!("expected a stroke");
    };
    let ys: Vec<f64> = path
        .elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p.y),
            _ => None,
        })
        .collect();
    let expected = [0.0, 100.0, 200.0, 300.0];
    for (y, e) in ys.iter().zip(expected) {
        assert!((y - e).abs() < 1e-9, "{ys:?}");
    }
}

proptest! {
    #[test]
    fn regions_alternate_and_never_mix_sides(
        pairs in prop::collection::vec((-50.0..50.0f64, -50.0..50.0f64), 2..40)
    ) {
        let a: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let b: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let regions = differential_regions(&on_grid(&a), &on_grid(&b));
        for region in &regions {
            prop_assert!(region.points.len() >= 2);
            for p in &region.points {
                let diff = p.first - p.second;
                if region.first_above {
                    prop_assert!(diff >= -1e-9);
                } else {
                    prop_assert!(diff <= 1e-9);
                }
            }
            prop_assert!(region.points.windows(2).all(|w| w[0].depth <= w[1].depth));
        }
        for pair in regions.windows(2) {
            let end = pair[0].points.last().unwrap();
            let start = pair[1].points.first().unwrap();
            prop_assert!(end.depth <= start.depth);
        }
    }
}
