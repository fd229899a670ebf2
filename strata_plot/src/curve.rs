// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-series renderers: line, area, step and dot.

use kurbo::{BezPath, Circle, Point};
use peniko::Color;
use strata_data::{DataSeries, Sample};

use crate::frame::PlotFrame;
use crate::primitive::{LineStyle, Primitive};

/// Style of an area plot.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaStyle {
    /// Outline; `None` draws the fill only.
    pub line: Option<LineStyle>,
    /// Fill between the curve and the base.
    pub fill: Color,
    /// Close against the value minimum (`true`) or maximum (`false`).
    pub use_min_as_base: bool,
    /// Fill between the curve and the opposite bound.
    pub complement: Option<Color>,
}

/// Style of a dot plot.
#[derive(Clone, Debug, PartialEq)]
pub struct DotStyle {
    /// Fill.
    pub color: Color,
    /// Radius in pixels, independent of zoom.
    pub radius: f64,
}

/// Visible slice of a series.
fn visible<'s>(series: &'s DataSeries, frame: &PlotFrame<'_>) -> &'s [Sample] {
    &series.samples()[series.visible_indices(frame.visible_depths())]
}

/// Polylines through each contiguous run of mappable samples.
pub(crate) fn polylines(samples: &[Sample], frame: &PlotFrame<'_>) -> Vec<Vec<Point>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for sample in samples {
        let point = (!sample.is_gap())
            .then(|| frame.point(sample.depth, sample.value))
            .flatten();
        match point {
            Some(p) => current.push(p),
            None if !current.is_empty() => out.push(core::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub(crate) fn open_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
    }
    path
}

pub(crate) fn closed_path(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    let mut points = points.into_iter();
    if let Some(first) = points.next() {
        path.move_to(first);
        for p in points {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

/// One open path per contiguous non-gap run.
///
/// A single isolated sample has no segment to draw and is left out.
#[must_use]
pub fn render_line(series: &DataSeries, frame: &PlotFrame<'_>, style: &LineStyle) -> Vec<Primitive> {
    polylines(visible(series, frame), frame)
        .iter()
        .filter(|run| run.len() > 1)
        .map(|run| style.primitive(open_path(run)))
        .collect()
}

/// Line closed against a value bound, one polygon per run.
#[must_use]
pub fn render_area(series: &DataSeries, frame: &PlotFrame<'_>, style: &AreaStyle) -> Vec<Primitive> {
    let (base, opposite) = if style.use_min_as_base {
        (frame.value_min(), frame.value_max())
    } else {
        (frame.value_max(), frame.value_min())
    };
    let samples = visible(series, frame);
    let runs = polylines(samples, frame);
    let mut out = Vec::new();
    // Depths of each run, needed to drop the polygon onto the bounds.
    let depths = depth_runs(samples, frame);
    for (run, (first, last)) in runs.iter().zip(depths) {
        if run.len() < 2 {
            continue;
        }
        let fill_to = |bound: f64| {
            let start = frame.point(first, bound);
            let end = frame.point(last, bound);
            start.zip(end).map(|(s, e)| {
                closed_path(
                    core::iter::once(s)
                        .chain(run.iter().copied())
                        .chain(core::iter::once(e)),
                )
            })
        };
        if let Some(path) = fill_to(base) {
            out.push(Primitive::Fill {
                path,
                color: style.fill,
            });
        }
        if let Some(color) = style.complement {
            if let Some(path) = fill_to(opposite) {
                out.push(Primitive::Fill { path, color });
            }
        }
        if let Some(line) = &style.line {
            out.push(line.primitive(open_path(run)));
        }
    }
    out
}

/// First and last depth of each mappable run, matching [`polylines`].
fn depth_runs(samples: &[Sample], frame: &PlotFrame<'_>) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    let mut current: Option<(f64, f64)> = None;
    for sample in samples {
        let mappable = !sample.is_gap() && frame.point(sample.depth, sample.value).is_some();
        if mappable {
            current = Some(match current {
                Some((first, _)) => (first, sample.depth),
                None => (sample.depth, sample.depth),
            });
        } else if let Some(run) = current.take() {
            out.push(run);
        }
    }
    out.extend(current);
    out
}

/// Staircase: each value is held until the next sample depth.
#[must_use]
pub fn render_step(series: &DataSeries, frame: &PlotFrame<'_>, style: &LineStyle) -> Vec<Primitive> {
    let all = series.samples();
    let span = series.visible_indices(frame.visible_depths());
    let mut out = Vec::new();
    let mut path = BezPath::new();
    let mut flush = |path: &mut BezPath| {
        if path.elements().len() > 1 {
            out.push(style.primitive(core::mem::take(path)));
        } else {
            *path = BezPath::new();
        }
    };
    for i in span {
        let sample = all[i];
        let next_depth = all.get(i + 1).map_or(sample.depth, |n| n.depth);
        let corner = (!sample.is_gap())
            .then(|| frame.point(sample.depth, sample.value))
            .flatten()
            .zip(frame.point(next_depth, sample.value));
        let Some((start, end)) = corner else {
            flush(&mut path);
            continue;
        };
        if path.elements().is_empty() {
            path.move_to(start);
        } else {
            path.line_to(start);
        }
        path.line_to(end);
    }
    flush(&mut path);
    out
}

/// One fixed-radius circle per sample.
#[must_use]
pub fn render_dots(series: &DataSeries, frame: &PlotFrame<'_>, style: &DotStyle) -> Vec<Primitive> {
    visible(series, frame)
        .iter()
        .filter(|s| !s.is_gap())
        .filter_map(|s| frame.point(s.depth, s.value))
        .map(|center| Primitive::Circle {
            circle: Circle::new(center, style.radius),
            color: style.color,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;
    use strata_data::Diagnostics;
    use strata_layout::Orientation;
    use strata_scale::{Domain, Scale, ScaleHandler, ScaleKind};

    use super::*;

    fn depth() -> ScaleHandler {
        let mut h = ScaleHandler::new(ScaleKind::Linear, Domain::linear(0.0, 100.0).unwrap())
            .unwrap();
        h.set_range(0.0..100.0).unwrap();
        h
    }

    fn value() -> Scale {
        Scale::linear(Domain::linear(0.0, 10.0).unwrap(), 0.0..50.0).unwrap()
    }

    fn series(points: &[(f64, f64)]) -> DataSeries {
        let samples = points.iter().map(|&(d, v)| Sample::new(d, v)).collect();
        DataSeries::new(samples, &mut Diagnostics::new())
    }

    fn vertices(p: &Primitive) -> Vec<Point> {
        let path = match p {
            Primitive::Stroke { path, .. } | Primitive::Fill { path, .. } => path,
            _ => panic!("not a path"),
        };
        path.elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn gaps_split_lines() {
        let (d, v) = (depth(), value());
        let frame = PlotFrame::new(&d, &v, Orientation::Vertical);
        let s = series(&[(0.0, 1.0), (10.0, 2.0), (20.0, f64::NAN), (30.0, 4.0), (40.0, 5.0)]);
        let prims = render_line(&s, &frame, &LineStyle::default());
        assert_eq!(prims.len(), 2);
        assert_eq!(
            vertices(&prims[0]),
            vec![Point::new(5.0, 0.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn dash_does_not_change_geometry() {
        let (d, v) = (depth(), value());
        let frame = PlotFrame::new(&d, &v, Orientation::Vertical);
        let s = series(&[(0.0, 1.0), (10.0, 2.0)]);
        let solid = render_line(&s, &frame, &LineStyle::default());
        let dashed = render_line(
            &s,
            &frame,
            &LineStyle {
                dash: vec![4.0, 2.0],
                ..LineStyle::default()
            },
        );
        assert_eq!(vertices(&solid[0]), vertices(&dashed[0]));
    }

    #[test]
    fn area_closes_against_the_chosen_bound() {
        let (d, v) = (depth(), value());
        let frame = PlotFrame::new(&d, &v, Orientation::Vertical);
        let s = series(&[(0.0, 4.0), (10.0, 6.0)]);
        let style = AreaStyle {
            line: None,
            fill: Color::BLACK,
            use_min_as_base: true,
            complement: Some(Color::WHITE),
        };
        let prims = render_area(&s, &frame, &style);
        assert_eq!(prims.len(), 2);
        assert_eq!(
            vertices(&prims[0]),
            vec![
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(30.0, 10.0),
                Point::new(0.0, 10.0)
            ]
        );
        assert_eq!(vertices(&prims[1])[0], Point::new(50.0, 0.0));
    }

    #[test]
    fn step_holds_values_until_next_depth() {
        let (d, v) = (depth(), value());
        let frame = PlotFrame::new(&d, &v, Orientation::Vertical);
        let s = series(&[(0.0, 2.0), (10.0, 4.0), (20.0, 6.0)]);
        let prims = render_step(&s, &frame, &LineStyle::default());
        assert_eq!(prims.len(), 1);
        assert_eq!(
            vertices(&prims[0]),
            vec![
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(20.0, 10.0),
                Point::new(20.0, 20.0),
                Point::new(30.0, 20.0),
                Point::new(30.0, 20.0),
            ]
        );
    }

    #[test]
    fn dot_radius_ignores_zoom() {
        let (mut d, v) = (depth(), value());
        d.zoom_by(8.0, 0.0);
        let frame = PlotFrame::new(&d, &v, Orientation::Vertical);
        let s = series(&[(1.0, 2.0), (2.0, f64::NAN)]);
        let prims = render_dots(&s, &frame, &DotStyle { color: Color::BLACK, radius: 3.0 });
        assert_eq!(prims.len(), 1);
        let Primitive::Circle { circle, .. } = &prims[0] else {
            panic!("expected a circle");
        };
        assert_eq!(circle.radius, 3.0);
        assert!((circle.center - Point::new(10.0, 8.0)).hypot() < 1e-9);
    }
}
