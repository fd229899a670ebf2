// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Crossover fills between two series.

use core::ops::Range;

use peniko::Color;
use strata_data::{DataSeries, Sample};

use crate::curve::{closed_path, render_line};
use crate::frame::PlotFrame;
use crate::primitive::{LineStyle, Primitive};

/// Style of a differential plot.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferentialStyle {
    /// Line of the first series.
    pub first: LineStyle,
    /// Line of the second series.
    pub second: LineStyle,
    /// Fill where the first series is above the second.
    pub first_above: Color,
    /// Fill where the second series is above the first.
    pub second_above: Color,
}

/// A vertex of a differential region: depth and both values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossPoint {
    /// Depth.
    pub depth: f64,
    /// Value of the first series.
    pub first: f64,
    /// Value of the second series.
    pub second: f64,
}

/// Depth span where one series stays on the same side of the other.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferentialRegion {
    /// `true` if the first series has the higher values in this region.
    pub first_above: bool,
    /// Vertices in depth order; the ends sit on crossovers or data bounds.
    pub points: Vec<CrossPoint>,
}

/// Splits the depth range covered by both series into same-side regions.
///
/// Values are sampled on the union of both depth grids, restricted to the
/// overlap. Wherever the difference changes sign between two grid depths, the
/// crossover depth is interpolated and both neighbouring regions end there.
/// Depths where either series has a gap break the region.
#[must_use]
pub fn differential_regions(first: &DataSeries, second: &DataSeries) -> Vec<DifferentialRegion> {
    regions_on(first, second, first.samples(), second.samples())
}

/// Like [`differential_regions`], restricted to the samples needed to draw
/// `depths` (plus one neighbour on each side of it).
#[must_use]
pub fn visible_differential_regions(
    first: &DataSeries,
    second: &DataSeries,
    depths: Range<f64>,
) -> Vec<DifferentialRegion> {
    let a = &first.samples()[first.visible_indices(depths.clone())];
    let b = &second.samples()[second.visible_indices(depths)];
    regions_on(first, second, a, b)
}

/// Regions over the grid formed by the depths of `a` and `b`, which are
/// contiguous sub-slices of `first` and `second`. The grid spans only the
/// depths both slices cover.
fn regions_on(
    first: &DataSeries,
    second: &DataSeries,
    a: &[Sample],
    b: &[Sample],
) -> Vec<DifferentialRegion> {
    let (Some(a0), Some(a1), Some(b0), Some(b1)) = (a.first(), a.last(), b.first(), b.last())
    else {
        return Vec::new();
    };
    let lo = a0.depth.max(b0.depth);
    let hi = a1.depth.min(b1.depth);
    if !(lo <= hi) {
        return Vec::new();
    }

    let mut grid: Vec<f64> = a
        .iter()
        .chain(b)
        .map(|s| s.depth)
        .filter(|d| (lo..=hi).contains(d))
        .collect();
    grid.sort_by(f64::total_cmp);
    grid.dedup();

    let mut regions = Vec::new();
    let mut current: Vec<CrossPoint> = Vec::new();
    let mut prev: Option<CrossPoint> = None;
    // Side of the last non-zero difference in the current region.
    let mut side: Option<bool> = None;
    for depth in grid {
        let point = first
            .value_at(depth)
            .zip(second.value_at(depth))
            .map(|(f, s)| CrossPoint {
                depth,
                first: f,
                second: s,
            });
        let Some(point) = point else {
            flush(&mut regions, &mut current);
            prev = None;
            side = None;
            continue;
        };
        let diff = point.first - point.second;
        if let Some(p) = prev {
            let d0 = p.first - p.second;
            if d0 * diff < 0.0 {
                let t = d0 / (d0 - diff);
                let value = p.first + t * (point.first - p.first);
                let cross = CrossPoint {
                    depth: p.depth + t * (point.depth - p.depth),
                    first: value,
                    second: value,
                };
                current.push(cross);
                flush(&mut regions, &mut current);
                current.push(cross);
            } else if d0 == 0.0 && side.is_some_and(|above| (diff > 0.0) != above) && diff != 0.0 {
                // Touched at the previous sample and came out on the other side.
                flush(&mut regions, &mut current);
                current.push(p);
            }
        }
        if diff != 0.0 {
            side = Some(diff > 0.0);
        }
        current.push(point);
        prev = Some(point);
    }
    flush(&mut regions, &mut current);
    regions
}

fn flush(regions: &mut Vec<DifferentialRegion>, current: &mut Vec<CrossPoint>) {
    let points = core::mem::take(current);
    if points.len() < 2 {
        return;
    }
    // All-equal spans have no area and no side.
    let Some(side) = points
        .iter()
        .map(|p| p.first - p.second)
        .find(|d| *d != 0.0)
    else {
        return;
    };
    regions.push(DifferentialRegion {
        first_above: side > 0.0,
        points,
    });
}

/// Filled crossover regions plus both series as open lines.
///
/// Fills only cover depths where both series are defined; the lines are drawn
/// over their full extent. Both are culled to the frame's visible depths.
#[must_use]
pub fn render_differential(
    first: &DataSeries,
    second: &DataSeries,
    frame: &PlotFrame<'_>,
    style: &DifferentialStyle,
) -> Vec<Primitive> {
    let mut out: Vec<Primitive> = visible_differential_regions(first, second, frame.visible_depths())
        .into_iter()
        .filter_map(|region| {
            let forward = region.points.iter().map(|p| frame.point(p.depth, p.first));
            let back = region
                .points
                .iter()
                .rev()
                .map(|p| frame.point(p.depth, p.second));
            let outline: Option<Vec<_>> = forward.chain(back).collect();
            let color = if region.first_above {
                style.first_above
            } else {
                style.second_above
            };
            outline.map(|points| Primitive::Fill {
                path: closed_path(points),
                color,
            })
        })
        .collect();
    out.extend(render_line(first, frame, &style.first));
    out.extend(render_line(second, frame, &style.second));
    out
}

#[cfg(test)]
mod tests {
    use strata_data::{Diagnostics, Sample};

    use super::*;

    fn series(points: &[(f64, f64)]) -> DataSeries {
        let samples = points.iter().map(|&(d, v)| Sample::new(d, v)).collect();
        DataSeries::new(samples, &mut Diagnostics::new())
    }

    #[test]
    fn crossover_is_found_between_samples() {
        let a = series(&[(0.0, 10.0), (10.0, 20.0)]);
        let b = series(&[(0.0, 15.0), (10.0, 15.0)]);
        let regions = differential_regions(&a, &b);
        assert_eq!(regions.len(), 2);
        assert!(!regions[0].first_above);
        assert!(regions[1].first_above);
        let cross = regions[0].points[regions[0].points.len() - 1];
        assert_eq!(cross.depth, 5.0);
        assert_eq!(cross.first, 15.0);
        assert_eq!(regions[1].points[0], cross);
    }

    #[test]
    fn only_the_overlap_is_filled() {
        let a = series(&[(0.0, 1.0), (5.0, 1.0), (20.0, 1.0)]);
        let b = series(&[(5.0, 0.0), (10.0, 0.0)]);
        let regions = differential_regions(&a, &b);
        assert_eq!(regions.len(), 1);
        let depths: Vec<f64> = regions[0].points.iter().map(|p| p.depth).collect();
        assert_eq!(depths, vec![5.0, 10.0]);
    }

    #[test]
    fn visible_regions_only_cover_the_window() {
        let a = series(&(0..1000).map(|i| (f64::from(i), 1.0)).collect::<Vec<_>>());
        let b = series(&[(0.0, 0.0), (999.0, 0.0)]);
        let regions = visible_differential_regions(&a, &b, 100.0..110.0);
        assert_eq!(regions.len(), 1);
        let depths: Vec<f64> = regions[0].points.iter().map(|p| p.depth).collect();
        assert_eq!(depths.first(), Some(&99.0));
        assert_eq!(depths.last(), Some(&111.0));
        assert_eq!(depths.len(), 13);
        assert_eq!(differential_regions(&a, &b)[0].points.len(), 1000);
    }

    #[test]
    fn gaps_break_regions() {
        let a = series(&[(0.0, 1.0), (1.0, 1.0), (2.0, f64::NAN), (3.0, 1.0), (4.0, 1.0)]);
        let b = series(&[(0.0, 0.0), (4.0, 0.0)]);
        assert_eq!(differential_regions(&a, &b).len(), 2);
        assert!(differential_regions(&a, &DataSeries::default()).is_empty());
    }
}
