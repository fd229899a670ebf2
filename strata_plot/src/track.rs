// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track-wide renderers: stacked intervals, distributions and scale rulers.

use kurbo::{BezPath, Stroke, Vec2};
use peniko::Color;
use strata_data::{Distribution, Interval, visible_span};
use strata_layout::Orientation;

use crate::curve::closed_path;
use crate::frame::TrackFrame;
use crate::primitive::Primitive;

/// Fill used for distribution keys beyond the palette.
pub const FALLBACK_KEY_COLOR: Color = Color::from_rgb8(0x80, 0x80, 0x80);

/// One full-width band per interval.
#[must_use]
pub fn render_intervals(intervals: &[Interval], frame: &TrackFrame<'_>) -> Vec<Primitive> {
    let span = visible_span(intervals, |i| i.from, frame.visible_depths());
    intervals[span]
        .iter()
        .map(|interval| Primitive::Band {
            rect: frame.band(interval.from, interval.to),
            color: interval.color,
            label: interval.label.clone(),
        })
        .collect()
}

/// One polygon per composition key, stacked across the track in key order.
///
/// Key `k` occupies the span between the running sums of the first `k` and
/// `k + 1` fractions, so the polygons tile the full width at every depth.
/// `palette` is indexed by key; missing entries use [`FALLBACK_KEY_COLOR`].
#[must_use]
pub fn render_distribution(
    distribution: &Distribution,
    frame: &TrackFrame<'_>,
    palette: &[Color],
) -> Vec<Primitive> {
    let all = distribution.stops();
    let stops = &all[visible_span(all, |s| s.depth, frame.visible_depths())];
    if stops.len() < 2 {
        return Vec::new();
    }
    let cumulative: Vec<_> = stops.iter().map(|s| s.cumulative()).collect();
    (0..distribution.keys().len())
        .filter_map(|k| {
            // Keys with no share anywhere in view draw nothing.
            if stops.iter().all(|s| s.fractions[k] <= 0.0) {
                return None;
            }
            let left = stops
                .iter()
                .zip(&cumulative)
                .map(|(s, c)| frame.point(s.depth, c[k]));
            let right = stops
                .iter()
                .zip(&cumulative)
                .rev()
                .map(|(s, c)| frame.point(s.depth, c[k + 1]));
            Some(Primitive::Fill {
                path: closed_path(left.chain(right)),
                color: palette.get(k).copied().unwrap_or(FALLBACK_KEY_COLOR),
            })
        })
        .collect()
}

/// Style of a scale ruler.
#[derive(Clone, Debug, PartialEq)]
pub struct TickStyle {
    /// Tick and label paint.
    pub color: Color,
    /// Tick stroke width.
    pub width: f64,
    /// Tick length in pixels from the track's leading edge.
    pub length: f64,
    /// Draw the depth value next to each tick.
    pub labels: bool,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            length: 8.0,
            labels: true,
        }
    }
}

/// Tick marks, and optionally labels, at the given depths.
///
/// Depths normally come from `ScaleHandler::ticks`.
#[must_use]
pub fn render_ticks(ticks: &[f64], frame: &TrackFrame<'_>, style: &TickStyle) -> Vec<Primitive> {
    let along = match frame.orientation() {
        Orientation::Vertical => Vec2::new(1.0, 0.0),
        Orientation::Horizontal => Vec2::new(0.0, 1.0),
    };
    let mut out = Vec::with_capacity(ticks.len() * 2);
    for &depth in ticks {
        let start = frame.point(depth, 0.0);
        if !(start.x.is_finite() && start.y.is_finite()) {
            continue;
        }
        let end = start + along * style.length;
        let mut path = BezPath::new();
        path.move_to(start);
        path.line_to(end);
        out.push(Primitive::Stroke {
            path,
            style: Stroke::new(style.width),
            color: style.color,
        });
        if style.labels {
            out.push(Primitive::Label {
                at: end + along * 2.0,
                text: tick_label(depth),
                color: style.color,
            });
        }
    }
    out
}

/// Formats a tick value without float noise (`0.30000000000000004` → `0.3`).
#[must_use]
pub fn tick_label(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        // Avoid "-0".
        return "0".into();
    }
    format!("{rounded}")
}
