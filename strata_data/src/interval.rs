// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::color::IntervalColor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::input::BoundaryPoint;

/// One interval of a stacked track.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    /// Top depth.
    pub from: f64,
    /// Bottom depth.
    pub to: f64,
    /// Fill.
    pub color: IntervalColor,
    /// Optional label.
    pub label: Option<String>,
}

impl Interval {
    /// Returns `true` if `depth` lies in `[from, to)`.
    #[must_use]
    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.from && depth < self.to
    }
}

/// Pairs each boundary point with the next one's depth.
///
/// The last interval runs to `domain_max`. Fewer than two points produce no
/// intervals. Points without a finite depth are dropped and unsorted input is
/// sorted, both with a diagnostic; a malformed color becomes
/// [`IntervalColor::Undefined`].
///
/// The result is contiguous and covers `[first.depth, domain_max]`.
pub fn resolve_intervals(
    points: &[BoundaryPoint],
    domain_max: f64,
    diagnostics: &mut Diagnostics,
) -> Vec<Interval> {
    let mut ordered: Vec<(usize, &BoundaryPoint)> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.depth.is_finite())
        .collect();
    if ordered.len() != points.len() {
        diagnostics.push(Diagnostic::MissingDepth {
            dropped: points.len() - ordered.len(),
        });
    }
    if ordered.len() < 2 {
        return Vec::new();
    }
    if !ordered.is_sorted_by(|a, b| a.1.depth <= b.1.depth) {
        ordered.sort_by(|a, b| a.1.depth.total_cmp(&b.1.depth));
        diagnostics.push(Diagnostic::Unordered);
    }

    let last_depth = ordered[ordered.len() - 1].1.depth;
    let ends = ordered
        .iter()
        .skip(1)
        .map(|(_, p)| p.depth)
        .chain([domain_max.max(last_depth)]);
    ordered
        .iter()
        .zip(ends)
        .map(|(&(index, point), to)| {
            let color = IntervalColor::from_spec(&point.color);
            if color == IntervalColor::Undefined {
                diagnostics.push(Diagnostic::MalformedColor { index });
            }
            Interval {
                from: point.depth,
                to,
                color,
                label: point.label.clone(),
            }
        })
        .collect()
}
