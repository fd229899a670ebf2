// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::diagnostics::{Diagnostic, Diagnostics};

/// One `(depth, value)` pair. A non-finite value is a gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Depth, always finite.
    pub depth: f64,
    /// Value; `NaN` marks a gap.
    pub value: f64,
}

impl Sample {
    /// Creates a sample.
    #[must_use]
    pub fn new(depth: f64, value: f64) -> Self {
        Self { depth, value }
    }

    /// Returns `true` if this sample breaks line continuity.
    #[must_use]
    pub fn is_gap(&self) -> bool {
        !self.value.is_finite()
    }
}

/// Depth-ordered sequence of samples.
///
/// Depths are non-decreasing, which is what every lookup here relies on.
/// Construction drops samples without a finite depth and stably sorts
/// unordered input, reporting both through [`Diagnostics`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSeries {
    samples: Vec<Sample>,
}

impl DataSeries {
    /// Normalizes `samples` into a series.
    pub fn new(mut samples: Vec<Sample>, diagnostics: &mut Diagnostics) -> Self {
        let before = samples.len();
        samples.retain(|s| s.depth.is_finite());
        if samples.len() != before {
            diagnostics.push(Diagnostic::MissingDepth {
                dropped: before - samples.len(),
            });
        }
        if !samples.is_sorted_by(|a, b| a.depth <= b.depth) {
            samples.sort_by(|a, b| a.depth.total_cmp(&b.depth));
            diagnostics.push(Diagnostic::Unordered);
        }
        Self { samples }
    }

    /// Builds a series from `[depth, value]` pairs where either may be null.
    pub fn from_pairs(pairs: &[[Option<f64>; 2]], diagnostics: &mut Diagnostics) -> Self {
        let samples = pairs
            .iter()
            .map(|[depth, value]| Sample {
                depth: depth.unwrap_or(f64::NAN),
                value: value.unwrap_or(f64::NAN),
            })
            .collect();
        Self::new(samples, diagnostics)
    }

    /// All samples, gaps included.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First to last depth, if any.
    #[must_use]
    pub fn depth_range(&self) -> Option<Range<f64>> {
        Some(self.samples.first()?.depth..self.samples.last()?.depth)
    }

    /// Contiguous runs of non-gap samples.
    pub fn runs(&self) -> impl Iterator<Item = &[Sample]> + '_ {
        self.samples
            .split(Sample::is_gap)
            .filter(|run| !run.is_empty())
    }

    /// Value at `depth`, linearly interpolated between neighbours.
    ///
    /// Returns `None` outside the series, and inside a gap.
    #[must_use]
    pub fn value_at(&self, depth: f64) -> Option<f64> {
        let idx = self.samples.partition_point(|s| s.depth < depth);
        let hit = self.samples.get(idx)?;
        if hit.depth == depth {
            // Duplicate depths: the last sample at this depth wins.
            let last = self.samples[idx..]
                .iter()
                .take_while(|s| s.depth == depth)
                .last()?;
            return (!last.is_gap()).then_some(last.value);
        }
        let prev = self.samples.get(idx.checked_sub(1)?)?;
        if prev.is_gap() || hit.is_gap() {
            return None;
        }
        let t = (depth - prev.depth) / (hit.depth - prev.depth);
        Some(prev.value + t * (hit.value - prev.value))
    }

    /// Indices of samples needed to draw `depths`.
    ///
    /// One neighbour on each side is included so lines run off the edge
    /// instead of stopping short.
    #[must_use]
    pub fn visible_indices(&self, depths: Range<f64>) -> Range<usize> {
        visible_span(&self.samples, |s| s.depth, depths)
    }
}

/// Index range of depth-ordered `items` that lie in `depths`, padded by one
/// item on each side so shapes crossing the edge are kept.
///
/// `depths` may run in either direction.
pub fn visible_span<T>(items: &[T], depth: impl Fn(&T) -> f64, depths: Range<f64>) -> Range<usize> {
    let (lo, hi) = if depths.start <= depths.end {
        (depths.start, depths.end)
    } else {
        (depths.end, depths.start)
    };
    let start = items.partition_point(|i| depth(i) < lo).saturating_sub(1);
    let end = (items.partition_point(|i| depth(i) <= hi) + 1).min(items.len());
    start..end.max(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> DataSeries {
        let samples = points.iter().map(|&(d, v)| Sample::new(d, v)).collect();
        DataSeries::new(samples, &mut Diagnostics::new())
    }

    #[test]
    fn unordered_input_is_sorted_with_a_diagnostic() {
        let mut diagnostics = Diagnostics::new();
        let s = DataSeries::new(
            vec![Sample::new(10.0, 1.0), Sample::new(0.0, 2.0), Sample::new(f64::NAN, 3.0)],
            &mut diagnostics,
        );
        assert_eq!(s.samples()[0].depth, 0.0);
        assert_eq!(
            diagnostics.entries(),
            &[Diagnostic::MissingDepth { dropped: 1 }, Diagnostic::Unordered]
        );
    }

    #[test]
    fn gaps_split_runs() {
        let s = series(&[(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0), (3.0, 4.0), (4.0, f64::NAN)]);
        let runs: Vec<usize> = s.runs().map(<[Sample]>::len).collect();
        assert_eq!(runs, vec![1, 2]);
    }

    #[test]
    fn value_at_interpolates_and_respects_gaps() {
        let s = series(&[(0.0, 10.0), (10.0, 20.0), (20.0, f64::NAN), (30.0, 5.0)]);
        assert_eq!(s.value_at(5.0), Some(15.0));
        assert_eq!(s.value_at(10.0), Some(20.0));
        assert_eq!(s.value_at(15.0), None);
        assert_eq!(s.value_at(-1.0), None);
        assert_eq!(s.value_at(31.0), None);
    }

    #[test]
    fn visible_indices_pad_one_sample() {
        let s = series(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (40.0, 0.0)]);
        assert_eq!(s.visible_indices(12.0..25.0), 1..4);
        assert_eq!(s.visible_indices(25.0..12.0), 1..4);
        assert_eq!(s.visible_indices(-10.0..-5.0), 0..1);
        assert_eq!(s.visible_indices(100.0..200.0), 4..5);
        assert_eq!(DataSeries::default().visible_indices(0.0..1.0), 0..0);
        assert_eq!(visible_span(&[1.0, 2.0, 3.0], |d| *d, 2.0..2.0), 0..3);
        assert_eq!(visible_span::<f64>(&[], |d| *d, 0.0..1.0), 0..0);
    }
}
