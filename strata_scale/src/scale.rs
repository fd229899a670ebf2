// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base (unzoomed) domain to pixel mapping.

use core::ops::Range;

use crate::{Domain, ScaleError, ScaleKind};

/// Static mapping from a [`Domain`] onto a pixel range.
///
/// Internally every value is first normalized to a *unit position* in
/// `[0, 1]` along the domain (extrapolating outside it), then stretched onto
/// the range. For piecewise domains each segment owns a slice of the unit
/// interval; by default every segment gets an equal slice, so segments of
/// different length get different pixel densities.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: Domain,
    stops: Vec<f64>,
    range: Range<f64>,
}

impl Scale {
    /// Creates a scale of the given kind.
    ///
    /// Fails if a logarithmic scale gets a non-positive or piecewise domain, or
    /// if the range is not finite.
    pub fn new(kind: ScaleKind, domain: Domain, range: Range<f64>) -> Result<Self, ScaleError> {
        validate_kind(kind, &domain)?;
        validate_range(&range)?;
        let stops = equal_stops(domain.segment_count());
        Ok(Self {
            kind,
            domain,
            stops,
            range,
        })
    }

    /// Shorthand for a linear scale.
    pub fn linear(domain: Domain, range: Range<f64>) -> Result<Self, ScaleError> {
        Self::new(ScaleKind::Linear, domain, range)
    }

    /// Replaces the equal per-segment share with explicit relative weights.
    ///
    /// `weights` must contain one positive, finite entry per domain segment.
    pub fn with_segment_weights(mut self, weights: &[f64]) -> Result<Self, ScaleError> {
        let valid = weights.len() == self.domain.segment_count()
            && weights.iter().all(|w| w.is_finite() && *w > 0.0);
        if !valid {
            return Err(ScaleError::SegmentWeights {
                expected: self.domain.segment_count(),
                found: weights.to_vec(),
            });
        }
        let total: f64 = weights.iter().sum();
        let mut acc = 0.0;
        let mut stops = Vec::with_capacity(weights.len() + 1);
        stops.push(0.0);
        for weight in &weights[..weights.len() - 1] {
            acc += weight / total;
            stops.push(acc);
        }
        stops.push(1.0);
        self.stops = stops;
        Ok(self)
    }

    /// Interpolation family.
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Configured domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Pixel range.
    #[must_use]
    pub fn range(&self) -> Range<f64> {
        self.range.clone()
    }

    /// Unit positions of each breakpoint.
    #[must_use]
    pub fn stops(&self) -> &[f64] {
        &self.stops
    }

    /// Replaces the domain.
    ///
    /// Segment weights reset to equal shares when the number of segments
    /// changes.
    pub fn set_domain(&mut self, domain: Domain) -> Result<(), ScaleError> {
        validate_kind(self.kind, &domain)?;
        if domain.segment_count() != self.domain.segment_count() {
            self.stops = equal_stops(domain.segment_count());
        }
        self.domain = domain;
        Ok(())
    }

    /// Replaces the pixel range.
    pub fn set_range(&mut self, range: Range<f64>) -> Result<(), ScaleError> {
        validate_range(&range)?;
        self.range = range;
        Ok(())
    }

    /// Normalized position of `value` along the domain.
    ///
    /// Returns `NaN` for non-finite input and for non-positive input on a
    /// logarithmic scale; callers treat that as a gap.
    #[must_use]
    pub fn unit(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return f64::NAN;
        }
        match self.kind {
            ScaleKind::Linear => {
                let seg = self.domain.segment_of(value);
                let b = self.domain.breakpoints();
                let (b0, b1) = (b[seg], b[seg + 1]);
                let (s0, s1) = (self.stops[seg], self.stops[seg + 1]);
                s0 + (value - b0) / (b1 - b0) * (s1 - s0)
            }
            ScaleKind::Log => {
                if value <= 0.0 {
                    return f64::NAN;
                }
                let l0 = self.domain.start().log10();
                let l1 = self.domain.end().log10();
                (value.log10() - l0) / (l1 - l0)
            }
        }
    }

    /// Domain value at a normalized position; the inverse of [`Scale::unit`].
    #[must_use]
    pub fn from_unit(&self, unit: f64) -> f64 {
        if !unit.is_finite() {
            return f64::NAN;
        }
        match self.kind {
            ScaleKind::Linear => {
                let last = self.stops.len() - 2;
                let seg = self
                    .stops
                    .partition_point(|&s| s <= unit)
                    .saturating_sub(1)
                    .min(last);
                let b = self.domain.breakpoints();
                let (b0, b1) = (b[seg], b[seg + 1]);
                let (s0, s1) = (self.stops[seg], self.stops[seg + 1]);
                b0 + (unit - s0) / (s1 - s0) * (b1 - b0)
            }
            ScaleKind::Log => {
                let l0 = self.domain.start().log10();
                let l1 = self.domain.end().log10();
                10_f64.powf(l0 + unit * (l1 - l0))
            }
        }
    }

    /// Maps a domain value to a pixel.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        self.range.start + self.unit(value) * (self.range.end - self.range.start)
    }

    /// Maps a pixel back to a domain value, extrapolating outside the range.
    ///
    /// A zero-length range has no inverse; the domain start is returned.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        let len = self.range.end - self.range.start;
        if len == 0.0 {
            return self.domain.start();
        }
        self.from_unit((pixel - self.range.start) / len)
    }
}

pub(crate) fn validate_kind(kind: ScaleKind, domain: &Domain) -> Result<(), ScaleError> {
    if kind == ScaleKind::Log {
        if domain.is_piecewise() {
            return Err(ScaleError::PiecewiseLog);
        }
        if let Some(&value) = domain.breakpoints().iter().find(|v| **v <= 0.0) {
            return Err(ScaleError::NonPositiveLog { value });
        }
    }
    Ok(())
}

pub(crate) fn validate_range(range: &Range<f64>) -> Result<(), ScaleError> {
    if range.start.is_finite() && range.end.is_finite() {
        Ok(())
    } else {
        Err(ScaleError::NonFiniteRange {
            start: range.start,
            end: range.end,
        })
    }
}

fn equal_stops(segments: usize) -> Vec<f64> {
    let n = segments as f64;
    (0..=segments).map(|i| i as f64 / n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piecewise() -> Scale {
        let domain = Domain::new(vec![0.0, 20.0, 50.0, 100.0]).unwrap();
        Scale::linear(domain, 0.0..300.0).unwrap()
    }

    #[test]
    fn piecewise_segments_have_independent_density() {
        let scale = piecewise();
        assert!((scale.map(20.0) - 100.0).abs() < 1e-9);
        assert!((scale.map(50.0) - 200.0).abs() < 1e-9);
        // 5 px per unit in the first segment, 10/3 in the second.
        assert!((scale.map(10.0) - 50.0).abs() < 1e-9);
        assert!((scale.map(35.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn piecewise_breakpoint_is_continuous() {
        let scale = piecewise();
        let b = scale.domain().breakpoints();
        let s = scale.stops();
        // Evaluate 20 with the formula of each adjacent segment.
        let left = s[0] + (20.0 - b[0]) / (b[1] - b[0]) * (s[1] - s[0]);
        let right = s[1] + (20.0 - b[1]) / (b[2] - b[1]) * (s[2] - s[1]);
        assert!((left - right).abs() < 1e-12);
        assert!((scale.map(20.0 - 1e-9) - scale.map(20.0)).abs() < 1e-6);
    }

    #[test]
    fn segment_weights_change_stops() {
        let scale = piecewise().with_segment_weights(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(scale.stops(), &[0.0, 0.25, 0.5, 1.0]);
        assert!((scale.map(50.0) - 150.0).abs() < 1e-9);
        assert!(piecewise().with_segment_weights(&[1.0, 2.0]).is_err());
        assert!(piecewise().with_segment_weights(&[1.0, 0.0, 2.0]).is_err());
    }

    #[test]
    fn log_scale_validation() {
        let zero = Domain::linear(0.0, 100.0).unwrap();
        assert_eq!(
            Scale::new(ScaleKind::Log, zero, 0.0..100.0),
            Err(ScaleError::NonPositiveLog { value: 0.0 })
        );
        let piecewise = Domain::new(vec![1.0, 10.0, 100.0]).unwrap();
        assert_eq!(
            Scale::new(ScaleKind::Log, piecewise, 0.0..100.0),
            Err(ScaleError::PiecewiseLog)
        );
    }

    #[test]
    fn log_scale_maps_decades_evenly() {
        let domain = Domain::linear(1.0, 1000.0).unwrap();
        let scale = Scale::new(ScaleKind::Log, domain, 0.0..300.0).unwrap();
        assert!((scale.map(10.0) - 100.0).abs() < 1e-9);
        assert!((scale.map(100.0) - 200.0).abs() < 1e-9);
        assert!(scale.map(0.0).is_nan());
        assert!((scale.invert(200.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn invert_extrapolates_outside_range() {
        let scale = Scale::linear(Domain::linear(0.0, 100.0).unwrap(), 0.0..200.0).unwrap();
        assert!((scale.invert(-20.0) + 10.0).abs() < 1e-9);
        assert!((scale.invert(220.0) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_domain_maps_backwards() {
        let scale = Scale::linear(Domain::linear(100.0, 0.0).unwrap(), 0.0..100.0).unwrap();
        assert!((scale.map(100.0) - 0.0).abs() < 1e-9);
        assert!((scale.map(25.0) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn zero_length_range_inverts_to_domain_start() {
        let scale = Scale::linear(Domain::linear(5.0, 10.0).unwrap(), 3.0..3.0).unwrap();
        assert_eq!(scale.invert(3.0), 5.0);
    }
}
