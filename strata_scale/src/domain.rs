// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::ScaleError;

/// Interpolation family of a scale.
///
/// Piecewise behavior is not a separate kind: a [`Domain`] with more than two
/// breakpoints makes a linear scale piecewise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Linear (or piecewise linear) interpolation.
    #[default]
    Linear,
    /// Base-10 logarithmic interpolation over a strictly positive domain.
    Log,
}

/// Validated, strictly monotonic sequence of domain breakpoints.
///
/// Two breakpoints describe a simple `[start, end]` domain. More than two
/// describe a piecewise domain where every consecutive pair is a segment with
/// its own pixel density. A decreasing sequence describes an inverted track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Domain {
    breakpoints: Vec<f64>,
}

impl Domain {
    /// Validates and wraps the given breakpoints.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self, ScaleError> {
        let breakpoints = values.into();
        if breakpoints.len() < 2 {
            return Err(ScaleError::TooFewBreakpoints(breakpoints.len()));
        }
        if let Some(index) = breakpoints.iter().position(|v| !v.is_finite()) {
            return Err(ScaleError::NonFinite { index });
        }
        let increasing = breakpoints[1] > breakpoints[0];
        for (index, pair) in breakpoints.windows(2).enumerate() {
            let ordered = if increasing {
                pair[1] > pair[0]
            } else {
                pair[1] < pair[0]
            };
            if !ordered {
                return Err(ScaleError::NonMonotonic { index: index + 1 });
            }
        }
        Ok(Self { breakpoints })
    }

    /// Two-point domain from `start` to `end`.
    pub fn linear(start: f64, end: f64) -> Result<Self, ScaleError> {
        Self::new(vec![start, end])
    }

    /// All breakpoints in declaration order.
    #[must_use]
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// First breakpoint.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.breakpoints[0]
    }

    /// Last breakpoint.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.breakpoints[self.breakpoints.len() - 1]
    }

    /// Numeric minimum, regardless of direction.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.start().min(self.end())
    }

    /// Numeric maximum, regardless of direction.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.start().max(self.end())
    }

    /// `start..end` in declaration order.
    #[must_use]
    pub fn span(&self) -> Range<f64> {
        self.start()..self.end()
    }

    /// Returns `true` for a decreasing domain.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end() < self.start()
    }

    /// Returns `true` when the domain has more than one segment.
    #[must_use]
    pub fn is_piecewise(&self) -> bool {
        self.breakpoints.len() > 2
    }

    /// Number of segments (`breakpoints - 1`).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.breakpoints.len() - 1
    }

    /// Returns `true` if `value` lies inside the domain, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Clamps `value` into the domain.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min(), self.max())
    }

    /// Index of the segment that owns `value`.
    ///
    /// A value sitting exactly on an inner breakpoint belongs to the segment
    /// that starts there; both neighbours evaluate to the same position at
    /// that breakpoint, so the choice never produces a visible seam. Values
    /// outside the domain use the first or last segment for extrapolation.
    pub(crate) fn segment_of(&self, value: f64) -> usize {
        let past = if self.is_inverted() {
            self.breakpoints.partition_point(|&b| b >= value)
        } else {
            self.breakpoints.partition_point(|&b| b <= value)
        };
        past.saturating_sub(1).min(self.segment_count() - 1)
    }
}

impl TryFrom<Vec<f64>> for Domain {
    type Error = ScaleError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Domain> for Vec<f64> {
    fn from(domain: Domain) -> Self {
        domain.breakpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_and_non_finite_domains() {
        assert_eq!(Domain::new(vec![1.0]), Err(ScaleError::TooFewBreakpoints(1)));
        assert_eq!(
            Domain::new(vec![0.0, f64::NAN]),
            Err(ScaleError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn rejects_non_monotonic_domains() {
        assert_eq!(
            Domain::new(vec![0.0, 10.0, 5.0]),
            Err(ScaleError::NonMonotonic { index: 2 })
        );
        assert_eq!(
            Domain::new(vec![3.0, 3.0]),
            Err(ScaleError::NonMonotonic { index: 1 })
        );
    }

    #[test]
    fn inverted_domain_is_accepted() {
        let domain = Domain::new(vec![100.0, 50.0, 0.0]).unwrap();
        assert!(domain.is_inverted());
        assert_eq!(domain.min(), 0.0);
        assert_eq!(domain.max(), 100.0);
        assert_eq!(domain.segment_of(75.0), 0);
        assert_eq!(domain.segment_of(50.0), 1);
        assert_eq!(domain.segment_of(-10.0), 1);
    }

    #[test]
    fn breakpoint_belongs_to_the_segment_starting_there() {
        let domain = Domain::new(vec![0.0, 20.0, 50.0, 100.0]).unwrap();
        assert_eq!(domain.segment_of(0.0), 0);
        assert_eq!(domain.segment_of(20.0), 1);
        assert_eq!(domain.segment_of(49.9), 1);
        assert_eq!(domain.segment_of(100.0), 2);
        assert_eq!(domain.segment_of(250.0), 2);
        assert_eq!(domain.segment_of(-5.0), 0);
    }
}
