// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Configuration errors raised while building or reconfiguring a scale.
///
/// All of these are reported at setup time. Nothing in this crate returns an
/// error from `transform`/`invert`; those extrapolate instead.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ScaleError {
    /// A domain needs at least two breakpoints.
    #[error("domain needs at least two breakpoints, got {0}")]
    TooFewBreakpoints(usize),
    /// A domain breakpoint is `NaN` or infinite.
    #[error("domain breakpoint {index} is not finite")]
    NonFinite {
        /// Index of the offending breakpoint.
        index: usize,
    },
    /// Breakpoints are neither strictly increasing nor strictly decreasing.
    #[error("domain is not strictly monotonic at breakpoint {index}")]
    NonMonotonic {
        /// Index of the first breakpoint that breaks the direction.
        index: usize,
    },
    /// A logarithmic domain contains a zero or negative bound.
    #[error("logarithmic domain bound {value} must be strictly positive")]
    NonPositiveLog {
        /// The offending bound.
        value: f64,
    },
    /// Logarithmic scales cannot be combined with piecewise domains.
    #[error("logarithmic scales do not support piecewise domains")]
    PiecewiseLog,
    /// Piecewise segment weights do not match the domain.
    #[error("expected {expected} positive segment weights, got {found:?}")]
    SegmentWeights {
        /// Number of segments in the domain.
        expected: usize,
        /// The weights that were supplied.
        found: Vec<f64>,
    },
    /// A pixel range bound is `NaN` or infinite.
    #[error("pixel range {start}..{end} is not finite")]
    NonFiniteRange {
        /// Range start.
        start: f64,
        /// Range end.
        end: f64,
    },
    /// The handler has no interpolator to derive a slave scale from.
    #[error("no interpolator has been set on the master scale")]
    MissingInterpolator,
    /// An interpolator pair violates `reverse(forward(x)) == x`.
    #[error("interpolator does not round-trip: {value} came back as {back}")]
    RoundTrip {
        /// Master-domain value that was probed.
        value: f64,
        /// What `reverse(forward(value))` returned.
        back: f64,
    },
}
