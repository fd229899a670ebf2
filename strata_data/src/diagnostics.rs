// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use log::warn;
use thiserror::Error;

use crate::accessor::AccessError;

/// A data-shape problem that was recovered from locally.
///
/// Diagnostics never abort resolution: the offending plot degrades to an
/// empty or fallback result and the rest of the viewer keeps rendering.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Diagnostic {
    /// Row-oriented data was supplied to a plot without an accessor.
    #[error("row-oriented data needs an accessor")]
    RowsWithoutAccessor,
    /// The data is not of a shape the plot can consume directly.
    #[error("{found} data cannot be used as {expected} without an accessor")]
    UnexpectedShape {
        /// What the plot needed.
        expected: &'static str,
        /// What the data was.
        found: &'static str,
    },
    /// The accessor rejected the data.
    #[error("accessor failed: {0}")]
    Accessor(AccessError),
    /// The accessor returned the wrong number of series.
    #[error("expected {expected} series, got {found}")]
    SeriesCount {
        /// Number of series the plot needs.
        expected: usize,
        /// Number of series that came back.
        found: usize,
    },
    /// Samples without a finite depth were dropped.
    #[error("dropped {dropped} samples without a finite depth")]
    MissingDepth {
        /// How many samples were dropped.
        dropped: usize,
    },
    /// Samples were not ordered by depth and have been sorted.
    #[error("samples were not ordered by depth and have been sorted")]
    Unordered,
    /// A boundary point carries a color that is not an RGB(A) value.
    #[error("boundary point {index} has a malformed color")]
    MalformedColor {
        /// Index of the boundary point.
        index: usize,
    },
    /// A composition fraction was negative or not a number.
    #[error("composition value {value} for `{key}` at depth {depth} clamped to 0")]
    NegativeFraction {
        /// Sample depth.
        depth: f64,
        /// Composition key.
        key: String,
        /// The rejected value.
        value: f64,
    },
    /// A composition sample had nothing to distribute.
    #[error("composition at depth {depth} is empty and was skipped")]
    EmptyComposition {
        /// Sample depth.
        depth: f64,
    },
    /// A composition did not add up to its declared total.
    #[error("composition at depth {depth} sums to {sum} instead of {total}; re-normalized")]
    Renormalized {
        /// Sample depth.
        depth: f64,
        /// Actual sum of the values.
        sum: f64,
        /// Declared total.
        total: f64,
    },
    /// A dip sample was missing a field or its metadata.
    #[error("dip sample {index} is malformed and was skipped")]
    MalformedDip {
        /// Index of the sample.
        index: usize,
    },
}

/// Collector for [`Diagnostic`]s raised during resolution.
///
/// Every pushed diagnostic is also logged at `warn` level so hosts get them
/// without wiring anything up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Recorded diagnostics in order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all recorded diagnostics.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
