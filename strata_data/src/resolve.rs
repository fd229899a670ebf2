// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::accessor::DataAccessor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::input::{DipSample, DipShape, TrackData};
use crate::series::DataSeries;

/// What a plot needs from its data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expected {
    /// One series (line, area, dot, step).
    Single,
    /// Two series (differential).
    Pair,
    /// Dip samples (tadpoles).
    Dips,
}

impl Expected {
    fn name(self) -> &'static str {
        match self {
            Self::Single => "a single series",
            Self::Pair => "a series pair",
            Self::Dips => "dip samples",
        }
    }
}

/// A fully resolved dip sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dip {
    /// Sample depth.
    pub depth: f64,
    /// Dip angle in degrees.
    pub dip: f64,
    /// Azimuth in degrees clockwise from north.
    pub azimuth: f64,
    /// Glyph color.
    pub color: Color,
    /// Glyph shape.
    pub shape: DipShape,
}

/// Output of data resolution for one plot.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// One series.
    Single(DataSeries),
    /// Two series.
    Pair(DataSeries, DataSeries),
    /// Dip samples, ordered by depth.
    Dips(Vec<Dip>),
}

impl Resolved {
    /// An empty result of the expected shape.
    #[must_use]
    pub fn empty(expected: Expected) -> Self {
        match expected {
            Expected::Single => Self::Single(DataSeries::default()),
            Expected::Pair => Self::Pair(DataSeries::default(), DataSeries::default()),
            Expected::Dips => Self::Dips(Vec::new()),
        }
    }

    /// Returns `true` if nothing drawable was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Pair(a, b) => a.is_empty() && b.is_empty(),
            Self::Dips(d) => d.is_empty(),
        }
    }

    /// The series, if this is a single-series result.
    #[must_use]
    pub fn as_single(&self) -> Option<&DataSeries> {
        match self {
            Self::Single(s) => Some(s),
            _ => None,
        }
    }

    /// Both series, if this is a pair.
    #[must_use]
    pub fn as_pair(&self) -> Option<(&DataSeries, &DataSeries)> {
        match self {
            Self::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }

    /// The dips, if this is a dip result.
    #[must_use]
    pub fn as_dips(&self) -> Option<&[Dip]> {
        match self {
            Self::Dips(d) => Some(d),
            _ => None,
        }
    }

    fn series_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pair(..) => 2,
            Self::Dips(_) => 0,
        }
    }

    fn matches(&self, expected: Expected) -> bool {
        matches!(
            (self, expected),
            (Self::Single(_), Expected::Single)
                | (Self::Pair(..), Expected::Pair)
                | (Self::Dips(_), Expected::Dips)
        )
    }
}

/// Resolves raw track data into what a plot needs.
///
/// Without an accessor the data must already be a `[depth, value]` series (or
/// dip samples for dip plots). Every mismatch degrades to
/// [`Resolved::empty`] and records a [`Diagnostic`]; this never fails.
pub fn resolve(
    data: &TrackData,
    accessor: Option<&DataAccessor>,
    expected: Expected,
    diagnostics: &mut Diagnostics,
) -> Resolved {
    if let Some(accessor) = accessor {
        return match accessor.call(data, diagnostics) {
            Ok(resolved) if resolved.matches(expected) => resolved,
            Ok(resolved) => {
                diagnostics.push(Diagnostic::SeriesCount {
                    expected: Resolved::empty(expected).series_count(),
                    found: resolved.series_count(),
                });
                Resolved::empty(expected)
            }
            Err(err) => {
                diagnostics.push(Diagnostic::Accessor(err));
                Resolved::empty(expected)
            }
        };
    }

    match (data, expected) {
        (TrackData::Series(pairs), Expected::Single) => {
            Resolved::Single(DataSeries::from_pairs(pairs, diagnostics))
        }
        (TrackData::Series(_), Expected::Pair) => {
            diagnostics.push(Diagnostic::SeriesCount {
                expected: 2,
                found: 1,
            });
            Resolved::empty(expected)
        }
        (TrackData::Dips(samples), Expected::Dips) => {
            Resolved::Dips(resolve_dips(samples, diagnostics))
        }
        (TrackData::Rows(_), _) => {
            diagnostics.push(Diagnostic::RowsWithoutAccessor);
            Resolved::empty(expected)
        }
        (other, _) => {
            diagnostics.push(Diagnostic::UnexpectedShape {
                expected: expected.name(),
                found: other.shape_name(),
            });
            Resolved::empty(expected)
        }
    }
}

/// Keeps complete dip samples, ordered by depth.
///
/// A sample needs a finite depth, dip and azimuth plus a valid color and a
/// shape; anything less is skipped with a diagnostic.
pub fn resolve_dips(samples: &[DipSample], diagnostics: &mut Diagnostics) -> Vec<Dip> {
    let mut dips: Vec<Dip> = samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            let dip = complete_dip(sample);
            if dip.is_none() {
                diagnostics.push(Diagnostic::MalformedDip { index });
            }
            dip
        })
        .collect();
    if !dips.is_sorted_by(|a, b| a.depth <= b.depth) {
        dips.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        diagnostics.push(Diagnostic::Unordered);
    }
    dips
}

fn complete_dip(sample: &DipSample) -> Option<Dip> {
    let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
    Some(Dip {
        depth: finite(sample.depth)?,
        dip: finite(sample.dip)?,
        azimuth: finite(sample.azimuth)?,
        color: sample.color.as_ref()?.to_color()?,
        shape: sample.shape?,
    })
}
