// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw track data as supplied by the host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde::de::IgnoredAny;

use crate::color::ColorSpec;

/// `[depth, value]` pair where either side may be null.
pub type RawPair = [Option<f64>; 2];

/// Raw data attached to a track.
///
/// Deserialization tries each shape in declaration order. Row objects are
/// accepted but never resolved without an accessor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TrackData {
    /// Ordered `[depth, value]` pairs.
    Series(Vec<RawPair>),
    /// Keyed object of `[depth, value]` arrays.
    Columnar(BTreeMap<String, Vec<RawPair>>),
    /// Boundary points of a stacked track.
    Boundaries(Vec<BoundaryPoint>),
    /// Per-depth compositions of a distribution track.
    Composition(Vec<CompositionSample>),
    /// Dip/azimuth samples.
    Dips(Vec<DipSample>),
    /// Array of row objects.
    Rows(Vec<BTreeMap<String, RowValue>>),
}

impl Default for TrackData {
    fn default() -> Self {
        Self::Series(Vec::new())
    }
}

impl TrackData {
    /// Builds series data from finite pairs.
    pub fn series(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::Series(
            points
                .into_iter()
                .map(|(d, v)| [Some(d), Some(v)])
                .collect(),
        )
    }

    /// Short name of the shape, used in diagnostics.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Series(_) => "series",
            Self::Columnar(_) => "columnar",
            Self::Boundaries(_) => "boundary",
            Self::Composition(_) => "composition",
            Self::Dips(_) => "dip",
            Self::Rows(_) => "row",
        }
    }
}

/// Start of an interval on a stacked track.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryPoint {
    /// Depth where the interval starts.
    pub depth: f64,
    /// Interval fill.
    pub color: ColorSpec,
    /// Optional label.
    #[serde(default)]
    pub label: Option<String>,
}

/// Proportions at one depth of a distribution track.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionSample {
    /// Sample depth.
    pub depth: f64,
    /// Values per key.
    pub composition: Vec<CompositionEntry>,
}

/// One `{key, value}` entry of a composition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    /// Component name, such as `"sand"`.
    pub key: String,
    /// Non-negative amount.
    pub value: f64,
}

/// Head glyph of a tadpole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DipShape {
    /// Circle.
    #[default]
    Circle,
    /// Triangle pointing along the tail.
    Triangle,
    /// Axis-aligned square.
    Square,
    /// Square rotated by 45 degrees.
    Diamond,
}

/// Raw dip/azimuth sample. Incomplete samples are skipped at resolution.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DipSample {
    /// Sample depth.
    pub depth: Option<f64>,
    /// Dip angle in degrees, mapped onto the track value domain.
    pub dip: Option<f64>,
    /// Azimuth in degrees clockwise from north.
    pub azimuth: Option<f64>,
    /// Glyph color.
    pub color: Option<ColorSpec>,
    /// Glyph shape.
    pub shape: Option<DipShape>,
}

/// Field value of a row object.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    /// Number or null.
    Number(Option<f64>),
    /// String.
    Text(String),
    /// Anything else.
    Other(IgnoredAny),
}

impl RowValue {
    /// Numeric value, if finite.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(Some(v)) if v.is_finite() => Some(*v),
            _ => None,
        }
    }
}
