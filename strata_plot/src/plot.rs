// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};
use strata_data::{DataAccessor, Diagnostics, Expected, Resolved, TrackData, resolve};
use strata_scale::Scale;

use crate::curve::{AreaStyle, DotStyle, render_area, render_dots, render_line, render_step};
use crate::differential::{DifferentialStyle, render_differential};
use crate::dip::{DipStyle, render_dips};
use crate::frame::PlotFrame;
use crate::primitive::{LineStyle, Primitive};

/// Legend metadata passed through to the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendInfo {
    /// Curve name, such as `"GR"`.
    pub label: String,
    /// Unit, such as `"API"`.
    pub unit: Option<String>,
}

/// The closed set of plot kinds, each with its style.
#[derive(Clone, Debug, PartialEq)]
pub enum PlotKind {
    /// Polyline through the samples.
    Line(LineStyle),
    /// Line filled against a value bound.
    Area(AreaStyle),
    /// Fixed-radius circles.
    Dot(DotStyle),
    /// Two series with crossover fills.
    Differential(DifferentialStyle),
    /// Staircase.
    Step(LineStyle),
    /// Tadpoles.
    Dip(DipStyle),
}

impl PlotKind {
    /// Data shape this kind draws from.
    #[must_use]
    pub fn expected(&self) -> Expected {
        match self {
            Self::Line(_) | Self::Area(_) | Self::Dot(_) | Self::Step(_) => Expected::Single,
            Self::Differential(_) => Expected::Pair,
            Self::Dip(_) => Expected::Dips,
        }
    }
}

/// Values of one plot at a depth, for host legends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Readout {
    /// Single-series value.
    Value(f64),
    /// Both values of a differential plot.
    Pair(Option<f64>, Option<f64>),
    /// Dip angle and azimuth of the nearest dip sample.
    Dip {
        /// Sample depth.
        depth: f64,
        /// Dip angle in degrees.
        dip: f64,
        /// Azimuth in degrees.
        azimuth: f64,
    },
}

/// One plot inside a track.
#[derive(Clone, Debug)]
pub struct Plot {
    id: String,
    kind: PlotKind,
    accessor: Option<DataAccessor>,
    scale: Option<Scale>,
    legend: Option<LegendInfo>,
}

impl Plot {
    /// Creates a plot reading the track data as-is.
    pub fn new(id: impl Into<String>, kind: PlotKind) -> Self {
        Self {
            id: id.into(),
            kind,
            accessor: None,
            scale: None,
            legend: None,
        }
    }

    /// Reads the track data through `accessor`.
    #[must_use]
    pub fn with_accessor(mut self, accessor: DataAccessor) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Uses `scale` for values instead of the track's.
    ///
    /// Only the domain and kind matter; the range is replaced by the track's
    /// cross-axis pixels at render time.
    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Attaches legend metadata.
    #[must_use]
    pub fn with_legend(mut self, legend: LegendInfo) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Plot id, unique within its track.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind and style.
    #[must_use]
    pub fn kind(&self) -> &PlotKind {
        &self.kind
    }

    /// Value scale override.
    #[must_use]
    pub fn scale(&self) -> Option<&Scale> {
        self.scale.as_ref()
    }

    /// Legend metadata.
    #[must_use]
    pub fn legend(&self) -> Option<&LegendInfo> {
        self.legend.as_ref()
    }

    /// Data shape this plot draws from.
    #[must_use]
    pub fn expected(&self) -> Expected {
        self.kind.expected()
    }

    /// Resolves track data for this plot. Never fails; problems are recorded
    /// in `diagnostics` and yield an empty result.
    pub fn resolve(&self, data: &TrackData, diagnostics: &mut Diagnostics) -> Resolved {
        resolve(data, self.accessor.as_ref(), self.expected(), diagnostics)
    }

    /// Draws resolved data. A result of the wrong shape draws nothing.
    #[must_use]
    pub fn render(&self, data: &Resolved, frame: &PlotFrame<'_>) -> Vec<Primitive> {
        match (&self.kind, data) {
            (PlotKind::Line(style), Resolved::Single(s)) => render_line(s, frame, style),
            (PlotKind::Area(style), Resolved::Single(s)) => render_area(s, frame, style),
            (PlotKind::Dot(style), Resolved::Single(s)) => render_dots(s, frame, style),
            (PlotKind::Step(style), Resolved::Single(s)) => render_step(s, frame, style),
            (PlotKind::Differential(style), Resolved::Pair(a, b)) => {
                render_differential(a, b, frame, style)
            }
            (PlotKind::Dip(style), Resolved::Dips(dips)) => render_dips(dips, frame, style),
            (
                PlotKind::Line(_)
                | PlotKind::Area(_)
                | PlotKind::Dot(_)
                | PlotKind::Step(_)
                | PlotKind::Differential(_)
                | PlotKind::Dip(_),
                _,
            ) => Vec::new(),
        }
    }

    /// Value of this plot at `depth`, if any.
    #[must_use]
    pub fn readout(&self, data: &Resolved, depth: f64) -> Option<Readout> {
        match data {
            Resolved::Single(s) => s.value_at(depth).map(Readout::Value),
            Resolved::Pair(a, b) => {
                let (a, b) = (a.value_at(depth), b.value_at(depth));
                (a.is_some() || b.is_some()).then_some(Readout::Pair(a, b))
            }
            Resolved::Dips(dips) => dips
                .iter()
                .min_by(|x, y| (x.depth - depth).abs().total_cmp(&(y.depth - depth).abs()))
                .map(|d| Readout::Dip {
                    depth: d.depth,
                    dip: d.dip,
                    azimuth: d.azimuth,
                }),
        }
    }
}
