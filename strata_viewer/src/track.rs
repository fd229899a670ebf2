// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use log::debug;
use peniko::Color;
use strata_data::{
    BoundaryPoint, Diagnostic, Diagnostics, Distribution, DistributionOptions, Interval,
    ResolutionCache, Resolved, TrackData, resolve_distribution, resolve_intervals,
};
use strata_layout::{Orientation, TrackSize, TrackSlot};
use strata_plot::{
    Plot, PlotFrame, Primitive, Readout, TickStyle, TrackFrame, render_distribution,
    render_intervals, render_ticks,
};
use strata_scale::{DepthAxis, Domain, Scale};

use crate::config::{TrackConfig, TrackKindConfig, build_plot};
use crate::error::ConfigError;
use crate::registry::AccessorRegistry;

const DEFAULT_TICK_SPACING: f64 = 50.0;

/// What a track draws, with its kind-specific settings.
#[derive(Clone, Debug)]
pub enum TrackKind {
    /// Plots over a value scale.
    Graph {
        /// Value scale; its range is replaced by the track's pixels.
        scale: Scale,
        /// Plots, drawn in order.
        plots: Vec<Plot>,
    },
    /// Intervals from boundary points.
    Stacked,
    /// Stacked compositions.
    Distribution {
        /// Key order, declared total and blending.
        options: DistributionOptions,
        /// Key colors.
        palette: Vec<Color>,
    },
    /// Depth ruler.
    Scale {
        /// Tick appearance.
        ticks: TickStyle,
        /// Target tick spacing in pixels.
        spacing: f64,
    },
}

/// One track of a viewer: its configuration, data and resolved caches.
#[derive(Debug)]
pub struct Track {
    id: String,
    size: TrackSize,
    kind: TrackKind,
    data: TrackData,
    generation: u64,
    plot_caches: Vec<ResolutionCache<Resolved>>,
    /// Per-plot value scale ranged to the track's pixels by the last layout
    /// pass; `None` before one, or if the range was unusable.
    value_scales: Vec<Option<Scale>>,
    intervals: ResolutionCache<Vec<Interval>>,
    distribution: ResolutionCache<Distribution>,
}

impl Track {
    pub(crate) fn from_config(
        config: TrackConfig,
        orientation: Orientation,
        registry: &AccessorRegistry,
    ) -> Result<Self, ConfigError> {
        let size = config.size(orientation)?;
        if config.kind != TrackKindConfig::Graph && !config.plots.is_empty() {
            return Err(ConfigError::PlotsOnNonGraphTrack(config.id));
        }
        let kind = match config.kind {
            TrackKindConfig::Graph => {
                let breakpoints = config
                    .domain
                    .clone()
                    .ok_or_else(|| ConfigError::MissingDomain(config.id.clone()))?;
                let scale = Domain::new(breakpoints)
                    .and_then(|d| Scale::new(config.scale, d, 0.0..1.0))
                    .map_err(|source| ConfigError::TrackScale {
                        track: config.id.clone(),
                        source,
                    })?;
                let plots = config
                    .plots
                    .iter()
                    .map(|p| build_plot(p, registry))
                    .collect::<Result<Vec<_>, _>>()?;
                TrackKind::Graph { scale, plots }
            }
            TrackKindConfig::Stacked => TrackKind::Stacked,
            TrackKindConfig::Distribution => TrackKind::Distribution {
                options: config.distribution.clone(),
                palette: config
                    .palette
                    .iter()
                    .map(|c| c.to_color().unwrap_or(strata_plot::FALLBACK_KEY_COLOR))
                    .collect(),
            },
            TrackKindConfig::Scale => TrackKind::Scale {
                ticks: TickStyle::default(),
                spacing: config.tick_spacing.unwrap_or(DEFAULT_TICK_SPACING),
            },
        };
        let plot_count = match &kind {
            TrackKind::Graph { plots, .. } => plots.len(),
            _ => 0,
        };
        Ok(Self {
            id: config.id,
            size,
            kind,
            data: config.data,
            generation: 0,
            plot_caches: (0..plot_count).map(|_| ResolutionCache::new()).collect(),
            value_scales: vec![None; plot_count],
            intervals: ResolutionCache::new(),
            distribution: ResolutionCache::new(),
        })
    }

    /// Track id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Size request.
    #[must_use]
    pub fn size(&self) -> TrackSize {
        self.size
    }

    /// Kind and settings.
    #[must_use]
    pub fn kind(&self) -> &TrackKind {
        &self.kind
    }

    /// Current raw data.
    #[must_use]
    pub fn data(&self) -> &TrackData {
        &self.data
    }

    /// Bumped each time the data is replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resolved data of each plot, as of the last frame.
    pub fn resolved(&self) -> impl Iterator<Item = Option<&Resolved>> + '_ {
        self.plot_caches.iter().map(ResolutionCache::latest)
    }

    /// Intervals of a stacked track, as of the last frame.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        self.intervals.latest().map_or(&[], Vec::as_slice)
    }

    /// Profile of a distribution track, as of the last frame.
    #[must_use]
    pub fn distribution(&self) -> Option<&Distribution> {
        self.distribution.latest()
    }

    /// Diagnostics raised by the last resolution of this track.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.plot_caches
            .iter()
            .map(ResolutionCache::diagnostics)
            .chain([self.intervals.diagnostics(), self.distribution.diagnostics()])
            .flat_map(Diagnostics::entries)
    }

    pub(crate) fn set_data(&mut self, data: TrackData) {
        self.data = data;
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn set_boundaries(&mut self, points: Vec<BoundaryPoint>) {
        self.set_data(TrackData::Boundaries(points));
    }

    /// Whether [`Track::refresh`] has work to do.
    pub(crate) fn is_stale(&self) -> bool {
        let generation = self.generation;
        match &self.kind {
            TrackKind::Graph { .. } => self
                .plot_caches
                .iter()
                .any(|c| c.get(generation).is_none()),
            TrackKind::Stacked => self.intervals.get(generation).is_none(),
            TrackKind::Distribution { .. } => self.distribution.get(generation).is_none(),
            TrackKind::Scale { .. } => false,
        }
    }

    /// Re-resolves data whose generation changed. Zoom and scale changes
    /// never reach this.
    pub(crate) fn refresh(&mut self, domain_max: f64) {
        let Self {
            kind,
            data,
            generation,
            plot_caches,
            intervals,
            distribution,
            ..
        } = self;
        let (data, generation) = (&*data, *generation);
        match kind {
            TrackKind::Graph { plots, .. } => {
                for (plot, cache) in plots.iter().zip(plot_caches.iter_mut()) {
                    cache.get_or_resolve(generation, |d| plot.resolve(data, d));
                }
            }
            TrackKind::Stacked => {
                intervals.get_or_resolve(generation, |d| match data {
                    TrackData::Boundaries(points) => resolve_intervals(points, domain_max, d),
                    TrackData::Series(pairs) if pairs.is_empty() => Vec::new(),
                    other => {
                        d.push(Diagnostic::UnexpectedShape {
                            expected: "boundary points",
                            found: other.shape_name(),
                        });
                        Vec::new()
                    }
                });
            }
            TrackKind::Distribution { options, .. } => {
                distribution.get_or_resolve(generation, |d| match data {
                    TrackData::Composition(samples) => {
                        resolve_distribution(samples, options, domain_max, d)
                    }
                    TrackData::Series(pairs) if pairs.is_empty() => Distribution::default(),
                    other => {
                        d.push(Diagnostic::UnexpectedShape {
                            expected: "composition samples",
                            found: other.shape_name(),
                        });
                        Distribution::default()
                    }
                });
            }
            TrackKind::Scale { .. } => {}
        }
    }

    /// Points the value scales of a graph track at its cross-axis pixels.
    pub(crate) fn set_value_range(&mut self, range: Range<f64>) {
        let TrackKind::Graph { scale, plots } = &self.kind else {
            return;
        };
        for (plot, ranged) in plots.iter().zip(self.value_scales.iter_mut()) {
            let mut value = ranged
                .take()
                .unwrap_or_else(|| plot.scale().unwrap_or(scale).clone());
            *ranged = match value.set_range(range.clone()) {
                Ok(()) => Some(value),
                Err(err) => {
                    debug!("plot `{}` has no usable value range: {err}", plot.id());
                    None
                }
            };
        }
    }

    /// Geometry of this track inside `slot`. Plots with nothing resolved yet
    /// draw nothing.
    ///
    /// Data is placed with `depth`; scale tracks label `ruler`, which differs
    /// from `depth` in slave mode.
    pub(crate) fn render(
        &self,
        depth: &dyn DepthAxis,
        ruler: &dyn DepthAxis,
        slot: &TrackSlot,
        ticks: &dyn Fn(f64) -> Vec<f64>,
    ) -> Vec<Primitive> {
        let orientation = slot.orientation();
        match &self.kind {
            TrackKind::Graph { plots, .. } => {
                let mut out = Vec::new();
                for ((plot, cache), ranged) in
                    plots.iter().zip(&self.plot_caches).zip(&self.value_scales)
                {
                    let (Some(resolved), Some(value)) = (cache.latest(), ranged) else {
                        continue;
                    };
                    let frame = PlotFrame::new(depth, value, orientation);
                    out.extend(plot.render(resolved, &frame));
                }
                out
            }
            TrackKind::Stacked => {
                let frame = TrackFrame::new(depth, slot.cross_range(), orientation);
                render_intervals(self.intervals(), &frame)
            }
            TrackKind::Distribution { palette, .. } => {
                let frame = TrackFrame::new(depth, slot.cross_range(), orientation);
                self.distribution
                    .latest()
                    .map(|d| render_distribution(d, &frame, palette))
                    .unwrap_or_default()
            }
            TrackKind::Scale { ticks: style, spacing } => {
                let frame = TrackFrame::new(ruler, slot.cross_range(), orientation);
                render_ticks(&ticks(*spacing), &frame, style)
            }
        }
    }

    /// Per-plot values at `depth`.
    pub(crate) fn readout(&self, depth: f64) -> Vec<PlotReadout> {
        match &self.kind {
            TrackKind::Graph { plots, .. } => plots
                .iter()
                .zip(&self.plot_caches)
                .filter_map(|(plot, cache)| {
                    let value = plot.readout(cache.latest()?, depth)?;
                    Some(PlotReadout {
                        plot: plot.id().to_owned(),
                        value: TrackValue::Plot(value),
                    })
                })
                .collect(),
            TrackKind::Stacked => self
                .intervals()
                .iter()
                .find(|i| i.contains(depth))
                .map(|i| PlotReadout {
                    plot: self.id.clone(),
                    value: TrackValue::Interval {
                        from: i.from,
                        to: i.to,
                        label: i.label.clone(),
                    },
                })
                .into_iter()
                .collect(),
            TrackKind::Distribution { .. } => self
                .distribution
                .latest()
                .and_then(|d| {
                    let fractions = d.at(depth)?;
                    Some(PlotReadout {
                        plot: self.id.clone(),
                        value: TrackValue::Composition(
                            d.keys().iter().cloned().zip(fractions).collect(),
                        ),
                    })
                })
                .into_iter()
                .collect(),
            TrackKind::Scale { .. } => Vec::new(),
        }
    }
}

/// A value shown in a host legend.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackValue {
    /// Value of a graph plot.
    Plot(Readout),
    /// Interval of a stacked track containing the depth.
    Interval {
        /// Top depth.
        from: f64,
        /// Bottom depth.
        to: f64,
        /// Label.
        label: Option<String>,
    },
    /// Key fractions of a distribution track.
    Composition(Vec<(String, f64)>),
}

/// Readout of one plot (or of the track itself for non-graph tracks).
#[derive(Clone, Debug, PartialEq)]
pub struct PlotReadout {
    /// Plot id, or the track id for stacked and distribution tracks.
    pub plot: String,
    /// The value.
    pub value: TrackValue,
}

#[cfg(test)]
mod tests {
    use strata_data::TrackData;

    use super::*;
    use crate::config::{PlotConfig, PlotType};

    #[test]
    fn refresh_only_runs_on_new_data() {
        let config = TrackConfig::graph("gr", [0.0, 150.0])
            .with_plot(PlotConfig::new("gr", PlotType::Line));
        let mut track =
            Track::from_config(config, Orientation::Vertical, &AccessorRegistry::new()).unwrap();
        assert!(track.is_stale());
        track.refresh(100.0);
        assert!(!track.is_stale());

        track.set_data(TrackData::series([(0.0, 10.0), (10.0, 20.0)]));
        assert!(track.is_stale());
        track.refresh(100.0);
        track.refresh(100.0);
        assert_eq!(track.plot_caches[0].misses(), 2);
        assert_eq!(track.readout(5.0).len(), 1);
    }

    #[test]
    fn value_scales_follow_the_layout() {
        let config = TrackConfig::graph("gr", [0.0, 100.0])
            .with_plot(PlotConfig::new("gr", PlotType::Line));
        let mut track =
            Track::from_config(config, Orientation::Vertical, &AccessorRegistry::new()).unwrap();
        assert!(track.value_scales[0].is_none());
        track.set_value_range(100.0..300.0);
        let scale = track.value_scales[0].as_ref().unwrap();
        assert_eq!(scale.map(50.0), 200.0);
        track.set_value_range(f64::NAN..1.0);
        assert!(track.value_scales[0].is_none());
    }

    #[test]
    fn stacked_track_rejects_series_data() {
        let mut track = Track::from_config(
            TrackConfig::of_kind("lith", TrackKindConfig::Stacked),
            Orientation::Vertical,
            &AccessorRegistry::new(),
        )
        .unwrap();
        track.set_data(TrackData::series([(0.0, 1.0)]));
        track.refresh(100.0);
        assert!(track.intervals().is_empty());
        assert_eq!(track.diagnostics().count(), 1);
    }

    #[test]
    fn graph_tracks_need_a_domain() {
        let err = Track::from_config(
            TrackConfig {
                id: "gr".into(),
                ..TrackConfig::default()
            },
            Orientation::Vertical,
            &AccessorRegistry::new(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingDomain("gr".into()));
    }
}
