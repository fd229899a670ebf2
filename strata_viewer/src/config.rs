// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed configuration surface.
//!
//! These types only describe a viewer; reading them from a file or a host
//! object is up to the caller (they deserialize with `serde`, field names in
//! camelCase).

use peniko::Color;
use serde::Deserialize;
use strata_data::{ColorSpec, DistributionOptions, TrackData};
use strata_layout::{Orientation, TrackSize};
use strata_plot::{
    AreaStyle, DifferentialStyle, DipStyle, DotStyle, LegendInfo, LineStyle, Plot, PlotKind,
};
use strata_scale::{ClampMode, Domain, Scale, ScaleKind};

use crate::error::ConfigError;
use crate::registry::AccessorRegistry;

/// Whole-viewer configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Depth domain breakpoints; more than two make a piecewise axis.
    pub domain: Vec<f64>,
    /// Depth scale family.
    #[serde(default)]
    pub scale: ScaleKind,
    /// Track orientation.
    #[serde(default)]
    pub orientation: Orientation,
    /// Zoom and pan clamping.
    #[serde(default)]
    pub clamp: ClampMode,
    /// `[min, max]` zoom factor.
    #[serde(default)]
    pub zoom_limits: Option<[f64; 2]>,
    /// Tracks in display order.
    #[serde(default)]
    pub tracks: Vec<TrackConfig>,
}

/// What a track shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKindConfig {
    /// Plots over a value scale.
    #[default]
    Graph,
    /// Intervals from boundary points.
    Stacked,
    /// Stacked compositions.
    Distribution,
    /// Depth ruler.
    Scale,
}

/// One track.
///
/// `width`/`maxWidth` size vertical layouts and `height`/`maxHeight`
/// horizontal ones; the `max` form is a fixed pixel size, the other a flex
/// weight (default 1).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackConfig {
    /// Unique id.
    pub id: String,
    /// Flex weight in vertical layouts.
    pub width: Option<f64>,
    /// Fixed width in vertical layouts.
    pub max_width: Option<f64>,
    /// Flex weight in horizontal layouts.
    pub height: Option<f64>,
    /// Fixed height in horizontal layouts.
    pub max_height: Option<f64>,
    /// Value domain of a graph track.
    pub domain: Option<Vec<f64>>,
    /// Value scale family.
    pub scale: ScaleKind,
    /// Track kind.
    pub kind: TrackKindConfig,
    /// Initial data.
    pub data: TrackData,
    /// Plots of a graph track, drawn in order.
    pub plots: Vec<PlotConfig>,
    /// Settings of a distribution track.
    pub distribution: DistributionOptions,
    /// Colors of distribution keys, in key order.
    pub palette: Vec<ColorSpec>,
    /// Target tick spacing of a scale track, in pixels.
    pub tick_spacing: Option<f64>,
}

impl TrackConfig {
    /// Creates a flex graph track with no plots.
    #[must_use]
    pub fn graph(id: impl Into<String>, domain: impl Into<Vec<f64>>) -> Self {
        Self {
            id: id.into(),
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    /// Creates a flex track of another kind.
    #[must_use]
    pub fn of_kind(id: impl Into<String>, kind: TrackKindConfig) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Self::default()
        }
    }

    /// Adds a plot.
    #[must_use]
    pub fn with_plot(mut self, plot: PlotConfig) -> Self {
        self.plots.push(plot);
        self
    }

    /// Size request along the allocated axis of `orientation`.
    pub fn size(&self, orientation: Orientation) -> Result<TrackSize, ConfigError> {
        let (weight, fixed) = match orientation {
            Orientation::Vertical => (self.width, self.max_width),
            Orientation::Horizontal => (self.height, self.max_height),
        };
        let size = match (fixed, weight) {
            (Some(px), _) => TrackSize::Fixed(px),
            (None, Some(w)) => TrackSize::Flex(w),
            (None, None) => TrackSize::default(),
        };
        let value = match size {
            TrackSize::Fixed(v) | TrackSize::Flex(v) => v,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidSize {
                track: self.id.clone(),
                value,
            });
        }
        Ok(size)
    }
}

/// Plot kinds as named in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    /// See [`PlotKind::Line`].
    Line,
    /// See [`PlotKind::Area`].
    Area,
    /// See [`PlotKind::Dot`].
    Dot,
    /// See [`PlotKind::Differential`].
    Differential,
    /// See [`PlotKind::Step`].
    Step,
    /// See [`PlotKind::Dip`].
    Dip,
}

/// One plot.
#[derive(Clone, Debug, Deserialize)]
pub struct PlotConfig {
    /// Id, unique within the track.
    pub id: String,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: PlotType,
    /// Style and data options.
    #[serde(default)]
    pub options: PlotOptions,
}

impl PlotConfig {
    /// Creates a plot with default options.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: PlotType) -> Self {
        Self {
            id: id.into(),
            kind,
            options: PlotOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: PlotOptions) -> Self {
        self.options = options;
        self
    }
}

/// Per-plot options. Options that do not apply to a kind are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlotOptions {
    /// Line (or first line) color.
    pub color: Option<ColorSpec>,
    /// Area fill, or the first-above fill of a differential plot.
    pub fill: Option<ColorSpec>,
    /// Area fill toward the opposite bound.
    pub complement: Option<ColorSpec>,
    /// Second line color of a differential plot.
    pub second_color: Option<ColorSpec>,
    /// Second-above fill of a differential plot.
    pub second_fill: Option<ColorSpec>,
    /// Stroke width in pixels.
    pub width: Option<f64>,
    /// Dash pattern in pixels.
    pub dash: Vec<f64>,
    /// Dot or dip head radius in pixels.
    pub radius: Option<f64>,
    /// Dip tail length in pixels.
    pub tail_length: Option<f64>,
    /// Close areas against the value minimum (default) or maximum.
    pub use_min_as_base: Option<bool>,
    /// Value domain override.
    pub domain: Option<Vec<f64>>,
    /// Value scale family of the override.
    pub scale: ScaleKind,
    /// Name of a registered accessor.
    pub data_accessor: Option<String>,
    /// Legend metadata.
    pub legend_info: Option<LegendInfo>,
}

const SECOND_LINE: Color = Color::from_rgb8(0xc0, 0x30, 0x30);

fn color(
    plot: &str,
    option: &'static str,
    spec: Option<&ColorSpec>,
    default: Color,
) -> Result<Color, ConfigError> {
    match spec {
        None => Ok(default),
        Some(spec) => spec.to_color().ok_or_else(|| ConfigError::InvalidColor {
            plot: plot.to_owned(),
            option,
        }),
    }
}

/// Builds a [`Plot`], checking colors, scale and accessor up front.
pub(crate) fn build_plot(
    config: &PlotConfig,
    registry: &AccessorRegistry,
) -> Result<Plot, ConfigError> {
    let id = config.id.as_str();
    let o = &config.options;
    let line_color = color(id, "color", o.color.as_ref(), Color::BLACK)?;
    let line = LineStyle {
        color: line_color,
        width: o.width.unwrap_or(1.0),
        dash: o.dash.clone(),
    };

    let kind = match config.kind {
        PlotType::Line => PlotKind::Line(line),
        PlotType::Step => PlotKind::Step(line),
        PlotType::Area => PlotKind::Area(AreaStyle {
            fill: color(id, "fill", o.fill.as_ref(), line_color.with_alpha(0.3))?,
            complement: o
                .complement
                .as_ref()
                .map(|c| color(id, "complement", Some(c), Color::TRANSPARENT))
                .transpose()?,
            use_min_as_base: o.use_min_as_base.unwrap_or(true),
            line: Some(line),
        }),
        PlotType::Dot => PlotKind::Dot(DotStyle {
            color: line_color,
            radius: o.radius.unwrap_or(2.0),
        }),
        PlotType::Differential => {
            let second_color = color(id, "secondColor", o.second_color.as_ref(), SECOND_LINE)?;
            PlotKind::Differential(DifferentialStyle {
                first_above: color(id, "fill", o.fill.as_ref(), line_color.with_alpha(0.3))?,
                second_above: color(
                    id,
                    "secondFill",
                    o.second_fill.as_ref(),
                    second_color.with_alpha(0.3),
                )?,
                second: LineStyle {
                    color: second_color,
                    ..line.clone()
                },
                first: line,
            })
        }
        PlotType::Dip => {
            let defaults = DipStyle::default();
            PlotKind::Dip(DipStyle {
                radius: o.radius.unwrap_or(defaults.radius),
                tail_length: o.tail_length.unwrap_or(defaults.tail_length),
                tail_width: o.width.unwrap_or(defaults.tail_width),
            })
        }
    };

    let mut plot = Plot::new(id, kind);
    if let Some(name) = &o.data_accessor {
        let accessor = registry
            .get(name)
            .ok_or_else(|| ConfigError::UnknownAccessor {
                plot: id.to_owned(),
                name: name.clone(),
            })?;
        plot = plot.with_accessor(accessor.clone());
    }
    if let Some(domain) = &o.domain {
        let scale = Domain::new(domain.clone())
            .and_then(|d| Scale::new(o.scale, d, 0.0..1.0))
            .map_err(|source| ConfigError::PlotScale {
                plot: id.to_owned(),
                source,
            })?;
        plot = plot.with_scale(scale);
    }
    if let Some(legend) = &o.legend_info {
        plot = plot.with_legend(legend.clone());
    }
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use strata_data::DataAccessor;

    use super::*;

    fn plot(json: &str) -> PlotConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn track_sizes_follow_orientation() {
        let track: TrackConfig =
            serde_json::from_str(r#"{"id": "gr", "maxWidth": 80, "height": 2}"#).unwrap();
        assert_eq!(track.size(Orientation::Vertical), Ok(TrackSize::Fixed(80.0)));
        assert_eq!(track.size(Orientation::Horizontal), Ok(TrackSize::Flex(2.0)));
        assert_eq!(
            TrackConfig::default().size(Orientation::Vertical),
            Ok(TrackSize::Flex(1.0))
        );
        let bad = TrackConfig {
            width: Some(-1.0),
            ..TrackConfig::default()
        };
        assert!(bad.size(Orientation::Vertical).is_err());
    }

    #[test]
    fn plot_options_build_styles() {
        let config = plot(
            r##"{"id": "gr", "type": "area",
                "options": {"color": "#ff0000", "width": 2, "dash": [4, 2],
                            "useMinAsBase": false,
                            "legendInfo": {"label": "GR", "unit": "API"}}}"##,
        );
        let built = build_plot(&config, &AccessorRegistry::new()).unwrap();
        let PlotKind::Area(style) = built.kind() else {
            panic!("expected an area plot");
        };
        assert!(!style.use_min_as_base);
        let line = style.line.as_ref().unwrap();
        assert_eq!(line.width, 2.0);
        assert_eq!(line.dash, vec![4.0, 2.0]);
        assert_eq!(built.legend().map(|l| l.label.as_str()), Some("GR"));
    }

    #[test]
    fn unknown_accessor_is_a_config_error() {
        let config = plot(r#"{"id": "gr", "type": "line", "options": {"dataAccessor": "gr"}}"#);
        assert_eq!(
            build_plot(&config, &AccessorRegistry::new()).unwrap_err(),
            ConfigError::UnknownAccessor {
                plot: "gr".into(),
                name: "gr".into()
            }
        );
        let registry = AccessorRegistry::new().with("gr", DataAccessor::column("GR"));
        assert!(build_plot(&config, &registry).is_ok());
    }

    #[test]
    fn malformed_colors_and_domains_are_rejected() {
        let config = plot(r#"{"id": "gr", "type": "line", "options": {"color": [300, 0, 0]}}"#);
        assert!(matches!(
            build_plot(&config, &AccessorRegistry::new()),
            Err(ConfigError::InvalidColor { option: "color", .. })
        ));
        let config = plot(
            r#"{"id": "res", "type": "line", "options": {"domain": [0, 10, 100], "scale": "log"}}"#,
        );
        assert!(matches!(
            build_plot(&config, &AccessorRegistry::new()),
            Err(ConfigError::PlotScale { .. })
        ));
    }
}
