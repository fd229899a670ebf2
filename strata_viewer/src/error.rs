// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use strata_layout::LayoutError;
use strata_scale::ScaleError;
use thiserror::Error;

/// Problems in the configuration surface, reported when a viewer, track or
/// plot is built.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The depth scale could not be built.
    #[error("invalid depth scale: {0}")]
    DepthScale(#[source] ScaleError),
    /// A track's value scale could not be built.
    #[error("track `{track}` has an invalid value scale: {source}")]
    TrackScale {
        /// Track id.
        track: String,
        /// Underlying scale error.
        source: ScaleError,
    },
    /// A plot's value scale override could not be built.
    #[error("plot `{plot}` has an invalid value scale: {source}")]
    PlotScale {
        /// Plot id.
        plot: String,
        /// Underlying scale error.
        source: ScaleError,
    },
    /// A graph track without a value domain.
    #[error("track `{0}` needs a value domain")]
    MissingDomain(String),
    /// A track id is already in use.
    #[error("track `{0}` already exists")]
    DuplicateTrack(String),
    /// A width or height is negative, zero or not finite.
    #[error("track `{track}` has invalid size {value}")]
    InvalidSize {
        /// Track id.
        track: String,
        /// The declared size.
        value: f64,
    },
    /// A plot names an accessor that was never registered.
    #[error("plot `{plot}` uses unknown data accessor `{name}`")]
    UnknownAccessor {
        /// Plot id.
        plot: String,
        /// Accessor name.
        name: String,
    },
    /// A plot style color is not an RGB(A) value.
    #[error("plot `{plot}` option `{option}` is not a valid color")]
    InvalidColor {
        /// Plot id.
        plot: String,
        /// Option name, such as `"fill"`.
        option: &'static str,
    },
    /// Plots can only be added to graph tracks.
    #[error("track `{0}` is not a graph track and cannot hold plots")]
    PlotsOnNonGraphTrack(String),
}

/// Errors returned by [`Viewer`](crate::Viewer) operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ViewerError {
    /// No layout is available; resize to a measurable size and run a frame.
    #[error("viewer is not ready: {0}")]
    NotReady(#[source] LayoutError),
    /// Tracks were added or removed since the last layout pass; run a frame.
    #[error("track list changed since the last layout pass")]
    LayoutPending,
    /// No track has this id.
    #[error("no track `{0}`")]
    UnknownTrack(String),
    /// The operation needs a master scale with an interpolator.
    #[error(transparent)]
    Scale(#[from] ScaleError),
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
