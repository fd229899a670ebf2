// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Point, Rect};
use strata_layout::Orientation;
use strata_scale::{DepthAxis, Scale};

/// Coordinate contract for one plot inside one track.
///
/// Binds the shared depth axis to the track's value scale (whose range is the
/// track's cross-axis pixel range). Renderers only read through it.
#[derive(Clone, Copy)]
pub struct PlotFrame<'a> {
    depth: &'a dyn DepthAxis,
    value: &'a Scale,
    orientation: Orientation,
}

impl core::fmt::Debug for PlotFrame<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlotFrame")
            .field("depth", &self.depth.visible_domain())
            .field("value", &self.value)
            .field("orientation", &self.orientation)
            .finish()
    }
}

impl<'a> PlotFrame<'a> {
    /// Creates a frame.
    #[must_use]
    pub fn new(depth: &'a dyn DepthAxis, value: &'a Scale, orientation: Orientation) -> Self {
        Self {
            depth,
            value,
            orientation,
        }
    }

    /// The depth axis.
    #[must_use]
    pub fn depth_axis(&self) -> &'a dyn DepthAxis {
        self.depth
    }

    /// The value scale.
    #[must_use]
    pub fn value_scale(&self) -> &'a Scale {
        self.value
    }

    /// Layout orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Depths currently visible.
    #[must_use]
    pub fn visible_depths(&self) -> Range<f64> {
        self.depth.visible_domain()
    }

    /// Pixel position of `(depth, value)`, or `None` if it cannot be mapped
    /// (for example a non-positive value on a log scale).
    #[must_use]
    pub fn point(&self, depth: f64, value: f64) -> Option<Point> {
        let d = self.depth.transform(depth);
        let v = self.value.map(value);
        (d.is_finite() && v.is_finite()).then(|| orient(self.orientation, d, v))
    }

    /// Lowest value of the value domain, used as an area base.
    #[must_use]
    pub fn value_min(&self) -> f64 {
        self.value.domain().min()
    }

    /// Highest value of the value domain.
    #[must_use]
    pub fn value_max(&self) -> f64 {
        self.value.domain().max()
    }
}

/// Coordinate contract for track-wide renderers (intervals, distributions,
/// scale rulers) that span the whole cross axis.
#[derive(Clone)]
pub struct TrackFrame<'a> {
    depth: &'a dyn DepthAxis,
    cross: Range<f64>,
    orientation: Orientation,
}

impl core::fmt::Debug for TrackFrame<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackFrame")
            .field("depth", &self.depth.visible_domain())
            .field("cross", &self.cross)
            .field("orientation", &self.orientation)
            .finish()
    }
}

impl<'a> TrackFrame<'a> {
    /// Creates a frame over the cross-axis pixel range `cross`.
    #[must_use]
    pub fn new(depth: &'a dyn DepthAxis, cross: Range<f64>, orientation: Orientation) -> Self {
        Self {
            depth,
            cross,
            orientation,
        }
    }

    /// The depth axis.
    #[must_use]
    pub fn depth_axis(&self) -> &'a dyn DepthAxis {
        self.depth
    }

    /// Depths currently visible.
    #[must_use]
    pub fn visible_depths(&self) -> Range<f64> {
        self.depth.visible_domain()
    }

    /// Layout orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cross-axis pixel range of the track.
    #[must_use]
    pub fn cross_range(&self) -> Range<f64> {
        self.cross.clone()
    }

    /// Pixel position of `depth` at fraction `t` across the track.
    #[must_use]
    pub fn point(&self, depth: f64, t: f64) -> Point {
        let cross = self.cross.start + t * (self.cross.end - self.cross.start);
        orient(self.orientation, self.depth.transform(depth), cross)
    }

    /// Full-width rectangle between two depths.
    #[must_use]
    pub fn band(&self, from: f64, to: f64) -> Rect {
        Rect::from_points(self.point(from, 0.0), self.point(to, 1.0))
    }
}

fn orient(orientation: Orientation, depth_px: f64, cross_px: f64) -> Point {
    match orientation {
        Orientation::Vertical => Point::new(cross_px, depth_px),
        Orientation::Horizontal => Point::new(depth_px, cross_px),
    }
}
