// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Circle, Point, Rect, Stroke};
use peniko::Color;
use strata_data::IntervalColor;

/// Backend-agnostic drawing primitive in pixel space.
///
/// Primitives are painted in order; later ones cover earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Stroke an open or closed path.
    Stroke {
        /// Geometry.
        path: BezPath,
        /// Width, joins and dash pattern.
        style: Stroke,
        /// Paint.
        color: Color,
    },
    /// Fill a closed path (non-zero rule).
    Fill {
        /// Geometry.
        path: BezPath,
        /// Paint.
        color: Color,
    },
    /// Fill a circle with a fixed screen-space radius.
    Circle {
        /// Geometry.
        circle: Circle,
        /// Paint.
        color: Color,
    },
    /// Full-width band of a stacked track.
    Band {
        /// Band bounds.
        rect: Rect,
        /// Fill, possibly undefined if the source color was malformed.
        color: IntervalColor,
        /// Optional label to draw inside the band.
        label: Option<String>,
    },
    /// Text anchored at a point.
    Label {
        /// Anchor.
        at: Point,
        /// Text.
        text: String,
        /// Paint.
        color: Color,
    },
}

/// Line style shared by the path-based plots.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke paint.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash pattern; presentation only, never changes the geometry.
    pub dash: Vec<f64>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dash: Vec::new(),
        }
    }
}

impl LineStyle {
    /// Solid line of the given color and width.
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub(crate) fn stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.width);
        if self.dash.is_empty() {
            stroke
        } else {
            stroke.with_dashes(0.0, self.dash.iter().copied())
        }
    }

    pub(crate) fn primitive(&self, path: BezPath) -> Primitive {
        Primitive::Stroke {
            path,
            style: self.stroke(),
            color: self.color,
        }
    }
}
