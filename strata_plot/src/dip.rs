// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tadpole glyphs for dip data.

use kurbo::{BezPath, Circle, Point, Rect, Shape, Stroke, Vec2};
use strata_data::{Dip, DipShape, visible_span};

use crate::curve::closed_path;
use crate::frame::PlotFrame;
use crate::primitive::Primitive;

/// Geometry of a tadpole glyph, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DipStyle {
    /// Head size (radius of the circle, half side of the others).
    pub radius: f64,
    /// Tail length measured from the head center.
    pub tail_length: f64,
    /// Tail stroke width.
    pub tail_width: f64,
}

impl Default for DipStyle {
    fn default() -> Self {
        Self {
            radius: 4.0,
            tail_length: 12.0,
            tail_width: 1.0,
        }
    }
}

/// Unit vector pointing at `azimuth` degrees clockwise from screen north.
#[must_use]
pub fn tail_direction(azimuth: f64) -> Vec2 {
    let (sin, cos) = azimuth.to_radians().sin_cos();
    Vec2::new(sin, -cos)
}

/// One head and one tail per dip, placed at `(depth, dip angle)`.
#[must_use]
pub fn render_dips(dips: &[Dip], frame: &PlotFrame<'_>, style: &DipStyle) -> Vec<Primitive> {
    let span = visible_span(dips, |d| d.depth, frame.visible_depths());
    let mut out = Vec::with_capacity(span.len() * 2);
    for dip in &dips[span] {
        let Some(center) = frame.point(dip.depth, dip.dip) else {
            continue;
        };
        let dir = tail_direction(dip.azimuth);
        let mut tail = BezPath::new();
        tail.move_to(center);
        tail.line_to(center + dir * style.tail_length);
        out.push(Primitive::Stroke {
            path: tail,
            style: Stroke::new(style.tail_width),
            color: dip.color,
        });
        out.push(head(dip, center, dir, style.radius));
    }
    out
}

fn head(dip: &Dip, center: Point, dir: Vec2, r: f64) -> Primitive {
    let path = match dip.shape {
        DipShape::Circle => {
            return Primitive::Circle {
                circle: Circle::new(center, r),
                color: dip.color,
            };
        }
        DipShape::Square => Rect::from_center_size(center, (2.0 * r, 2.0 * r)).to_path(0.1),
        DipShape::Diamond => closed_path([
            center + Vec2::new(0.0, -r),
            center + Vec2::new(r, 0.0),
            center + Vec2::new(0.0, r),
            center + Vec2::new(-r, 0.0),
        ]),
        DipShape::Triangle => {
            // Apex points along the tail.
            let side = dir.turn_90() * r;
            closed_path([center + dir * r, center - dir * r + side, center - dir * r - side])
        }
    };
    Primitive::Fill {
        path,
        color: dip.color,
    }
}
