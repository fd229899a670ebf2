// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and wheel input.
//!
//! The controller turns raw pointer input into scale mutations and outward
//! events. It is the only code path that zooms or pans a [`Viewer`].
//!
//! ## Usage
//!
//! 1) Forward pointer moves to [`InteractionController::pointer_move`]. It
//!    raises a `MouseMove` event and, while a drag is active, pans.
//! 2) Start and end drags with [`InteractionController::pointer_down`] and
//!    [`InteractionController::pointer_up`].
//! 3) Forward wheel notches to [`InteractionController::wheel`] to zoom around
//!    the pointer.
//! 4) Call [`InteractionController::pointer_exit`] when the pointer leaves.

use core::ops::Range;

use kurbo::{Point, Vec2};
use strata_layout::Orientation;

use crate::viewer::Viewer;

/// Tracks an active drag.
#[derive(Clone, Copy, Debug, Default)]
struct DragState {
    start: Option<Point>,
    last: Option<Point>,
}

impl DragState {
    fn start(&mut self, pos: Point) {
        self.start = Some(pos);
        self.last = Some(pos);
    }

    /// Movement since the last update, while dragging.
    fn update(&mut self, pos: Point) -> Option<Vec2> {
        if self.start.is_none() {
            return None;
        }
        let delta = self.last.map(|last| pos - last);
        self.last = Some(pos);
        delta
    }

    fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start.map(|start| pos - start)
    }

    fn end(&mut self) {
        *self = Self::default();
    }

    fn is_dragging(&self) -> bool {
        self.start.is_some()
    }
}

/// Maps pointer input onto a [`Viewer`].
///
/// Zoom and pan always go to the master scale, even in slave mode; only the
/// depths reported in events follow the active mode.
#[derive(Clone, Debug)]
pub struct InteractionController {
    drag: DragState,
    wheel_step: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            drag: DragState::default(),
            wheel_step: 1.2,
        }
    }
}

impl InteractionController {
    /// Creates a controller zooming by 1.2x per wheel notch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zoom factor of one wheel notch (must be above 1).
    #[must_use]
    pub fn with_wheel_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 1.0 {
            self.wheel_step = step;
        }
        self
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Offset from the drag start to `pos`, while dragging.
    #[must_use]
    pub fn drag_offset(&self, pos: Point) -> Option<Vec2> {
        self.drag.total_offset(pos)
    }

    /// Pointer moved to `pos` (viewer pixels).
    ///
    /// Pans while dragging, then reports the depth under the pointer. Returns
    /// `None` while the viewer has no layout.
    pub fn pointer_move(&mut self, viewer: &mut Viewer, pos: Point) -> Option<f64> {
        if let Some(delta) = self.drag.update(pos) {
            let along = match viewer.orientation() {
                Orientation::Vertical => delta.y,
                Orientation::Horizontal => delta.x,
            };
            viewer.pan_by(along);
        }
        viewer.pointer_moved(pos)
    }

    /// Primary button pressed at `pos`; starts a drag.
    pub fn pointer_down(&mut self, pos: Point) {
        self.drag.start(pos);
    }

    /// Primary button released; ends the drag.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Pointer left the viewer; ends any drag.
    pub fn pointer_exit(&mut self, viewer: &mut Viewer) {
        self.drag.end();
        viewer.pointer_left();
    }

    /// Wheel turned by `notches` at `pos`; negative values zoom in.
    ///
    /// The depth under the pointer stays put. Without a layout this does
    /// nothing.
    pub fn wheel(&mut self, viewer: &mut Viewer, pos: Point, notches: f64) {
        if !notches.is_finite() || notches == 0.0 {
            return;
        }
        let factor = self.wheel_step.powf(-notches);
        let focal = viewer.depth_pixel(pos);
        viewer.zoom_by(factor, focal);
    }

    /// Zooms by `factor` around the pixel `focal` along the depth axis.
    pub fn zoom_by(&mut self, viewer: &mut Viewer, factor: f64, focal: f64) {
        viewer.zoom_by(factor, focal);
    }

    /// Pans by `delta` pixels along the depth axis.
    pub fn pan_by(&mut self, viewer: &mut Viewer, delta: f64) {
        viewer.pan_by(delta);
    }

    /// Shows exactly `depths` (in the active mode's units), within clamping.
    pub fn zoom_to(&mut self, viewer: &mut Viewer, depths: Range<f64>) {
        viewer.zoom_to(depths);
    }

    /// Shows the whole domain again.
    pub fn reset(&mut self, viewer: &mut Viewer) {
        self.drag.end();
        viewer.reset_zoom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_reports_incremental_deltas() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Point::new(1.0, 1.0)), None);
        drag.start(Point::new(10.0, 20.0));
        assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(drag.update(Point::new(15.0, 35.0)), Some(Vec2::new(0.0, 10.0)));
        assert_eq!(
            drag.total_offset(Point::new(15.0, 35.0)),
            Some(Vec2::new(5.0, 15.0))
        );
        drag.end();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn wheel_step_must_grow() {
        assert_eq!(InteractionController::new().with_wheel_step(0.5).wheel_step, 1.2);
        assert_eq!(InteractionController::new().with_wheel_step(2.0).wheel_step, 2.0);
    }
}
