// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::modes::ClampMode;

/// Uniform zoom + pan over the unit interval of a scale.
///
/// `ZoomTransform` works in *unit space*: world position `0.0` is the start of
/// the configured domain and `1.0` its end, and view position `0.0`/`1.0` are
/// the start/end of the pixel range. Keeping the transform in unit space means
/// a resize (new pixel range) leaves the visible domain untouched.
///
/// The mapping is `view = zoom * world + pan`.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomTransform {
    zoom: f64,
    pan: f64,
    min_zoom: f64,
    max_zoom: f64,
    clamp_mode: ClampMode,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoomTransform {
    /// Identity transform.
    ///
    /// - Initial zoom is `1.0` and pan is zero, so the full domain is visible.
    /// - Zoom is clamped to the range `[1e-6, 1e6]` by default.
    /// - Clamping defaults to [`ClampMode::Contain`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: 0.0,
            min_zoom: 1e-6,
            max_zoom: 1e6,
            clamp_mode: ClampMode::default(),
        }
    }

    /// Current zoom factor (`1.0` shows the whole domain).
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset, as a fraction of the pixel range.
    #[must_use]
    pub fn pan(&self) -> f64 {
        self.pan
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range. Non-finite or non-positive
    /// limits are ignored.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let usable = |z: f64| z.is_finite() && z > 0.0;
        if !usable(min_zoom) || !usable(max_zoom) {
            return;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Returns `(min_zoom, max_zoom)`.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let clamped = zoom.clamp(self.effective_min_zoom(), self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.clamp_to_bounds();
    }

    /// Sets the clamp mode for panning relative to the domain.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        if self.clamp_mode != mode {
            self.clamp_mode = mode;
            self.clamp_to_bounds();
        }
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Pans by a delta expressed as a fraction of the pixel range.
    pub fn pan_by_view(&mut self, delta: f64) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        self.pan += delta;
        self.clamp_to_bounds();
    }

    /// Zooms around an anchor expressed as a fraction of the pixel range.
    ///
    /// The world position under the anchor stays fixed unless clamping has to
    /// move it.
    pub fn zoom_about_view_point(&mut self, anchor: f64, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() || !anchor.is_finite() {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.effective_min_zoom(), self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let old_world = self.view_to_world(anchor);
        self.zoom = new_zoom;
        let new_anchor_view = self.world_to_view(old_world);
        self.pan += anchor - new_anchor_view;
        self.clamp_to_bounds();
    }

    /// Fits the given unit-space range into the full view.
    pub fn fit_range(&mut self, world_range: Range<f64>) {
        let (start, end) = if world_range.start <= world_range.end {
            (world_range.start, world_range.end)
        } else {
            (world_range.end, world_range.start)
        };
        let w_len = end - start;
        if w_len <= 0.0 || !w_len.is_finite() {
            return;
        }
        let zoom = (1.0 / w_len).clamp(self.effective_min_zoom(), self.max_zoom);
        self.zoom = zoom;
        // Align the range start with the view start.
        self.pan = -start * zoom;
        self.clamp_to_bounds();
    }

    /// Returns to zoom `1.0` with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0_f64.clamp(self.effective_min_zoom(), self.max_zoom);
        self.pan = 0.0;
        self.clamp_to_bounds();
    }

    /// Unit-space range currently visible through the view.
    #[must_use]
    pub fn visible_world_range(&self) -> Range<f64> {
        self.view_to_world(0.0)..self.view_to_world(1.0)
    }

    /// Converts a unit-space world position into a view fraction.
    #[must_use]
    pub fn world_to_view(&self, world: f64) -> f64 {
        self.zoom * world + self.pan
    }

    /// Converts a view fraction into a unit-space world position.
    #[must_use]
    pub fn view_to_world(&self, view: f64) -> f64 {
        (view - self.pan) / self.zoom
    }

    fn effective_min_zoom(&self) -> f64 {
        match self.clamp_mode {
            ClampMode::Contain => self.min_zoom.max(1.0).min(self.max_zoom),
            ClampMode::None | ClampMode::KeepSomeVisible => self.min_zoom,
        }
    }

    // A projection onto the allowed (zoom, pan) set: applying it twice is the
    // same as applying it once.
    fn clamp_to_bounds(&mut self) {
        match self.clamp_mode {
            ClampMode::None => {}
            ClampMode::KeepSomeVisible => {
                self.pan = self.pan.clamp(-self.zoom, 1.0);
            }
            ClampMode::Contain => {
                if self.zoom < 1.0 {
                    self.zoom = 1.0;
                }
                self.pan = self.pan.clamp(1.0 - self.zoom, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_view_roundtrip() {
        let mut zt = ZoomTransform::new();
        zt.set_zoom(2.0);
        zt.pan_by_view(-0.3);

        let world = 0.456;
        let back = zt.view_to_world(zt.world_to_view(world));
        assert!((back - world).abs() < 1e-12);
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut zt = ZoomTransform::new();
        let anchor = 0.3;
        let before = zt.view_to_world(anchor);
        zt.zoom_about_view_point(anchor, 3.0);
        let after = zt.view_to_world(anchor);
        assert!((after - before).abs() < 1e-12);
        assert_eq!(zt.zoom(), 3.0);
    }

    #[test]
    fn contain_never_shows_outside_the_domain() {
        let mut zt = ZoomTransform::new();
        zt.zoom_about_view_point(0.5, 4.0);
        zt.pan_by_view(10.0);
        let vis = zt.visible_world_range();
        assert!(vis.start >= -1e-12);
        assert!(vis.end <= 1.0 + 1e-12);
        assert!((vis.start - 0.0).abs() < 1e-12);

        zt.zoom_about_view_point(0.5, 0.01);
        assert_eq!(zt.zoom(), 1.0);
        assert_eq!(zt.visible_world_range(), 0.0..1.0);
    }

    #[test]
    fn clamp_is_idempotent() {
        let mut zt = ZoomTransform::new();
        zt.zoom_about_view_point(0.9, 8.0);
        zt.pan_by_view(-50.0);
        let once = zt.clone();
        zt.clamp_to_bounds();
        assert_eq!(zt, once);
    }

    #[test]
    fn keep_some_visible_allows_overscroll() {
        let mut zt = ZoomTransform::new();
        zt.set_clamp_mode(ClampMode::KeepSomeVisible);
        zt.pan_by_view(0.5);
        assert_eq!(zt.pan(), 0.5);
        zt.pan_by_view(10_000.0);
        let vis = zt.visible_world_range();
        assert!(vis.end >= 0.0 - 1e-12);
        assert!(vis.start <= 1.0 + 1e-12);
    }

    #[test]
    fn no_clamp_allows_zooming_out_past_the_domain() {
        let mut zt = ZoomTransform::new();
        zt.set_clamp_mode(ClampMode::None);
        zt.zoom_about_view_point(0.0, 0.5);
        assert_eq!(zt.zoom(), 0.5);
        assert!((zt.visible_world_range().end - 2.0).abs() < 1e-12);
    }

    #[test]
    fn fit_range_shows_exactly_that_range() {
        let mut zt = ZoomTransform::new();
        zt.fit_range(0.25..0.75);
        let vis = zt.visible_world_range();
        assert!((vis.start - 0.25).abs() < 1e-12);
        assert!((vis.end - 0.75).abs() < 1e-12);
        zt.reset();
        assert_eq!(zt.visible_world_range(), 0.0..1.0);
    }

    #[test]
    fn zoom_limits_are_normalized() {
        let mut zt = ZoomTransform::new();
        zt.set_zoom(50.0);
        zt.set_zoom_limits(10.0, 2.0);
        assert_eq!(zt.zoom_limits(), (2.0, 10.0));
        assert_eq!(zt.zoom(), 10.0);
    }
}
