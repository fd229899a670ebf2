// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use log::trace;

use crate::interpolate::Interpolator;
use crate::modes::ClampMode;
use crate::scale::{Scale, validate_range};
use crate::zoom::ZoomTransform;
use crate::{Domain, ScaleError, ScaleKind};

/// Read-only depth mapping consumed by renderers and pointer readouts.
///
/// Implemented by [`ScaleState`], [`ScaleHandler`] and
/// [`SlaveScale`](crate::SlaveScale). Nothing behind this trait can mutate the
/// underlying state, so a render pass always sees one consistent snapshot.
pub trait DepthAxis {
    /// Maps a depth to a pixel along the depth axis.
    fn transform(&self, depth: f64) -> f64;

    /// Maps a pixel along the depth axis back to a depth.
    ///
    /// Pixels outside the range extrapolate.
    fn invert(&self, pixel: f64) -> f64;

    /// Depths at the start and end of the pixel range.
    fn visible_domain(&self) -> Range<f64>;

    /// Pixel range the axis is laid out on.
    fn pixel_range(&self) -> Range<f64>;
}

/// Base scale composed with a zoom transform.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleState {
    scale: Scale,
    zoom: ZoomTransform,
}

impl ScaleState {
    /// The base (unzoomed) scale.
    #[must_use]
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// The zoom transform.
    #[must_use]
    pub fn zoom(&self) -> &ZoomTransform {
        &self.zoom
    }

    fn range_len(&self) -> f64 {
        let range = self.scale.range();
        range.end - range.start
    }
}

impl DepthAxis for ScaleState {
    fn transform(&self, depth: f64) -> f64 {
        let range = self.scale.range();
        let view = self.zoom.world_to_view(self.scale.unit(depth));
        range.start + view * (range.end - range.start)
    }

    fn invert(&self, pixel: f64) -> f64 {
        let len = self.range_len();
        if len == 0.0 {
            return self.scale.domain().start();
        }
        let view = (pixel - self.scale.range().start) / len;
        self.scale.from_unit(self.zoom.view_to_world(view))
    }

    fn visible_domain(&self) -> Range<f64> {
        let visible = self.zoom.visible_world_range();
        self.scale.from_unit(visible.start)..self.scale.from_unit(visible.end)
    }

    fn pixel_range(&self) -> Range<f64> {
        self.scale.range()
    }
}

/// Owner of the authoritative depth scale state (the master scale).
///
/// A `ScaleHandler` maps the depth domain onto a pixel range and carries the
/// zoom/pan transform on top of it. Every state change bumps
/// [`ScaleHandler::revision`], which dependent [`SlaveScale`](crate::SlaveScale)s
/// use to know when to re-derive their domain.
///
/// Until [`ScaleHandler::set_range`] is called the range is empty, and zoom or
/// pan requests are ignored.
#[derive(Clone, Debug)]
pub struct ScaleHandler {
    state: ScaleState,
    interpolator: Option<Interpolator>,
    revision: u64,
}

impl ScaleHandler {
    /// Creates a handler with an empty pixel range.
    pub fn new(kind: ScaleKind, domain: Domain) -> Result<Self, ScaleError> {
        Ok(Self {
            state: ScaleState {
                scale: Scale::new(kind, domain, 0.0..0.0)?,
                zoom: ZoomTransform::new(),
            },
            interpolator: None,
            revision: 0,
        })
    }

    /// Read-only snapshot for a render pass.
    #[must_use]
    pub fn state(&self) -> &ScaleState {
        &self.state
    }

    /// Monotonic counter bumped on every state change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Configured (unzoomed) domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        self.state.scale.domain()
    }

    /// Current pixel range.
    #[must_use]
    pub fn range(&self) -> Range<f64> {
        self.state.scale.range()
    }

    /// Returns `true` once a non-empty pixel range is set.
    #[must_use]
    pub fn has_range(&self) -> bool {
        self.state.range_len() != 0.0
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.state.zoom.zoom()
    }

    /// Replaces the configured domain, keeping the relative zoom.
    ///
    /// An interpolator that does not round-trip across the new domain is
    /// rejected and the old domain is kept.
    pub fn set_domain(&mut self, domain: Domain) -> Result<(), ScaleError> {
        if let Some(interpolator) = &self.interpolator {
            interpolator.verify(&domain)?;
        }
        self.state.scale.set_domain(domain)?;
        self.bump();
        Ok(())
    }

    /// Assigns the pixel range; the visible domain is preserved.
    pub fn set_range(&mut self, range: Range<f64>) -> Result<(), ScaleError> {
        validate_range(&range)?;
        if self.state.scale.range() == range {
            return Ok(());
        }
        self.state.scale.set_range(range)?;
        self.bump();
        Ok(())
    }

    /// Maps a depth to a pixel.
    #[must_use]
    pub fn transform(&self, depth: f64) -> f64 {
        self.state.transform(depth)
    }

    /// Maps a pixel to a depth, extrapolating outside the range.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        self.state.invert(pixel)
    }

    /// Currently visible domain after zoom and pan.
    #[must_use]
    pub fn effective_domain(&self) -> Range<f64> {
        self.state.visible_domain()
    }

    /// Zooms by `factor` keeping the depth under `focal_pixel` fixed.
    pub fn zoom_by(&mut self, factor: f64, focal_pixel: f64) {
        if !self.has_range() {
            return;
        }
        let range = self.range();
        let anchor = (focal_pixel - range.start) / (range.end - range.start);
        let before = self.state.zoom.clone();
        self.state.zoom.zoom_about_view_point(anchor, factor);
        if self.state.zoom != before {
            trace!("zoom x{factor} at {focal_pixel}px -> {}", self.zoom_factor());
            self.bump();
        }
    }

    /// Pans by a pixel delta along the range direction.
    pub fn pan_by(&mut self, delta_pixel: f64) {
        if !self.has_range() {
            return;
        }
        let range = self.range();
        let before = self.state.zoom.clone();
        self.state
            .zoom
            .pan_by_view(delta_pixel / (range.end - range.start));
        if self.state.zoom != before {
            trace!("pan {delta_pixel}px");
            self.bump();
        }
    }

    /// Zooms so that exactly `depths` is visible (subject to clamping).
    pub fn zoom_to(&mut self, depths: Range<f64>) {
        let scale = &self.state.scale;
        let world = scale.unit(depths.start)..scale.unit(depths.end);
        let before = self.state.zoom.clone();
        self.state.zoom.fit_range(world);
        if self.state.zoom != before {
            self.bump();
        }
    }

    /// Shows the whole domain again.
    pub fn reset_zoom(&mut self) {
        let before = self.state.zoom.clone();
        self.state.zoom.reset();
        if self.state.zoom != before {
            self.bump();
        }
    }

    /// Sets the zoom factor limits.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let before = self.state.zoom.clone();
        self.state.zoom.set_zoom_limits(min_zoom, max_zoom);
        if self.state.zoom != before {
            self.bump();
        }
    }

    /// Sets how zoom and pan are clamped against the domain.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        let before = self.state.zoom.clone();
        self.state.zoom.set_clamp_mode(mode);
        if self.state.zoom != before {
            self.bump();
        }
    }

    /// Installs the forward/reverse pair used to derive slave scales.
    ///
    /// The pair is probed across the domain and rejected if
    /// `reverse(forward(x))` does not return `x`.
    pub fn set_interpolator(&mut self, interpolator: Interpolator) -> Result<(), ScaleError> {
        interpolator.verify(self.domain())?;
        self.interpolator = Some(interpolator);
        self.bump();
        Ok(())
    }

    /// Removes the interpolator.
    pub fn clear_interpolator(&mut self) {
        if self.interpolator.take().is_some() {
            self.bump();
        }
    }

    /// The installed interpolator, if any.
    #[must_use]
    pub fn interpolator(&self) -> Option<&Interpolator> {
        self.interpolator.as_ref()
    }

    /// Effective domain expressed in slave units.
    pub fn forward_interpolated_domain(&self) -> Result<Range<f64>, ScaleError> {
        let interpolator = self
            .interpolator
            .as_ref()
            .ok_or(ScaleError::MissingInterpolator)?;
        Ok(interpolator.forward_interpolated_domain(self.effective_domain()))
    }

    /// Converts a slave-unit domain back into master units.
    pub fn reverse_interpolated_domain(
        &self,
        slave_domain: Range<f64>,
    ) -> Result<Range<f64>, ScaleError> {
        let interpolator = self
            .interpolator
            .as_ref()
            .ok_or(ScaleError::MissingInterpolator)?;
        Ok(interpolator.reverse_interpolated_domain(slave_domain))
    }

    /// Suggests tick depths roughly `target_px` pixels apart.
    ///
    /// See [`nice_ticks`].
    #[must_use]
    pub fn ticks(&self, target_px: f64) -> Vec<f64> {
        nice_ticks(
            self.effective_domain(),
            self.state.range_len().abs(),
            target_px,
            self.state.scale.kind(),
        )
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ScaleDebugInfo {
        ScaleDebugInfo {
            kind: self.state.scale.kind(),
            domain: self.domain().breakpoints().to_vec(),
            range: self.range(),
            visible_domain: self.effective_domain(),
            zoom: self.state.zoom.zoom(),
            pan: self.state.zoom.pan(),
            zoom_limits: self.state.zoom.zoom_limits(),
            clamp_mode: self.state.zoom.clamp_mode(),
            has_interpolator: self.interpolator.is_some(),
            revision: self.revision,
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl DepthAxis for ScaleHandler {
    fn transform(&self, depth: f64) -> f64 {
        self.state.transform(depth)
    }

    fn invert(&self, pixel: f64) -> f64 {
        self.state.invert(pixel)
    }

    fn visible_domain(&self) -> Range<f64> {
        self.state.visible_domain()
    }

    fn pixel_range(&self) -> Range<f64> {
        self.state.pixel_range()
    }
}

/// Tick values for `visible` laid out over `pixels`, roughly `target_px` apart.
///
/// Linear scales use a 1-2-5 ladder; logarithmic scales place one tick per
/// decade. Degenerate inputs produce no ticks.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "decade exponents of finite f64 values fit in i32"
)]
pub fn nice_ticks(visible: Range<f64>, pixels: f64, target_px: f64, kind: ScaleKind) -> Vec<f64> {
    const MAX_TICKS: usize = 1_000;

    let (lo, hi) = if visible.start <= visible.end {
        (visible.start, visible.end)
    } else {
        (visible.end, visible.start)
    };
    if !(pixels > 0.0) || !(hi > lo) || !target_px.is_finite() || target_px <= 0.0 {
        return Vec::new();
    }

    if kind == ScaleKind::Log {
        if !(lo > 0.0) {
            return Vec::new();
        }
        let first = (lo.log10() - 1e-9).ceil() as i32;
        let last = (hi.log10() + 1e-9).floor() as i32;
        return (first..=last)
            .take(MAX_TICKS)
            .map(|exp| 10_f64.powi(exp))
            .collect();
    }

    let step = nice_step((hi - lo) / pixels * target_px);
    let mut ticks = Vec::new();
    let mut k = (lo / step).ceil();
    while k * step <= hi && ticks.len() < MAX_TICKS {
        ticks.push(k * step);
        k += 1.0;
    }
    ticks
}

/// Smallest value on the 1-2-5 ladder that is at least `desired`.
fn nice_step(desired: f64) -> f64 {
    let desired = desired.abs().max(f64::MIN_POSITIVE);
    let unit = 10_f64.powf(desired.log10().floor());
    for m in [1.0_f64, 2.0, 5.0, 10.0] {
        let step = m * unit;
        if step >= desired {
            return step;
        }
    }
    10.0 * unit
}

/// Debug snapshot of a [`ScaleHandler`] state.
#[derive(Clone, Debug)]
pub struct ScaleDebugInfo {
    /// Interpolation family.
    pub kind: ScaleKind,
    /// Configured breakpoints.
    pub domain: Vec<f64>,
    /// Pixel range.
    pub range: Range<f64>,
    /// Domain currently visible through the view.
    pub visible_domain: Range<f64>,
    /// Current zoom factor.
    pub zoom: f64,
    /// Current pan offset (fraction of the range).
    pub pan: f64,
    /// Zoom factor limits.
    pub zoom_limits: (f64, f64),
    /// Clamp mode.
    pub clamp_mode: ClampMode,
    /// Whether a master/slave interpolator is installed.
    pub has_interpolator: bool,
    /// State revision.
    pub revision: u64,
}
