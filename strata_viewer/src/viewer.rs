// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::future::Future;
use core::ops::Range;

use futures::future::Abortable;
use kurbo::{Point, Size};
use log::{debug, warn};
use strata_data::{BoundaryPoint, TrackData};
use strata_layout::{LayoutError, Orientation, TrackLayout, TrackSize, compute_layout};
use strata_scale::{
    DepthAxis, Domain, Interpolator, ScaleError, ScaleHandler, ScaleKind, ScaleMode, SlaveScale,
    nice_ticks,
};

use crate::config::{TrackConfig, ViewerConfig};
use crate::error::{ConfigError, ViewerError};
use crate::event::{Scene, TrackScene, ViewerEvent};
use crate::registry::AccessorRegistry;
use crate::request::{IntervalResponse, RequestLedger};
use crate::schedule::{FrameReport, FrameScheduler, Invalidation};
use crate::track::{PlotReadout, Track};

/// Values of every track at one depth.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackReadout {
    /// Track id.
    pub track: String,
    /// Values, one per plot with data at the depth.
    pub values: Vec<PlotReadout>,
}

/// A headless multi-track depth viewer.
///
/// The viewer owns the master [`ScaleHandler`], an optional [`SlaveScale`],
/// the ordered track list and the current layout. Input goes through an
/// [`InteractionController`](crate::InteractionController); structural
/// changes (resize, tracks, data) only mark work as pending, and the host runs
/// it with [`Viewer::frame`] once per animation frame. [`Viewer::render`] is a
/// read-only pass over the resulting state.
#[derive(Debug)]
pub struct Viewer {
    orientation: Orientation,
    size: Size,
    scale: ScaleHandler,
    slave: Option<SlaveScale>,
    mode: ScaleMode,
    tracks: Vec<Track>,
    layout: Result<TrackLayout, LayoutError>,
    registry: AccessorRegistry,
    requests: RequestLedger,
    scheduler: FrameScheduler,
    events: Vec<ViewerEvent>,
}

impl Viewer {
    /// Builds a viewer. Every configuration problem is reported here.
    pub fn new(config: ViewerConfig, registry: AccessorRegistry) -> Result<Self, ConfigError> {
        let mut scale = Domain::new(config.domain)
            .and_then(|domain| ScaleHandler::new(config.scale, domain))
            .map_err(ConfigError::DepthScale)?;
        scale.set_clamp_mode(config.clamp);
        if let Some([min, max]) = config.zoom_limits {
            scale.set_zoom_limits(min, max);
        }
        let mut viewer = Self {
            orientation: config.orientation,
            size: Size::ZERO,
            scale,
            slave: None,
            mode: ScaleMode::Master,
            tracks: Vec::with_capacity(config.tracks.len()),
            layout: Err(LayoutError::NotReady {
                width: 0.0,
                height: 0.0,
            }),
            registry,
            requests: RequestLedger::default(),
            scheduler: FrameScheduler::default(),
            events: Vec::new(),
        };
        for track in config.tracks {
            viewer.add_track(track)?;
        }
        viewer.scheduler.invalidate(Invalidation::all());
        Ok(viewer)
    }

    /// Appends a track.
    pub fn add_track(&mut self, config: TrackConfig) -> Result<(), ConfigError> {
        self.insert_track(self.tracks.len(), config)
    }

    /// Inserts a track at `index` (clamped to the track count).
    pub fn insert_track(&mut self, index: usize, config: TrackConfig) -> Result<(), ConfigError> {
        if self.track(&config.id).is_some() {
            return Err(ConfigError::DuplicateTrack(config.id));
        }
        let track = Track::from_config(config, self.orientation, &self.registry)?;
        self.tracks.insert(index.min(self.tracks.len()), track);
        self.scheduler
            .invalidate(Invalidation::LAYOUT | Invalidation::TRACKS | Invalidation::DATA);
        Ok(())
    }

    /// Removes a track and aborts its in-flight interval request.
    ///
    /// Returns `false` if no track has this id.
    pub fn remove_track(&mut self, id: &str) -> bool {
        let Some(index) = self.tracks.iter().position(|t| t.id() == id) else {
            return false;
        };
        self.tracks.remove(index);
        if self.requests.cancel(id) {
            debug!("aborted interval request of removed track `{id}`");
        }
        self.scheduler
            .invalidate(Invalidation::LAYOUT | Invalidation::TRACKS);
        true
    }

    /// Replaces a track's data. Resolution happens on the next frame.
    pub fn set_track_data(&mut self, id: &str, data: TrackData) -> Result<(), ViewerError> {
        self.track_mut(id)?.set_data(data);
        self.scheduler.invalidate(Invalidation::DATA);
        Ok(())
    }

    /// Tracks in display order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Looks up a track.
    #[must_use]
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    fn track_mut(&mut self, id: &str) -> Result<&mut Track, ViewerError> {
        self.tracks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| ViewerError::UnknownTrack(id.to_owned()))
    }

    /// Sets the container size. Layout runs on the next frame.
    pub fn resize(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.scheduler.invalidate(Invalidation::LAYOUT);
        }
    }

    /// Track orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The master scale.
    #[must_use]
    pub fn scale(&self) -> &ScaleHandler {
        &self.scale
    }

    /// The slave scale, in slave mode.
    #[must_use]
    pub fn slave(&self) -> Option<&SlaveScale> {
        self.slave.as_ref()
    }

    /// Active scale mode.
    #[must_use]
    pub fn scale_mode(&self) -> ScaleMode {
        self.mode
    }

    /// Installs the master/slave interpolator pair.
    pub fn set_interpolator(&mut self, interpolator: Interpolator) -> Result<(), ScaleError> {
        self.scale.set_interpolator(interpolator)?;
        if self.slave.is_some() {
            self.slave = Some(SlaveScale::follow(&self.scale)?);
        }
        self.scheduler.invalidate(Invalidation::SCALE);
        Ok(())
    }

    /// Switches between master and slave units.
    ///
    /// Slave mode needs an interpolator on the master. Either way zoom and pan
    /// keep going to the master.
    pub fn set_scale_mode(&mut self, mode: ScaleMode) -> Result<(), ScaleError> {
        self.slave = match mode {
            ScaleMode::Master => None,
            ScaleMode::Slave => Some(SlaveScale::follow(&self.scale)?),
        };
        self.mode = mode;
        self.scheduler.invalidate(Invalidation::SCALE);
        Ok(())
    }

    /// Depth axis in the active mode's units.
    #[must_use]
    pub fn depth_axis(&self) -> &dyn DepthAxis {
        match (&self.slave, self.mode) {
            (Some(slave), ScaleMode::Slave) => slave,
            _ => &self.scale,
        }
    }

    /// Tick depths about `spacing` pixels apart, in the active mode's units.
    #[must_use]
    pub fn ticks(&self, spacing: f64) -> Vec<f64> {
        match (&self.slave, self.mode) {
            (Some(slave), ScaleMode::Slave) => {
                let pixels = slave.pixel_range();
                nice_ticks(
                    slave.visible_domain(),
                    (pixels.end - pixels.start).abs(),
                    spacing,
                    ScaleKind::Linear,
                )
            }
            _ => self.scale.ticks(spacing),
        }
    }

    pub(crate) fn zoom_by(&mut self, factor: f64, focal_pixel: f64) {
        self.mutate_scale(|scale| scale.zoom_by(factor, focal_pixel));
    }

    pub(crate) fn pan_by(&mut self, delta_pixel: f64) {
        self.mutate_scale(|scale| scale.pan_by(delta_pixel));
    }

    pub(crate) fn zoom_to(&mut self, depths: Range<f64>) {
        let depths = match (&self.slave, self.mode) {
            (Some(slave), ScaleMode::Slave) => {
                slave.interpolator().reverse_interpolated_domain(depths)
            }
            _ => depths,
        };
        self.mutate_scale(|scale| scale.zoom_to(depths));
    }

    pub(crate) fn reset_zoom(&mut self) {
        self.mutate_scale(ScaleHandler::reset_zoom);
    }

    fn mutate_scale(&mut self, f: impl FnOnce(&mut ScaleHandler)) {
        let before = self.scale.revision();
        f(&mut self.scale);
        if self.scale.revision() != before {
            self.scheduler.invalidate(Invalidation::SCALE);
        }
    }

    /// Work waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> Invalidation {
        self.scheduler.pending()
    }

    /// Runs all pending work: at most one layout pass, a slave sync and the
    /// data re-resolution of tracks whose data changed.
    pub fn frame(&mut self) -> FrameReport {
        let handled = self.scheduler.begin_frame();
        let mut report = FrameReport {
            handled,
            laid_out: self.layout.is_ok(),
            refreshed_tracks: 0,
        };
        if handled.contains(Invalidation::LAYOUT) {
            self.layout_pass();
            report.laid_out = self.layout.is_ok();
        }
        if handled.contains(Invalidation::DATA) {
            let domain_max = self.scale.domain().max();
            for track in self.tracks.iter_mut().filter(|t| t.is_stale()) {
                track.refresh(domain_max);
                report.refreshed_tracks += 1;
            }
        }
        if handled.intersects(Invalidation::LAYOUT | Invalidation::SCALE) {
            if let Some(slave) = &mut self.slave {
                slave.sync(&self.scale);
            }
        }
        report
    }

    fn layout_pass(&mut self) {
        let sizes: Vec<TrackSize> = self.tracks.iter().map(Track::size).collect();
        self.scheduler.record_layout_pass();
        self.layout = compute_layout(&sizes, self.size, self.orientation);
        match &self.layout {
            Ok(layout) => {
                if let Err(err) = self.scale.set_range(layout.depth_range()) {
                    warn!("depth range rejected: {err}");
                }
                for (track, slot) in self.tracks.iter_mut().zip(layout.slots()) {
                    track.set_value_range(slot.value_range());
                }
                self.events
                    .push(ViewerEvent::resize(self.size, layout.track_ranges()));
            }
            Err(err) => debug!("layout pass skipped: {err}"),
        }
    }

    /// Number of layout passes run so far.
    #[must_use]
    pub fn layout_passes(&self) -> u64 {
        self.scheduler.layout_passes()
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.scheduler.frames()
    }

    /// Current layout, or why there is none.
    ///
    /// After tracks are added or removed the previous layout no longer lines
    /// up with the track list, so it is withheld until the next frame.
    pub fn layout(&self) -> Result<&TrackLayout, ViewerError> {
        if self.scheduler.pending().contains(Invalidation::TRACKS) {
            return Err(ViewerError::LayoutPending);
        }
        self.layout
            .as_ref()
            .map_err(|err| ViewerError::NotReady(err.clone()))
    }

    /// Geometry of every track as of the last frame.
    ///
    /// Read-only: scale state cannot change during the pass. Fails with
    /// [`ViewerError::NotReady`] while the container has no measurable size
    /// and with [`ViewerError::LayoutPending`] after a track list change.
    ///
    /// Data is always keyed by master depth and drawn through the master
    /// scale; only scale tracks follow the active mode.
    pub fn render(&self) -> Result<Scene, ViewerError> {
        let layout = self.layout()?;
        let ruler = self.depth_axis();
        let ticks = |spacing: f64| self.ticks(spacing);
        let tracks = self
            .tracks
            .iter()
            .zip(layout.slots())
            .map(|(track, slot)| TrackScene {
                id: track.id().to_owned(),
                bounds: slot.rect(),
                primitives: track.render(&self.scale, ruler, slot, &ticks),
            })
            .collect();
        Ok(Scene {
            size: layout.size(),
            tracks,
        })
    }

    /// Values of every track at `depth` (in the active mode's units).
    ///
    /// In slave mode the depth is mapped back to master depth first, so the
    /// values match what is drawn under the pointer.
    #[must_use]
    pub fn readout(&self, depth: f64) -> Vec<TrackReadout> {
        let depth = self.master_depth(depth);
        self.tracks
            .iter()
            .map(|track| TrackReadout {
                track: track.id().to_owned(),
                values: track.readout(depth),
            })
            .collect()
    }

    fn master_depth(&self, depth: f64) -> f64 {
        match (&self.slave, self.mode) {
            (Some(slave), ScaleMode::Slave) => slave.interpolator().reverse(depth),
            _ => depth,
        }
    }

    /// Id of the track under `point`, as of the last layout pass.
    #[must_use]
    pub fn track_at(&self, point: Point) -> Option<&str> {
        let index = self.layout().ok()?.slot_at(point)?;
        self.tracks.get(index).map(Track::id)
    }

    /// Pixel coordinate of `point` along the depth axis.
    pub(crate) fn depth_pixel(&self, point: Point) -> f64 {
        match self.orientation {
            Orientation::Vertical => point.y,
            Orientation::Horizontal => point.x,
        }
    }

    pub(crate) fn pointer_moved(&mut self, point: Point) -> Option<f64> {
        if self.layout.is_err() || !self.scale.has_range() {
            return None;
        }
        let depth = self.depth_axis().invert(self.depth_pixel(point));
        self.events.push(ViewerEvent::MouseMove {
            x: point.x,
            y: point.y,
            depth,
        });
        Some(depth)
    }

    pub(crate) fn pointer_left(&mut self) {
        self.events.push(ViewerEvent::MouseExit);
    }

    /// Takes the events raised since the last call.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ViewerEvent> + '_ {
        self.events.drain(..)
    }

    /// Starts an interval fetch for a track.
    ///
    /// Issues a new request token, superseding any earlier request for the
    /// same track, and wraps `fetch` so that removing the track aborts it.
    /// The returned future yields `None` if aborted; otherwise hand its
    /// response to [`Viewer::apply_intervals`].
    pub fn request_intervals<F>(
        &mut self,
        track: &str,
        fetch: F,
    ) -> Result<impl Future<Output = Option<IntervalResponse>> + use<F>, ViewerError>
    where
        F: Future<Output = Vec<BoundaryPoint>>,
    {
        if self.track(track).is_none() {
            return Err(ViewerError::UnknownTrack(track.to_owned()));
        }
        let (token, registration) = self.requests.issue(track);
        debug!("interval request {} issued for `{track}`", token.get());
        let track = track.to_owned();
        Ok(async move {
            let points = Abortable::new(fetch, registration).await.ok()?;
            Some(IntervalResponse {
                track,
                token,
                points,
            })
        })
    }

    /// Applies a fetched response if it is still the latest for its track.
    ///
    /// Superseded responses and responses for removed tracks are dropped and
    /// `false` is returned.
    pub fn apply_intervals(&mut self, response: IntervalResponse) -> bool {
        let IntervalResponse {
            track,
            token,
            points,
        } = response;
        if !self.requests.complete(&track, token) {
            debug!(
                "discarding stale interval response {} for `{track}`",
                token.get()
            );
            return false;
        }
        match self.track_mut(&track) {
            Ok(t) => {
                t.set_boundaries(points);
                self.scheduler.invalidate(Invalidation::DATA);
                true
            }
            Err(_) => false,
        }
    }

    /// Interval requests issued and not yet applied or cancelled.
    #[must_use]
    pub fn requests_in_flight(&self) -> usize {
        self.requests.in_flight()
    }
}
