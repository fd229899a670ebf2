// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Rect, Size};
use strata_plot::Primitive;

/// Notifications for host overlays and legends.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    /// Pointer moved over the tracks.
    MouseMove {
        /// Pointer x in viewer pixels.
        x: f64,
        /// Pointer y in viewer pixels.
        y: f64,
        /// Depth under the pointer, in the active scale mode's units.
        depth: f64,
    },
    /// Pointer left the viewer.
    MouseExit,
    /// A layout pass finished.
    Resize {
        /// Container width.
        width: f64,
        /// Container height.
        height: f64,
        /// Cross-axis pixel range of each track, in track order.
        track_ranges: Vec<Range<f64>>,
    },
}

impl ViewerEvent {
    pub(crate) fn resize(size: Size, track_ranges: Vec<Range<f64>>) -> Self {
        Self::Resize {
            width: size.width,
            height: size.height,
            track_ranges,
        }
    }
}

/// Geometry of one track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackScene {
    /// Track id.
    pub id: String,
    /// Track bounds; primitives are in viewer pixels and may need clipping to
    /// this.
    pub bounds: Rect,
    /// Primitives in paint order.
    pub primitives: Vec<Primitive>,
}

/// Output of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Container size the scene was laid out for.
    pub size: Size,
    /// One entry per track, in display order.
    pub tracks: Vec<TrackScene>,
}

impl Scene {
    /// Total number of primitives.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.tracks.iter().map(|t| t.primitives.len()).sum()
    }

    /// Scene of the track with `id`.
    #[must_use]
    pub fn track(&self, id: &str) -> Option<&TrackScene> {
        self.tracks.iter().find(|t| t.id == id)
    }
}
