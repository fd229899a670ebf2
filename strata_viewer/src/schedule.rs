// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame coalescing.

bitflags::bitflags! {
    /// Work pending for the next frame.
    ///
    /// Raw events only set bits; the host calls
    /// [`Viewer::frame`](crate::Viewer::frame) once per animation frame and
    /// all pending work runs once.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Invalidation: u8 {
        /// Container size or track list changed; a layout pass is needed.
        const LAYOUT = 0b0000_0001;
        /// Master scale changed; slaves need a sync.
        const SCALE  = 0b0000_0010;
        /// Some track data changed; resolution caches need a refresh.
        const DATA   = 0b0000_0100;
        /// Tracks were added or removed; the last layout no longer lines up
        /// with the track list.
        const TRACKS = 0b0000_1000;
    }
}

/// Accumulates invalidations between frames.
#[derive(Clone, Debug, Default)]
pub(crate) struct FrameScheduler {
    pending: Invalidation,
    frames: u64,
    layout_passes: u64,
}

impl FrameScheduler {
    pub(crate) fn invalidate(&mut self, what: Invalidation) {
        self.pending |= what;
    }

    pub(crate) fn pending(&self) -> Invalidation {
        self.pending
    }

    /// Takes the pending work for one frame.
    pub(crate) fn begin_frame(&mut self) -> Invalidation {
        self.frames += 1;
        core::mem::take(&mut self.pending)
    }

    pub(crate) fn record_layout_pass(&mut self) {
        self.layout_passes += 1;
    }

    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    pub(crate) fn layout_passes(&self) -> u64 {
        self.layout_passes
    }
}

/// What one call to [`Viewer::frame`](crate::Viewer::frame) did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Work that was pending and has now run.
    pub handled: Invalidation,
    /// Whether the layout pass produced a usable layout.
    pub laid_out: bool,
    /// Tracks whose data was re-resolved.
    pub refreshed_tracks: usize,
}

impl FrameReport {
    /// Returns `true` if the frame had nothing to do.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.handled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidations_coalesce_until_the_frame() {
        let mut scheduler = FrameScheduler::default();
        for _ in 0..10 {
            scheduler.invalidate(Invalidation::LAYOUT);
        }
        scheduler.invalidate(Invalidation::SCALE);
        assert_eq!(
            scheduler.begin_frame(),
            Invalidation::LAYOUT | Invalidation::SCALE
        );
        assert!(scheduler.pending().is_empty());
        assert!(scheduler.begin_frame().is_empty());
        assert_eq!(scheduler.frames(), 2);
        assert_eq!(scheduler.layout_passes(), 0);
    }
}
