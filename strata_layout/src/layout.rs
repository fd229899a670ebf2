// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use kurbo::{Point, Rect, Size};
use log::debug;
use thiserror::Error;

use crate::size::{Orientation, TrackSize};

/// Reasons a layout pass cannot produce slots.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// The container has no measurable size yet; retry after a resize.
    #[error("container {width}x{height} is not measurable yet")]
    NotReady {
        /// Container width.
        width: f64,
        /// Container height.
        height: f64,
    },
    /// A track declared a negative or non-finite size.
    #[error("track {index} has invalid size {size:?}")]
    InvalidSize {
        /// Index of the offending track.
        index: usize,
        /// The declared size.
        size: TrackSize,
    },
}

/// Pixel slot assigned to one track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackSlot {
    index: usize,
    rect: Rect,
    orientation: Orientation,
}

impl TrackSlot {
    /// Position of the track in the input order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bounding rectangle of the track.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Layout orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Allocated extent along the cross axis.
    #[must_use]
    pub fn extent(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.rect.width(),
            Orientation::Horizontal => self.rect.height(),
        }
    }

    /// Start..end of the slot along the allocated axis.
    #[must_use]
    pub fn cross_range(&self) -> Range<f64> {
        match self.orientation {
            Orientation::Vertical => self.rect.x0..self.rect.x1,
            Orientation::Horizontal => self.rect.y0..self.rect.y1,
        }
    }

    /// Pixel range of the depth axis inside this slot.
    #[must_use]
    pub fn depth_range(&self) -> Range<f64> {
        match self.orientation {
            Orientation::Vertical => self.rect.y0..self.rect.y1,
            Orientation::Horizontal => self.rect.x0..self.rect.x1,
        }
    }

    /// Pixel range for the value scale of this track.
    ///
    /// Values grow rightwards in vertical layouts and upwards in horizontal
    /// ones, so the horizontal range runs from the bottom edge to the top.
    #[must_use]
    pub fn value_range(&self) -> Range<f64> {
        match self.orientation {
            Orientation::Vertical => self.rect.x0..self.rect.x1,
            Orientation::Horizontal => self.rect.y1..self.rect.y0,
        }
    }
}

/// Result of one layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackLayout {
    size: Size,
    orientation: Orientation,
    slots: Vec<TrackSlot>,
}

impl TrackLayout {
    /// Container size this layout was computed for.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Orientation this layout was computed for.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Slots in input order.
    #[must_use]
    pub fn slots(&self) -> &[TrackSlot] {
        &self.slots
    }

    /// Slot of the track at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TrackSlot> {
        self.slots.get(index)
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the layout has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pixel range shared by every track along the depth axis.
    #[must_use]
    pub fn depth_range(&self) -> Range<f64> {
        0.0..self.orientation.depth_extent(self.size)
    }

    /// Cross-axis ranges of every slot, in input order.
    #[must_use]
    pub fn track_ranges(&self) -> Vec<Range<f64>> {
        self.slots.iter().map(TrackSlot::cross_range).collect()
    }

    /// Index of the slot under `point`, if any.
    #[must_use]
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        let bounds = self.size.to_rect();
        if !(point.x >= bounds.x0 && point.x < bounds.x1 && point.y >= bounds.y0 && point.y < bounds.y1)
        {
            return None;
        }
        let cross = match self.orientation {
            Orientation::Vertical => point.x,
            Orientation::Horizontal => point.y,
        };
        let idx = self
            .slots
            .partition_point(|slot| slot.cross_range().end <= cross);
        self.slots
            .get(idx)
            .filter(|slot| slot.cross_range().start <= cross)
            .map(TrackSlot::index)
    }
}

/// Partitions `size` among `sizes` along the orientation's cross axis.
///
/// Fixed tracks are allocated first, in order, each clipped to what is left.
/// The remainder is split among flex tracks in proportion to their weights.
/// Offsets are prefix sums of the allocated extents, so the same inputs always
/// produce the same slots.
pub fn compute_layout(
    sizes: &[TrackSize],
    size: Size,
    orientation: Orientation,
) -> Result<TrackLayout, LayoutError> {
    let measurable = |v: f64| v.is_finite() && v > 0.0;
    if !measurable(size.width) || !measurable(size.height) {
        return Err(LayoutError::NotReady {
            width: size.width,
            height: size.height,
        });
    }
    if let Some((index, &bad)) = sizes
        .iter()
        .enumerate()
        .find(|(_, s)| !(s.amount().is_finite() && s.amount() >= 0.0))
    {
        return Err(LayoutError::InvalidSize { index, size: bad });
    }

    let total = orientation.cross_extent(size);
    let mut remaining = total;
    let mut extents = vec![0.0; sizes.len()];
    for (extent, track) in extents.iter_mut().zip(sizes) {
        if let TrackSize::Fixed(px) = *track {
            *extent = px.min(remaining);
            remaining -= *extent;
        }
    }

    let total_weight: f64 = sizes
        .iter()
        .filter_map(|s| match s {
            TrackSize::Flex(w) => Some(*w),
            TrackSize::Fixed(_) => None,
        })
        .sum();
    if total_weight > 0.0 {
        for (extent, track) in extents.iter_mut().zip(sizes) {
            if let TrackSize::Flex(w) = *track {
                *extent = remaining * w / total_weight;
            }
        }
    }

    let depth = orientation.depth_extent(size);
    let mut offset = 0.0;
    let slots = extents
        .into_iter()
        .enumerate()
        .map(|(index, extent)| {
            let rect = match orientation {
                Orientation::Vertical => Rect::new(offset, 0.0, offset + extent, depth),
                Orientation::Horizontal => Rect::new(0.0, offset, depth, offset + extent),
            };
            offset += extent;
            TrackSlot {
                index,
                rect,
                orientation,
            }
        })
        .collect();

    debug!(
        "layout {} tracks over {}x{} ({orientation:?})",
        sizes.len(),
        size.width,
        size.height
    );
    Ok(TrackLayout {
        size,
        orientation,
        slots,
    })
}
