// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Layout: partitions a viewer among an ordered list of tracks.
//!
//! Every track asks for either a fixed pixel size or a flex weight along the
//! allocated axis (widths in a [vertical](Orientation::Vertical) viewer,
//! heights in a [horizontal](Orientation::Horizontal) one). [`compute_layout`]
//! is a pure function of its inputs; a container without a measurable size
//! yields [`LayoutError::NotReady`] so the host can retry after a resize.
//!
//! ```rust
//! use kurbo::Size;
//! use strata_layout::{Orientation, TrackSize, compute_layout};
//!
//! let tracks = [TrackSize::Fixed(60.0), TrackSize::Flex(1.0), TrackSize::Flex(2.0)];
//! let layout = compute_layout(&tracks, Size::new(360.0, 800.0), Orientation::Vertical)?;
//! assert_eq!(layout.track_ranges(), vec![0.0..60.0, 60.0..160.0, 160.0..360.0]);
//! # Ok::<(), strata_layout::LayoutError>(())
//! ```

mod layout;
mod size;

pub use layout::{LayoutError, TrackLayout, TrackSlot, compute_layout};
pub use size::{Orientation, TrackSize};
