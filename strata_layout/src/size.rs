// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Which way tracks are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Tracks side by side; depth runs top to bottom and widths are allocated.
    #[default]
    Vertical,
    /// Tracks stacked; depth runs left to right and heights are allocated.
    Horizontal,
}

impl Orientation {
    /// Extent along the axis tracks are allocated on.
    #[must_use]
    pub fn cross_extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Extent along the depth axis.
    #[must_use]
    pub fn depth_extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }
}

/// Size request of one track along the allocated axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackSize {
    /// Share of the extent left after fixed tracks, proportional to weight.
    Flex(f64),
    /// Fixed pixel size, allocated before any flex track.
    Fixed(f64),
}

impl Default for TrackSize {
    fn default() -> Self {
        Self::Flex(1.0)
    }
}

impl TrackSize {
    /// Returns `true` for [`TrackSize::Fixed`].
    #[must_use]
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub(crate) fn amount(self) -> f64 {
        match self {
            Self::Flex(v) | Self::Fixed(v) => v,
        }
    }
}
