// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Clamp behavior for zooming and panning relative to the configured domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClampMode {
    /// Do not apply any clamping; the view may move/zoom freely.
    None,
    /// Allow overscroll, but never move the domain completely out of view.
    KeepSomeVisible,
    /// Keep the visible domain inside the configured domain.
    ///
    /// Zooming out never goes past the full domain and panning stops at its
    /// ends.
    #[default]
    Contain,
}

/// Which side of a master/slave pair a viewer speaks in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Depths are expressed in the master's own units.
    #[default]
    Master,
    /// Depths are expressed in interpolated (slave) units.
    Slave,
}
