// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Viewer: a headless multi-track depth viewer.
//!
//! [`Viewer`] ties the other Strata crates together: a master depth scale
//! (and optional slave), an ordered list of tracks built from a typed
//! [`ViewerConfig`], the current layout, and the outward [`ViewerEvent`]s a
//! host overlay needs. It draws nothing itself; [`Viewer::render`] returns a
//! [`Scene`] of backend-agnostic primitives.
//!
//! The engine is single-threaded and driven by the host's event loop:
//!
//! - Raw input goes through an [`InteractionController`], the only path that
//!   zooms or pans.
//! - Resizes, track changes and new data only mark [`Invalidation`] bits;
//!   [`Viewer::frame`] runs the pending work once per animation frame.
//! - Interval data for stacked tracks can arrive asynchronously through
//!   [`Viewer::request_intervals`]. Each request gets a token and only the
//!   latest one per track is applied; removing a track aborts its fetch.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use strata_viewer::{AccessorRegistry, InteractionController, Viewer, ViewerConfig, ViewerEvent};
//!
//! let config: ViewerConfig = serde_json::from_str(
//!     r##"{
//!         "domain": [1000, 2000],
//!         "tracks": [
//!             {"id": "depth", "kind": "scale", "maxWidth": 60},
//!             {"id": "gr", "domain": [0, 150],
//!              "data": [[1000, 40], [1500, 90], [2000, 60]],
//!              "plots": [{"id": "gr", "type": "line", "options": {"color": "#2a7"}}]}
//!         ]
//!     }"##,
//! )
//! .unwrap();
//! let mut viewer = Viewer::new(config, AccessorRegistry::new()).unwrap();
//! assert!(viewer.render().is_err());
//!
//! viewer.resize(Size::new(300.0, 500.0));
//! viewer.frame();
//! let scene = viewer.render().unwrap();
//! assert_eq!(scene.tracks.len(), 2);
//!
//! let mut input = InteractionController::new();
//! let depth = input.pointer_move(&mut viewer, Point::new(150.0, 250.0));
//! assert_eq!(depth, Some(1500.0));
//! assert!(viewer
//!     .drain_events()
//!     .any(|e| matches!(e, ViewerEvent::Resize { .. })));
//! ```

mod config;
mod error;
mod event;
mod interaction;
mod registry;
mod request;
mod schedule;
mod track;
mod viewer;

pub use config::{PlotConfig, PlotOptions, PlotType, TrackConfig, TrackKindConfig, ViewerConfig};
pub use error::{ConfigError, ViewerError};
pub use event::{Scene, TrackScene, ViewerEvent};
pub use interaction::InteractionController;
pub use registry::AccessorRegistry;
pub use request::{IntervalResponse, RequestToken};
pub use schedule::{FrameReport, Invalidation};
pub use track::{PlotReadout, Track, TrackKind, TrackValue};
pub use viewer::{TrackReadout, Viewer};
