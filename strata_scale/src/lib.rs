// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Scale: depth-domain to pixel-range mapping with zoom and pan.
//!
//! This crate models the depth axis shared by every track of a well-log
//! viewer. It provides:
//! - [`Domain`]: validated, monotonic breakpoints (simple, piecewise or
//!   inverted).
//! - [`Scale`]: the static (unzoomed) mapping, linear, piecewise-linear or
//!   logarithmic.
//! - [`ScaleHandler`]: the authoritative (master) state, a [`Scale`] composed
//!   with a [`ZoomTransform`], plus zoom/pan/reset operations and a revision
//!   counter.
//! - [`Interpolator`] and [`SlaveScale`]: a second unit system derived from
//!   the master through a forward/reverse pair.
//! - [`DepthAxis`]: the read-only view renderers and pointer readouts use.
//!
//! It does **not** render or own any tracks. All mapping functions are total:
//! out-of-domain depths and out-of-range pixels extrapolate instead of
//! failing, and configuration errors surface as [`ScaleError`] at setup time.
//!
//! ## Minimal example
//!
//! ```rust
//! use strata_scale::{Domain, ScaleHandler, ScaleKind};
//!
//! let mut depth = ScaleHandler::new(ScaleKind::Linear, Domain::linear(0.0, 1000.0)?)?;
//! depth.set_range(0.0..500.0)?;
//! assert_eq!(depth.transform(500.0), 250.0);
//!
//! // Zoom in 4x around pixel 100; the depth under it stays put.
//! let before = depth.invert(100.0);
//! depth.zoom_by(4.0, 100.0);
//! assert!((depth.invert(100.0) - before).abs() < 1e-9);
//! # Ok::<(), strata_scale::ScaleError>(())
//! ```
//!
//! ## Master and slave units
//!
//! ```rust
//! use strata_scale::{DepthAxis, Domain, Interpolator, ScaleHandler, ScaleKind, SlaveScale};
//!
//! let mut md = ScaleHandler::new(ScaleKind::Linear, Domain::linear(0.0, 1000.0)?)?;
//! md.set_range(0.0..400.0)?;
//! md.set_interpolator(Interpolator::linear(0.9, 25.0))?;
//!
//! let mut tvd = SlaveScale::follow(&md)?;
//! md.zoom_by(2.0, 0.0);
//! tvd.sync(&md);
//! assert!((tvd.transform(0.9 * 250.0 + 25.0) - md.transform(250.0)).abs() < 1e-9);
//! # Ok::<(), strata_scale::ScaleError>(())
//! ```

mod domain;
mod error;
mod handler;
mod interpolate;
mod modes;
mod scale;
mod zoom;

pub use domain::{Domain, ScaleKind};
pub use error::ScaleError;
pub use handler::{DepthAxis, ScaleDebugInfo, ScaleHandler, ScaleState, nice_ticks};
pub use interpolate::{Interpolator, SlaveScale};
pub use modes::{ClampMode, ScaleMode};
pub use scale::Scale;
pub use zoom::ZoomTransform;
