// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Plot: geometry for well-log plots.
//!
//! Every renderer is a pure function of resolved data, a coordinate frame and
//! a style, returning a list of backend-agnostic [`Primitive`]s in pixel
//! space. Nothing here holds state or talks to a graphics API; a host walks
//! the primitives and paints them with whatever it has.
//!
//! - [`PlotFrame`] binds the shared depth axis to a track's value scale.
//! - [`Plot`] pairs a [`PlotKind`] (line, area, dot, differential, step or
//!   dip) with an optional accessor, value scale and legend, and dispatches to
//!   the matching renderer.
//! - [`TrackFrame`] and the track renderers ([`render_intervals`],
//!   [`render_distribution`], [`render_ticks`]) cover whole-track content.
//!
//! Renderers only visit samples inside the visible depth window (plus one on
//! each side), found by binary search.
//!
//! ```rust
//! use strata_layout::Orientation;
//! use strata_plot::{LineStyle, Plot, PlotFrame, PlotKind};
//! use strata_scale::{Domain, Scale, ScaleHandler, ScaleKind};
//!
//! let mut depth = ScaleHandler::new(ScaleKind::Linear, Domain::linear(1000.0, 2000.0)?)?;
//! depth.set_range(0.0..500.0)?;
//! let gr = Scale::linear(Domain::linear(0.0, 150.0)?, 0.0..100.0)?;
//! let frame = PlotFrame::new(&depth, &gr, Orientation::Vertical);
//!
//! let plot = Plot::new("gr", PlotKind::Line(LineStyle::default()));
//! let data = strata_data::TrackData::series([(1000.0, 30.0), (1500.0, 75.0), (2000.0, 120.0)]);
//! let mut diagnostics = strata_data::Diagnostics::new();
//! let resolved = plot.resolve(&data, &mut diagnostics);
//! assert_eq!(plot.render(&resolved, &frame).len(), 1);
//! # Ok::<(), strata_scale::ScaleError>(())
//! ```

mod curve;
mod differential;
mod dip;
mod frame;
mod plot;
mod primitive;
mod track;

pub use curve::{AreaStyle, DotStyle, render_area, render_dots, render_line, render_step};
pub use differential::{
    CrossPoint, DifferentialRegion, DifferentialStyle, differential_regions, render_differential,
    visible_differential_regions,
};
pub use dip::{DipStyle, render_dips, tail_direction};
pub use frame::{PlotFrame, TrackFrame};
pub use plot::{LegendInfo, Plot, PlotKind, Readout};
pub use primitive::{LineStyle, Primitive};
pub use track::{
    FALLBACK_KEY_COLOR, TickStyle, render_distribution, render_intervals, render_ticks, tick_label,
};
