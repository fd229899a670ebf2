// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Data: turns raw track data into what plots draw.
//!
//! Hosts hand each track a [`TrackData`] value in one of a few contract
//! shapes: ordered `[depth, value]` pairs, a keyed (columnar) object of such
//! arrays, boundary points for stacked tracks, composition samples for
//! distribution tracks or dip samples for tadpole plots. Anything else, row
//! objects included, needs a [`DataAccessor`].
//!
//! - [`resolve`] produces a [`Resolved`] value (one series, a pair, or dips)
//!   for one plot.
//! - [`resolve_intervals`] pairs boundary points into contiguous
//!   [`Interval`]s.
//! - [`resolve_distribution`] normalizes compositions into a stacked
//!   [`Distribution`] profile.
//! - [`ResolutionCache`] keeps results until the data generation changes.
//!
//! Nothing here fails on bad data: shape problems degrade the affected plot to
//! an empty result and are recorded as [`Diagnostic`]s (and logged).
//!
//! ```rust
//! use strata_data::{DataAccessor, Diagnostics, Expected, Resolved, TrackData, resolve};
//!
//! let data: TrackData = serde_json::from_str(r#"{"GR": [[0, 45], [0.5, null], [1, 60]]}"#)?;
//! let mut diagnostics = Diagnostics::new();
//! let resolved = resolve(&data, Some(&DataAccessor::column("GR")), Expected::Single, &mut diagnostics);
//! let Resolved::Single(gr) = resolved else { unreachable!() };
//! assert_eq!(gr.runs().count(), 2);
//! assert!(diagnostics.is_empty());
//! # Ok::<(), serde_json::Error>(())
//! ```

mod accessor;
mod cache;
mod color;
mod diagnostics;
mod distribution;
mod input;
mod interval;
mod resolve;
mod series;

pub use accessor::{AccessError, DataAccessor};
pub use cache::ResolutionCache;
pub use color::{ColorSpec, IntervalColor};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use distribution::{
    Distribution, DistributionInterpolation, DistributionOptions, DistributionStop, Fractions,
    resolve_distribution,
};
pub use input::{
    BoundaryPoint, CompositionEntry, CompositionSample, DipSample, DipShape, RawPair, RowValue,
    TrackData,
};
pub use interval::{Interval, resolve_intervals};
pub use resolve::{Dip, Expected, Resolved, resolve, resolve_dips};
pub use series::{DataSeries, Sample, visible_span};
