// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::input::{RowValue, TrackData};
use crate::resolve::Resolved;
use crate::series::{DataSeries, Sample};

/// Why an accessor could not extract series from track data.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AccessError {
    /// Columnar data has no column of this name.
    #[error("no column named `{0}`")]
    MissingColumn(String),
    /// The data is not of the shape the accessor reads.
    #[error("accessor reads {expected} data, got {found} data")]
    Shape {
        /// Shape the accessor reads.
        expected: &'static str,
        /// Shape of the data it was given.
        found: &'static str,
    },
}

type AccessFn = dyn Fn(&TrackData, &mut Diagnostics) -> Result<Resolved, AccessError>;

/// Pure function from raw track data to one or two series.
///
/// Accessors must not close over mutable shared state; the same data always
/// resolves to the same series.
#[derive(Clone)]
pub struct DataAccessor(Rc<AccessFn>);

impl fmt::Debug for DataAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataAccessor").finish_non_exhaustive()
    }
}

impl DataAccessor {
    /// Wraps an arbitrary accessor function.
    pub fn new(
        f: impl Fn(&TrackData, &mut Diagnostics) -> Result<Resolved, AccessError> + 'static,
    ) -> Self {
        Self(Rc::new(f))
    }

    /// Runs the accessor.
    pub fn call(
        &self,
        data: &TrackData,
        diagnostics: &mut Diagnostics,
    ) -> Result<Resolved, AccessError> {
        (self.0)(data, diagnostics)
    }

    /// Reads one column of columnar data.
    pub fn column(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |data, diagnostics| {
            column(data, &name, diagnostics).map(Resolved::Single)
        })
    }

    /// Reads two columns of columnar data, for differential plots.
    pub fn column_pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        let (first, second) = (first.into(), second.into());
        Self::new(move |data, diagnostics| {
            Ok(Resolved::Pair(
                column(data, &first, diagnostics)?,
                column(data, &second, diagnostics)?,
            ))
        })
    }

    /// Reads `depth_key`/`value_key` fields of row objects.
    ///
    /// Rows without a numeric depth are dropped; rows without a numeric value
    /// become gaps.
    pub fn row_fields(depth_key: impl Into<String>, value_key: impl Into<String>) -> Self {
        let (depth_key, value_key) = (depth_key.into(), value_key.into());
        Self::new(move |data, diagnostics| {
            row_series(data, &depth_key, &value_key, diagnostics).map(Resolved::Single)
        })
    }

    /// Reads two value fields of row objects against a shared depth field.
    pub fn row_field_pair(
        depth_key: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        let (depth_key, first, second) = (depth_key.into(), first.into(), second.into());
        Self::new(move |data, diagnostics| {
            Ok(Resolved::Pair(
                row_series(data, &depth_key, &first, diagnostics)?,
                row_series(data, &depth_key, &second, diagnostics)?,
            ))
        })
    }
}

fn column(
    data: &TrackData,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Result<DataSeries, AccessError> {
    let TrackData::Columnar(columns) = data else {
        return Err(AccessError::Shape {
            expected: "columnar",
            found: data.shape_name(),
        });
    };
    let pairs = columns
        .get(name)
        .ok_or_else(|| AccessError::MissingColumn(name.to_owned()))?;
    Ok(DataSeries::from_pairs(pairs, diagnostics))
}

fn row_series(
    data: &TrackData,
    depth_key: &str,
    value_key: &str,
    diagnostics: &mut Diagnostics,
) -> Result<DataSeries, AccessError> {
    let TrackData::Rows(rows) = data else {
        return Err(AccessError::Shape {
            expected: "row",
            found: data.shape_name(),
        });
    };
    let samples = rows
        .iter()
        .map(|row| Sample {
            depth: row
                .get(depth_key)
                .and_then(RowValue::as_f64)
                .unwrap_or(f64::NAN),
            value: row
                .get(value_key)
                .and_then(RowValue::as_f64)
                .unwrap_or(f64::NAN),
        })
        .collect();
    Ok(DataSeries::new(samples, diagnostics))
}
