// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Master/slave depth unit conversion.

use core::fmt;
use core::ops::Range;
use std::rc::Rc;

use log::debug;

use crate::handler::{DepthAxis, ScaleHandler, ScaleState};
use crate::{Domain, ScaleError};

type Mapping = Rc<dyn Fn(f64) -> f64>;

/// Forward/reverse pair converting master depths into slave depths.
///
/// The pair must be mutually inverse across the master domain:
/// `reverse(forward(x)) == x`. [`ScaleHandler::set_interpolator`] probes this
/// before accepting an interpolator.
#[derive(Clone)]
pub struct Interpolator {
    forward: Mapping,
    reverse: Mapping,
}

impl fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpolator").finish_non_exhaustive()
    }
}

impl Interpolator {
    /// Wraps a forward (master to slave) and reverse (slave to master) mapping.
    pub fn new(
        forward: impl Fn(f64) -> f64 + 'static,
        reverse: impl Fn(f64) -> f64 + 'static,
    ) -> Self {
        Self {
            forward: Rc::new(forward),
            reverse: Rc::new(reverse),
        }
    }

    /// `slave = master * factor + offset`.
    ///
    /// A zero factor has no inverse and fails verification.
    #[must_use]
    pub fn linear(factor: f64, offset: f64) -> Self {
        Self::new(
            move |x| x * factor + offset,
            move |y| (y - offset) / factor,
        )
    }

    /// Master depth to slave depth.
    #[must_use]
    pub fn forward(&self, master: f64) -> f64 {
        (self.forward)(master)
    }

    /// Slave depth to master depth.
    #[must_use]
    pub fn reverse(&self, slave: f64) -> f64 {
        (self.reverse)(slave)
    }

    /// Maps both ends of a master-unit domain into slave units.
    #[must_use]
    pub fn forward_interpolated_domain(&self, master: Range<f64>) -> Range<f64> {
        self.forward(master.start)..self.forward(master.end)
    }

    /// Maps both ends of a slave-unit domain into master units.
    #[must_use]
    pub fn reverse_interpolated_domain(&self, slave: Range<f64>) -> Range<f64> {
        self.reverse(slave.start)..self.reverse(slave.end)
    }

    /// Probes every breakpoint plus evenly spaced points inside each segment.
    pub fn verify(&self, domain: &Domain) -> Result<(), ScaleError> {
        const PROBES_PER_SEGMENT: usize = 8;

        let breakpoints = domain.breakpoints();
        let probes = breakpoints.windows(2).flat_map(|pair| {
            (0..PROBES_PER_SEGMENT)
                .map(move |i| pair[0] + (pair[1] - pair[0]) * i as f64 / PROBES_PER_SEGMENT as f64)
        });
        for value in probes.chain(breakpoints.last().copied()) {
            let back = self.reverse(self.forward(value));
            let tolerance = 1e-9 * value.abs().max(1.0);
            if !((back - value).abs() <= tolerance) {
                return Err(ScaleError::RoundTrip { value, back });
            }
        }
        Ok(())
    }
}

/// Scale whose state is derived from a master [`ScaleHandler`].
///
/// A slave has no zoom or pan API of its own; [`SlaveScale::sync`] is the only
/// way its state changes. Between syncs it keeps answering from the snapshot
/// taken at the last sync.
#[derive(Clone, Debug)]
pub struct SlaveScale {
    interpolator: Interpolator,
    state: ScaleState,
    synced_revision: u64,
}

impl SlaveScale {
    /// Derives a slave from `master`, which must carry an interpolator.
    pub fn follow(master: &ScaleHandler) -> Result<Self, ScaleError> {
        let interpolator = master
            .interpolator()
            .cloned()
            .ok_or(ScaleError::MissingInterpolator)?;
        Ok(Self {
            interpolator,
            state: master.state().clone(),
            synced_revision: master.revision(),
        })
    }

    /// Re-derives state from `master` if it changed since the last sync.
    ///
    /// Returns `true` if anything was updated.
    pub fn sync(&mut self, master: &ScaleHandler) -> bool {
        if master.revision() == self.synced_revision {
            return false;
        }
        if let Some(interpolator) = master.interpolator() {
            self.interpolator = interpolator.clone();
        }
        self.state = master.state().clone();
        self.synced_revision = master.revision();
        debug!(
            "slave scale synced to master revision {}",
            self.synced_revision
        );
        true
    }

    /// Returns `true` if no master change happened since the last sync.
    #[must_use]
    pub fn is_synced_with(&self, master: &ScaleHandler) -> bool {
        self.synced_revision == master.revision()
    }

    /// Master revision this slave was last synced to.
    #[must_use]
    pub fn synced_revision(&self) -> u64 {
        self.synced_revision
    }

    /// The interpolator in use.
    #[must_use]
    pub fn interpolator(&self) -> &Interpolator {
        &self.interpolator
    }

    /// Full (unzoomed) domain in slave units.
    #[must_use]
    pub fn domain(&self) -> Range<f64> {
        self.interpolator
            .forward_interpolated_domain(self.state.scale().domain().span())
    }
}

impl DepthAxis for SlaveScale {
    fn transform(&self, depth: f64) -> f64 {
        self.state.transform(self.interpolator.reverse(depth))
    }

    fn invert(&self, pixel: f64) -> f64 {
        self.interpolator.forward(self.state.invert(pixel))
    }

    fn visible_domain(&self) -> Range<f64> {
        self.interpolator
            .forward_interpolated_domain(self.state.visible_domain())
    }

    fn pixel_range(&self) -> Range<f64> {
        self.state.pixel_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScaleKind;

    fn master() -> ScaleHandler {
        let mut h =
            ScaleHandler::new(ScaleKind::Linear, Domain::linear(1000.0, 2000.0).unwrap()).unwrap();
        h.set_range(0.0..1000.0).unwrap();
        h.set_interpolator(Interpolator::linear(0.5, -100.0)).unwrap();
        h
    }

    #[test]
    fn slave_domain_is_forward_interpolated() {
        let h = master();
        let slave = SlaveScale::follow(&h).unwrap();
        assert_eq!(slave.domain(), 400.0..900.0);
        assert_eq!(h.forward_interpolated_domain().unwrap(), 400.0..900.0);
        assert_eq!(h.reverse_interpolated_domain(400.0..900.0).unwrap(), 1000.0..2000.0);
    }

    #[test]
    fn slave_and_master_share_pixels() {
        let h = master();
        let slave = SlaveScale::follow(&h).unwrap();
        // Master depth 1500 is slave depth 650.
        assert!((slave.transform(650.0) - h.transform(1500.0)).abs() < 1e-9);
        assert!((slave.invert(500.0) - 650.0).abs() < 1e-9);
    }

    #[test]
    fn slave_follows_master_zoom_only_after_sync() {
        let mut h = master();
        let mut slave = SlaveScale::follow(&h).unwrap();
        h.zoom_by(2.0, 0.0);
        assert!(!slave.is_synced_with(&h));
        assert_eq!(slave.visible_domain(), 400.0..900.0);
        assert!(slave.sync(&h));
        assert!(!slave.sync(&h));
        let visible = slave.visible_domain();
        assert!((visible.start - 400.0).abs() < 1e-9);
        assert!((visible.end - 650.0).abs() < 1e-9);
    }

    #[test]
    fn follow_requires_an_interpolator() {
        let h = ScaleHandler::new(ScaleKind::Linear, Domain::linear(0.0, 1.0).unwrap()).unwrap();
        assert_eq!(
            SlaveScale::follow(&h).unwrap_err(),
            ScaleError::MissingInterpolator
        );
    }

    #[test]
    fn non_invertible_interpolator_is_rejected() {
        let mut h = master();
        let before = h.revision();
        let err = h.set_interpolator(Interpolator::new(|x| x * x, |y| y)).unwrap_err();
        assert!(matches!(err, ScaleError::RoundTrip { .. }));
        assert!(h.set_interpolator(Interpolator::linear(0.0, 1.0)).is_err());
        assert_eq!(h.revision(), before);
    }
}
