// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::input::CompositionSample;

/// Per-key fractions at one depth.
pub type Fractions = SmallVec<[f64; 8]>;

/// How compositions are blended between sample depths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionInterpolation {
    /// Blend neighbouring compositions linearly.
    #[default]
    Linear,
    /// Snap to the nearest sample; switches halfway between samples.
    Nearest,
    /// Hold each sample until the next one.
    Step,
}

/// Per-track distribution settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DistributionOptions {
    /// Stacking order. Keys not listed here follow in order of appearance.
    pub keys: Vec<String>,
    /// Declared total, such as `100` for percentages.
    pub total: Option<f64>,
    /// Blending between samples.
    pub interpolation: DistributionInterpolation,
}

/// Fractions at one depth; they sum to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionStop {
    /// Depth of the stop.
    pub depth: f64,
    /// One fraction per key, in key order.
    pub fractions: Fractions,
}

impl DistributionStop {
    /// Running sums of the fractions, starting at 0 and ending at 1.
    #[must_use]
    pub fn cumulative(&self) -> SmallVec<[f64; 9]> {
        let mut acc = 0.0;
        let mut out = SmallVec::with_capacity(self.fractions.len() + 1);
        out.push(0.0);
        for f in &self.fractions {
            acc += f;
            out.push(acc);
        }
        out
    }
}

/// Resolved composition profile of a distribution track.
///
/// Stops are ordered by depth and the shape between two consecutive stops is
/// always linear; step and nearest policies are expressed with pairs of stops
/// at the same depth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    keys: Vec<String>,
    stops: Vec<DistributionStop>,
}

impl Distribution {
    /// Keys in stacking order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Stops in depth order.
    #[must_use]
    pub fn stops(&self) -> &[DistributionStop] {
        &self.stops
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Fractions at `depth`, or `None` outside the profile.
    #[must_use]
    pub fn at(&self, depth: f64) -> Option<Fractions> {
        let idx = self.stops.partition_point(|s| s.depth <= depth);
        let prev = self.stops.get(idx.checked_sub(1)?)?;
        let Some(next) = self.stops.get(idx) else {
            return (prev.depth == depth).then(|| prev.fractions.clone());
        };
        let t = (depth - prev.depth) / (next.depth - prev.depth);
        Some(
            prev.fractions
                .iter()
                .zip(&next.fractions)
                .map(|(a, b)| a + t * (b - a))
                .collect(),
        )
    }
}

/// Turns composition samples into a stacked profile ending at `domain_end`.
///
/// Values are clamped to be non-negative and normalized by their sum, so the
/// fractions at every stop add up to 1. A sum that strays from the declared
/// total is reported. Samples whose values are all zero are skipped.
pub fn resolve_distribution(
    samples: &[CompositionSample],
    options: &DistributionOptions,
    domain_end: f64,
    diagnostics: &mut Diagnostics,
) -> Distribution {
    let mut keys = options.keys.clone();
    for entry in samples.iter().flat_map(|s| &s.composition) {
        if !keys.contains(&entry.key) {
            keys.push(entry.key.clone());
        }
    }

    let mut points: Vec<DistributionStop> = samples
        .iter()
        .filter(|s| s.depth.is_finite())
        .filter_map(|sample| normalize(sample, &keys, options.total, diagnostics))
        .collect();
    let dropped = samples.iter().filter(|s| !s.depth.is_finite()).count();
    if dropped > 0 {
        diagnostics.push(Diagnostic::MissingDepth { dropped });
    }
    if !points.is_sorted_by(|a, b| a.depth <= b.depth) {
        points.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        diagnostics.push(Diagnostic::Unordered);
    }

    let Some(last) = points.last().cloned() else {
        return Distribution {
            keys,
            stops: Vec::new(),
        };
    };

    let mut stops = Vec::with_capacity(points.len() * 2 + 1);
    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        stops.push(a.clone());
        match options.interpolation {
            DistributionInterpolation::Linear => {}
            DistributionInterpolation::Step => stops.push(DistributionStop {
                depth: b.depth,
                fractions: a.fractions.clone(),
            }),
            DistributionInterpolation::Nearest => {
                let mid = (a.depth + b.depth) / 2.0;
                stops.push(DistributionStop {
                    depth: mid,
                    fractions: a.fractions.clone(),
                });
                stops.push(DistributionStop {
                    depth: mid,
                    fractions: b.fractions.clone(),
                });
            }
        }
    }
    stops.push(last.clone());
    if domain_end > last.depth {
        stops.push(DistributionStop {
            depth: domain_end,
            fractions: last.fractions,
        });
    }
    Distribution { keys, stops }
}

fn normalize(
    sample: &CompositionSample,
    keys: &[String],
    total: Option<f64>,
    diagnostics: &mut Diagnostics,
) -> Option<DistributionStop> {
    let mut values: Fractions = keys.iter().map(|_| 0.0).collect();
    for entry in &sample.composition {
        let value = if entry.value >= 0.0 && entry.value.is_finite() {
            entry.value
        } else {
            diagnostics.push(Diagnostic::NegativeFraction {
                depth: sample.depth,
                key: entry.key.clone(),
                value: entry.value,
            });
            0.0
        };
        if let Some(slot) = keys.iter().position(|k| *k == entry.key) {
            values[slot] += value;
        }
    }

    let sum: f64 = values.iter().sum();
    if sum <= 0.0 {
        diagnostics.push(Diagnostic::EmptyComposition {
            depth: sample.depth,
        });
        return None;
    }
    if let Some(total) = total {
        if (sum - total).abs() > 1e-6 * total.abs().max(1.0) {
            diagnostics.push(Diagnostic::Renormalized {
                depth: sample.depth,
                sum,
                total,
            });
        }
    }
    for v in &mut values {
        *v /= sum;
    }
    Some(DistributionStop {
        depth: sample.depth,
        fractions: values,
    })
}
