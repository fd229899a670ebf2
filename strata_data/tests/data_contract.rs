// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the host data contract: shape detection, intervals and
//! compositions.

use proptest::prelude::*;
use strata_data::{
    BoundaryPoint, ColorSpec, CompositionEntry, CompositionSample, Diagnostics,
    DistributionInterpolation, DistributionOptions, TrackData, resolve_distribution,
    resolve_intervals,
};

#[test]
fn contract_shapes_are_detected() {
    let cases = [
        ("[[0, 1], [1, 2]]", "series"),
        (r#"{"GR": [[0, 1]], "NPHI": []}"#, "columnar"),
        (r#"[{"depth": 0, "color": {"r": 1, "g": 2, "b": 3}, "label": "A"}]"#, "boundary"),
        (r#"[{"depth": 0, "composition": [{"key": "sand", "value": 80}]}]"#, "composition"),
        (r#"[{"depth": 0, "dip": 10, "azimuth": 30}]"#, "dip"),
        (r#"[{"md": 0, "gr": 45.5, "facies": "sand"}]"#, "row"),
        ("[]", "series"),
    ];
    for (json, shape) in cases {
        let data: TrackData = serde_json::from_str(json).unwrap();
        assert_eq!(data.shape_name(), shape, "{json}");
    }
}

#[test]
fn sand_shale_split_fills_the_full_width() {
    let samples: Vec<CompositionSample> = serde_json::from_str(
        r#"[{"depth": 100, "composition": [{"key": "sand", "value": 80}, {"key": "shale", "value": 20}]}]"#,
    )
    .unwrap();
    let options = DistributionOptions {
        keys: vec!["sand".into(), "shale".into()],
        total: Some(100.0),
        interpolation: DistributionInterpolation::Linear,
    };
    let mut diagnostics = Diagnostics::new();
    let dist = resolve_distribution(&samples, &options, 200.0, &mut diagnostics);
    let width = 120.0;
    let bands: Vec<f64> = dist.stops()[0]
        .fractions
        .iter()
        .map(|f| f * width)
        .collect();
    assert_eq!(bands, vec![96.0, 24.0]);
    assert_eq!(bands.iter().sum::<f64>(), width);
    assert!(diagnostics.is_empty());
}

#[test]
fn distribution_options_deserialize() {
    let options: DistributionOptions =
        serde_json::from_str(r#"{"keys": ["sand"], "interpolation": "step"}"#).unwrap();
    assert_eq!(options.interpolation, DistributionInterpolation::Step);
    assert_eq!(options.total, None);
}

fn boundary_points() -> impl Strategy<Value = Vec<BoundaryPoint>> {
    proptest::collection::vec((-1_000.0..1_000.0_f64, 0_u8..=255), 0..20).prop_map(|raw| {
        raw.into_iter()
            .map(|(depth, shade)| BoundaryPoint {
                depth,
                color: ColorSpec::Components(vec![f64::from(shade), 0.0, 0.0]),
                label: None,
            })
            .collect()
    })
}

fn composition_samples() -> impl Strategy<Value = Vec<CompositionSample>> {
    proptest::collection::vec(
        (0.0..500.0_f64, proptest::collection::vec(0.0..100.0_f64, 3)),
        1..12,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(depth, values)| CompositionSample {
                depth,
                composition: ["sand", "shale", "lime"]
                    .iter()
                    .zip(values)
                    .map(|(key, value)| CompositionEntry {
                        key: (*key).to_owned(),
                        value,
                    })
                    .collect(),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn intervals_are_contiguous_and_cover_the_track(points in boundary_points()) {
        let domain_max = 2_000.0;
        let intervals = resolve_intervals(&points, domain_max, &mut Diagnostics::new());
        if points.len() < 2 {
            prop_assert!(intervals.is_empty());
        } else {
            prop_assert_eq!(intervals.len(), points.len());
            let first = points.iter().map(|p| p.depth).fold(f64::INFINITY, f64::min);
            prop_assert_eq!(intervals[0].from, first);
            prop_assert_eq!(intervals[intervals.len() - 1].to, domain_max);
            for pair in intervals.windows(2) {
                prop_assert_eq!(pair[0].to, pair[1].from);
                prop_assert!(pair[0].from <= pair[0].to);
            }
        }
    }

    #[test]
    fn every_stop_sums_to_one(
        samples in composition_samples(),
        policy in prop_oneof![
            Just(DistributionInterpolation::Linear),
            Just(DistributionInterpolation::Nearest),
            Just(DistributionInterpolation::Step),
        ],
    ) {
        let options = DistributionOptions { interpolation: policy, ..DistributionOptions::default() };
        let dist = resolve_distribution(&samples, &options, 600.0, &mut Diagnostics::new());
        for stop in dist.stops() {
            let sum: f64 = stop.fractions.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9, "{sum}");
            prop_assert!(stop.fractions.iter().all(|f| *f >= 0.0));
        }
        for pair in dist.stops().windows(2) {
            prop_assert!(pair[0].depth <= pair[1].depth);
        }
    }
}
