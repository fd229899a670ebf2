// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout invariants over arbitrary track lists.

use kurbo::Size;
use proptest::prelude::*;
use strata_layout::{Orientation, TrackSize, compute_layout};

fn track_size() -> impl Strategy<Value = TrackSize> {
    prop_oneof![
        (0.0..10.0_f64).prop_map(TrackSize::Flex),
        (0.0..400.0_f64).prop_map(TrackSize::Fixed),
    ]
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Vertical), Just(Orientation::Horizontal)]
}

proptest! {
    #[test]
    fn reflow_is_idempotent(
        sizes in proptest::collection::vec(track_size(), 0..12),
        w in 1.0..3_000.0_f64,
        h in 1.0..3_000.0_f64,
        orientation in orientation(),
    ) {
        let a = compute_layout(&sizes, Size::new(w, h), orientation).unwrap();
        let b = compute_layout(&sizes, Size::new(w, h), orientation).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn slots_are_contiguous_and_fit(
        sizes in proptest::collection::vec(track_size(), 1..12),
        w in 1.0..3_000.0_f64,
        h in 1.0..3_000.0_f64,
        orientation in orientation(),
    ) {
        let size = Size::new(w, h);
        let layout = compute_layout(&sizes, size, orientation).unwrap();
        let ranges = layout.track_ranges();
        prop_assert_eq!(ranges[0].start, 0.0);
        for pair in ranges.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        let end = ranges[ranges.len() - 1].end;
        prop_assert!(end <= orientation.cross_extent(size) + 1e-9);

        let has_flex = sizes.iter().any(|s| matches!(s, TrackSize::Flex(w) if *w > 0.0));
        if has_flex {
            prop_assert!((end - orientation.cross_extent(size)).abs() < 1e-6);
        }
    }
}

#[test]
fn track_sizes_deserialize_from_camel_case() {
    let sizes: Vec<TrackSize> =
        serde_json::from_str(r#"[{"flex": 2.0}, {"fixed": 120.0}]"#).unwrap();
    assert_eq!(sizes, vec![TrackSize::Flex(2.0), TrackSize::Fixed(120.0)]);
    let orientation: Orientation = serde_json::from_str(r#""horizontal""#).unwrap();
    assert_eq!(orientation, Orientation::Horizontal);
}

#[test]
fn empty_track_list_is_a_valid_layout() {
    let layout = compute_layout(&[], Size::new(100.0, 100.0), Orientation::Vertical).unwrap();
    assert!(layout.is_empty());
    assert_eq!(layout.depth_range(), 0.0..100.0);
}
