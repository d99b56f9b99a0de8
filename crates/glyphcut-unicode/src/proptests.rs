// this_file: crates/glyphcut-unicode/src/proptests.rs

use std::sync::Arc;

use glyphcut_core::types::{BaseDirection, VisualOrder};
use proptest::prelude::*;

use super::*;

fn reorderer() -> BidiReorderer {
    BidiReorderer::new(Arc::new(UnicodeBidiEngine::new()))
}

/// Short texts mixing strong LTR, strong RTL, numbers, neutrals and newlines
fn mixed_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            'a', 'Z', ' ', '1', '2', '.', '(', ')', 'ש', 'ל', 'ם', 'م', 'ر', '\n',
        ]),
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn direction() -> impl Strategy<Value = BaseDirection> {
    prop_oneof![
        Just(BaseDirection::Ltr),
        Just(BaseDirection::Rtl),
        Just(BaseDirection::Auto),
    ]
}

// Property: the visual order is always a permutation of the characters
proptest! {
    #[test]
    fn prop_order_is_permutation(text in mixed_text(), dir in direction()) {
        let reordering = reorderer().reorder(&text, dir);
        prop_assert_eq!(reordering.order.len(), text.chars().count());
        prop_assert!(VisualOrder::from_permutation(reordering.order.as_slice().to_vec()).is_some());
        prop_assert!(reordering.warning.is_none());
    }
}

// Property: inverting twice gives back the same permutation
proptest! {
    #[test]
    fn prop_inverse_round_trip(text in mixed_text(), dir in direction()) {
        let order = reorderer().reorder(&text, dir).order;
        let back = VisualOrder::from_inverse(&order.inverse());
        prop_assert_eq!(back, Some(order));
    }
}

// Property: reordering is deterministic
proptest! {
    #[test]
    fn prop_reorder_deterministic(text in mixed_text(), dir in direction()) {
        let first = reorderer().reorder(&text, dir);
        let second = reorderer().reorder(&text, dir);
        prop_assert_eq!(first, second);
    }
}

// Property: left-to-right-only text in an LTR paragraph is never reordered
proptest! {
    #[test]
    fn prop_ltr_text_is_identity(text in "[a-zA-Z0-9 .,]{0,40}") {
        let reordering = reorderer().reorder(&text, BaseDirection::Ltr);
        prop_assert!(reordering.order.is_identity());
        prop_assert!(reordering.segments.is_empty());
    }
}

// Property: with only levels 0 and 1, reapplying the segments restores logical order
proptest! {
    #[test]
    fn prop_single_level_segments_are_involutive(
        chars in prop::collection::vec(prop::sample::select(vec!['a', 'b', ' ', 'ש', 'ל']), 0..30)
    ) {
        let text: String = chars.into_iter().collect();
        let reordering = reorderer().reorder(&text, BaseDirection::Ltr);
        prop_assert!(reordering.levels.iter().all(|&level| level <= 1));

        let mut order = reordering.order.clone();
        for &segment in &reordering.segments {
            prop_assert!(order.reverse_segment(segment));
        }
        prop_assert!(order.is_identity());
    }
}

// Property: newlines stay put and every other character lands in exactly one run
proptest! {
    #[test]
    fn prop_runs_partition_lines(text in mixed_text(), dir in direction()) {
        let chars: Vec<char> = text.chars().collect();
        let reordering = reorderer().reorder(&text, dir);

        for (index, &ch) in chars.iter().enumerate() {
            if ch == '\n' {
                prop_assert_eq!(reordering.order.logical_at(index), Some(index));
            }
        }

        let mut covered = vec![0usize; chars.len()];
        for run in &reordering.runs {
            for index in run.range() {
                covered[index] += 1;
            }
        }
        for (index, &ch) in chars.iter().enumerate() {
            let expected = if ch == '\n' { 0 } else { 1 };
            prop_assert_eq!(covered[index], expected);
        }
    }
}
