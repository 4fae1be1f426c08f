//! Property-based laws for the edit-script engine.
//!
//! For any pair of strings:
//!
//! 1. Replaying the script on the source gives the target.
//! 2. Identical strings give the empty script.
//! 3. Empty source or target gives a single insert or delete.
//! 4. Every payload is non-empty and no substitution is a no-op.
//! 5. Insertions come last, as at most one merged run at the end.
//! 6. Script-adjacent deletions never touch in the source.
//! 7. The script is never longer than the source plus one.

use evotree_core::model::Operation;
use evotree_core::script::compute_script;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Small alphabet so matches, skips and duplicates are common
fn word() -> impl Strategy<Value = String> {
    "[abcx]{0,8}"
}

fn any_word() -> impl Strategy<Value = String> {
    "\\PC{0,6}"
}

proptest! {
    #[test]
    fn script_replays_source_into_target(source in word(), target in word()) {
        let script = compute_script(&source, &target);
        prop_assert_eq!(script.apply(&source).unwrap(), target);
    }

    #[test]
    fn script_replays_arbitrary_unicode(source in any_word(), target in any_word()) {
        let script = compute_script(&source, &target);
        prop_assert_eq!(script.apply(&source).unwrap(), target);
    }

    #[test]
    fn identical_strings_need_no_edits(value in any_word()) {
        prop_assert!(compute_script(&value, &value).is_empty());
    }

    #[test]
    fn empty_sides_give_one_run(value in "[abcx]{1,8}") {
        prop_assert_eq!(
            compute_script("", &value).to_operations(),
            vec![Operation::Insert { text: value.clone() }]
        );
        prop_assert_eq!(
            compute_script(&value, "").to_operations(),
            vec![Operation::Delete { text: value.clone() }]
        );
    }

    #[test]
    fn payloads_are_well_formed(source in word(), target in word()) {
        for op in compute_script(&source, &target).operations() {
            match op {
                Operation::Insert { text } | Operation::Delete { text } => {
                    prop_assert!(!text.is_empty(), "empty payload in {:?}", op);
                }
                Operation::Substitute { from, to } => {
                    prop_assert_ne!(from, to);
                }
            }
        }
    }

    #[test]
    fn insertions_are_one_trailing_run(source in word(), target in word()) {
        let script = compute_script(&source, &target);
        let inserts: Vec<usize> = script
            .iter()
            .enumerate()
            .filter(|(_, step)| matches!(step.op, Operation::Insert { .. }))
            .map(|(i, _)| i)
            .collect();

        prop_assert!(inserts.len() <= 1);
        if let Some(&i) = inserts.first() {
            prop_assert_eq!(i, script.len() - 1);
        }
    }

    #[test]
    fn adjacent_deletions_are_separated(source in word(), target in word()) {
        let script = compute_script(&source, &target);
        for pair in script.steps().windows(2) {
            if let (Operation::Delete { .. }, Operation::Delete { .. }) = (&pair[0].op, &pair[1].op) {
                // a contiguous second run would sit at the first run's anchor
                prop_assert!(pair[1].at > pair[0].at, "unmerged runs: {:?}", pair);
            }
        }
    }

    #[test]
    fn script_length_is_bounded(source in word(), target in word()) {
        let script = compute_script(&source, &target);
        prop_assert!(script.len() <= source.chars().count() + 1);
    }
}
