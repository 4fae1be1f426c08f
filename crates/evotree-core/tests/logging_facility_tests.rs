#![allow(clippy::unwrap_used, clippy::expect_used)]

use evotree_core::errors::EvoTreeError;
use evotree_core::logging_facility::test_capture::{init_test_capture, BuildCounts};
use evotree_core::pack::{build_with_options, PackOptions};
use evotree_core::{log_op_end, log_op_error, log_op_start};
use evotree_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = EvoTreeError::InvalidOptions {
        reason: "max_edges must be at least 1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1);
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_INVALID_INPUT"));
    assert_eq!(error_events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_build_emits_start_and_end_with_counts() {
    let capture = init_test_capture();
    // unique root so concurrent tests do not interfere
    let root = "logging_build_root_unique_4";
    let leaves = [format!("{}a", root), format!("{}b", root)];

    build_with_options(root, leaves, &PackOptions::with_max_edges(1)).unwrap();

    let events: Vec<_> = capture
        .events_for("pack_build")
        .into_iter()
        .filter(|e| e.root.as_deref() == Some(root))
        .collect();
    assert_eq!(events.len(), 1);
    assert!(events[0].is("pack_build", EVENT_START));
    assert_eq!(events[0].leaf_count, Some(2));
    assert_eq!(events[0].counts, None);

    // end events carry counts rather than the root
    let expected = BuildCounts {
        node_count: 2,
        placed: 1,
        unplaced: 1,
    };
    assert!(
        capture.end_counts("pack_build").contains(&expected),
        "Expected an end event with node_count=2 placed=1 unplaced=1"
    );
}

#[test]
fn test_build_failure_emits_end_error() {
    let capture = init_test_capture();

    let result = build_with_options("abc", ["abcd"], &PackOptions::with_max_edges(0));
    assert!(result.is_err());

    let count = capture.count_events(|e| {
        e.is("pack_build", EVENT_END_ERROR) && e.err_code.as_deref() == Some("ERR_INVALID_INPUT")
    });
    assert!(count >= 1);
}

#[test]
fn test_build_logs_unplaced_leaf_warning() {
    let capture = init_test_capture();

    // cap 1: "ab" takes the root's only edge
    build_with_options(
        "a",
        ["ab", "ac", "awarn_unique_5"],
        &PackOptions::with_max_edges(1),
    )
    .unwrap();

    let warned: Vec<_> = capture
        .warned_leaves()
        .into_iter()
        .filter(|leaf| leaf == "awarn_unique_5")
        .collect();
    assert_eq!(warned.len(), 1);
}
