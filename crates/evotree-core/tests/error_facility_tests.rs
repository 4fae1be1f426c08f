use evotree_core::errors::{EvoTreeError, ExError, ExErrorKind};
use evotree_core::model::{Operation, OperationKind};
use evotree_core::pack::{build_with_options, EvolutionTree, PackOptions};
use evotree_core::script::{EditScript, EditStep};

#[test]
fn test_empty_insert_is_malformed_operation() {
    let err = Operation::insert("").unwrap_err();
    assert!(matches!(err, EvoTreeError::EmptyPayload { .. }));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::MalformedOperation);
    assert_eq!(ex_err.code(), "ERR_MALFORMED_OPERATION");
}

#[test]
fn test_substitution_without_arrow_is_malformed() {
    let err = Operation::from_payload(OperationKind::Substitute, "ab").unwrap_err();
    assert!(matches!(err, EvoTreeError::MalformedOperation { .. }));

    let err = "sub:b->x".parse::<Operation>().unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::MalformedOperation);
    assert!(!ex_err.kind().is_internal_defect());
}

#[test]
fn test_noop_substitution_is_rejected() {
    let err = Operation::substitute('a', 'a').unwrap_err();
    assert_eq!(err, EvoTreeError::NoOpSubstitution { ch: 'a' });
}

#[test]
fn test_misanchored_step_is_engine_drift() {
    let step = EditStep::new(Operation::delete("x").unwrap(), 0);
    let err = step.apply("axbx").unwrap_err();

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::EngineDrift);
    assert!(ex_err.kind().is_internal_defect());
    assert_eq!(ex_err.op(), Some("apply_step"));
}

#[test]
fn test_graft_with_wrong_leaf_is_engine_drift() {
    let mut tree = EvolutionTree::new("abc", 3);
    let script = EditScript::new(vec![EditStep::new(Operation::insert("d").unwrap(), 3)]);

    let err = tree.graft(tree.root_id(), &script, "abce").unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::EngineDrift);
    assert_eq!(ex_err.node(), Some("abcd"));
    assert!(ex_err.to_string().starts_with("[ERR_ENGINE_DRIFT] in operation 'graft'"));
}

#[test]
fn test_graft_past_cap_is_capacity_exhausted() {
    let mut tree = EvolutionTree::new("abc", 1);
    tree.graft(
        tree.root_id(),
        &EditScript::new(vec![EditStep::new(Operation::insert("d").unwrap(), 3)]),
        "abcd",
    )
    .unwrap();

    let err = tree
        .graft(
            tree.root_id(),
            &EditScript::new(vec![EditStep::new(Operation::insert("e").unwrap(), 3)]),
            "abce",
        )
        .unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::CapacityExhausted);
    assert_eq!(ex_err.node(), Some("abc"));
}

#[test]
fn test_invalid_options_map_to_invalid_input() {
    let err = build_with_options("abc", ["abcd"], &PackOptions::with_max_edges(0)).unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert!(ex_err.message().contains("max_edges"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::MalformedOperation, "ERR_MALFORMED_OPERATION"),
        (ExErrorKind::CapacityExhausted, "ERR_CAPACITY_EXHAUSTED"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::EngineDrift, "ERR_ENGINE_DRIFT"),
        (ExErrorKind::InvariantViolation, "ERR_INVARIANT_VIOLATION"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}
