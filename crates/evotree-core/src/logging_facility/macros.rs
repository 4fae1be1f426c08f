//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.
//! Every event carries `component`, `op` and `event` fields; end events add
//! `duration_ms`, error events add `err_kind` and `err_code`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use evotree_core::log_op_start;
/// log_op_start!("pack_build");
/// log_op_start!("pack_build", root = "abc", leaf_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// The `tree = ` form summarises an [`EvolutionTree`](crate::pack::EvolutionTree)
/// as `node_count`, `placed` and `unplaced`.
///
/// # Example
///
/// ```
/// # use evotree_core::{build, log_op_end};
/// log_op_end!("pack_build", duration_ms = 42);
///
/// let tree = build("abc", ["abcd"]).unwrap();
/// log_op_end!("pack_build", duration_ms = 42, tree = &tree);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr, tree = $tree:expr) => {{
        let tree: &$crate::pack::EvolutionTree = $tree;
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            node_count = tree.len(),
            placed = tree.leaf_count(),
            unplaced = tree.unplaced().len(),
        );
    }};
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// # Example
///
/// ```
/// # use evotree_core::{log_op_error, errors::EvoTreeError};
/// let err = EvoTreeError::InvalidOptions { reason: "max_edges must be at least 1".to_string() };
/// log_op_error!("pack_build", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}
