use thiserror::Error;

/// Result type alias using EvoTreeError
pub type Result<T> = std::result::Result<T, EvoTreeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by the engine and the packer. Each kind maps to a stable error code
/// that can be used for programmatic handling, testing and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Construction
    InvalidInput,
    MalformedOperation,

    // Placement
    CapacityExhausted,
    NotFound,

    // Internal defects
    EngineDrift,
    InvariantViolation,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MalformedOperation => "ERR_MALFORMED_OPERATION",
            ExErrorKind::CapacityExhausted => "ERR_CAPACITY_EXHAUSTED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::EngineDrift => "ERR_ENGINE_DRIFT",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind signals a defect in the engine/packer pairing
    /// rather than bad caller input
    pub fn is_internal_defect(&self) -> bool {
        matches!(
            self,
            ExErrorKind::EngineDrift | ExErrorKind::InvariantViolation | ExErrorKind::Internal
        )
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node context (display name of the node involved)
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node context, if any
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node) = &self.node {
            write!(f, " (node: {})", node)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for edit-script and tree-packing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvoTreeError {
    // ===== Operation construction =====
    /// Insert/Delete built with an empty run
    #[error("Empty {kind} payload: insert and delete runs must be non-empty")]
    EmptyPayload { kind: String },

    /// Substitution whose source and replacement characters are identical
    #[error("No-op substitution {ch}→{ch}: identical characters are a match, not an operation")]
    NoOpSubstitution { ch: char },

    /// Textual operation encoding could not be parsed
    #[error("Malformed operation '{text}': {reason}")]
    MalformedOperation { text: String, reason: String },

    // ===== Application / derivation =====
    /// An edit step's payload is not present at its anchor
    #[error("Cannot apply {op} at offset {at} to '{value}': payload not found at anchor")]
    AnchorMismatch {
        op: String,
        at: usize,
        value: String,
    },

    /// Walking a script did not end at the expected leaf string
    #[error("Derived string '{derived}' does not match expected '{expected}' at node {node}")]
    DerivationMismatch {
        node: String,
        expected: String,
        derived: String,
    },

    // ===== Tree structure =====
    /// A node would exceed the branching cap
    #[error("Node {node} already has {edge_count} outgoing edges (cap {max_edges})")]
    CapacityExceeded {
        node: String,
        edge_count: usize,
        max_edges: usize,
    },

    /// A leaf node was asked to take a child
    #[error("Leaf node {node} cannot take further children")]
    LeafNotExpandable { node: String },

    /// Node identity not present in the tree
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: usize },

    /// Structural invariant violated by a finished tree
    #[error("Tree invariant violated at node {node}: {reason}")]
    InvariantViolation { node: String, reason: String },

    // ===== Configuration =====
    /// Packing options rejected before the build started
    #[error("Invalid pack options: {reason}")]
    InvalidOptions { reason: String },

    // ===== Integration =====
    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<EvoTreeError> for ExError {
    fn from(err: EvoTreeError) -> Self {
        match err {
            EvoTreeError::EmptyPayload { kind } => ExError::new(ExErrorKind::MalformedOperation)
                .with_op("build_operation")
                .with_message(format!("{} payload cannot be empty", kind)),

            EvoTreeError::NoOpSubstitution { ch } => {
                ExError::new(ExErrorKind::MalformedOperation)
                    .with_op("build_operation")
                    .with_message(format!("substitution {}→{} changes nothing", ch, ch))
            }

            EvoTreeError::MalformedOperation { text, reason } => {
                ExError::new(ExErrorKind::MalformedOperation)
                    .with_op("parse_operation")
                    .with_message(format!("'{}': {}", text, reason))
            }

            EvoTreeError::AnchorMismatch { op, at, value } => {
                ExError::new(ExErrorKind::EngineDrift)
                    .with_op("apply_step")
                    .with_message(format!("{} not found at offset {} of '{}'", op, at, value))
            }

            EvoTreeError::DerivationMismatch {
                node,
                expected,
                derived,
            } => ExError::new(ExErrorKind::EngineDrift)
                .with_op("graft")
                .with_node(node)
                .with_message(format!("expected '{}', derived '{}'", expected, derived)),

            EvoTreeError::CapacityExceeded {
                node,
                edge_count,
                max_edges,
            } => ExError::new(ExErrorKind::CapacityExhausted)
                .with_op("attach")
                .with_node(node)
                .with_message(format!("{} of {} edges in use", edge_count, max_edges)),

            EvoTreeError::LeafNotExpandable { node } => {
                ExError::new(ExErrorKind::CapacityExhausted)
                    .with_op("attach")
                    .with_node(node)
                    .with_message("Leaf nodes take no children")
            }

            EvoTreeError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node(format!("#{}", node_id))
                .with_message("Node not found"),

            EvoTreeError::InvariantViolation { node, reason } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_op("validate_tree")
                    .with_node(node)
                    .with_message(reason)
            }

            EvoTreeError::InvalidOptions { reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("build")
                .with_message(reason),

            EvoTreeError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to EvoTreeError
impl From<serde_json::Error> for EvoTreeError {
    fn from(err: serde_json::Error) -> Self {
        EvoTreeError::Serialization {
            message: err.to_string(),
        }
    }
}
