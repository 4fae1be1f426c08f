use serde::Serialize;

use crate::errors::Result;
use crate::model::Operation;

/// One operation of an edit script together with its anchor
///
/// `at` is the char offset, in the string the step is applied to, where the
/// operation takes effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditStep {
    pub op: Operation,
    pub at: usize,
}

impl EditStep {
    pub fn new(op: Operation, at: usize) -> Self {
        Self { op, at }
    }

    /// Apply this step to `value`
    ///
    /// # Errors
    ///
    /// Returns `AnchorMismatch` if the payload is not found at the anchor.
    pub fn apply(&self, value: &str) -> Result<String> {
        self.op.apply_at(value, self.at)
    }
}

/// Ordered sequence of grouped operations transforming one string into another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EditScript {
    steps: Vec<EditStep>,
}

impl EditScript {
    pub fn new(steps: Vec<EditStep>) -> Self {
        Self { steps }
    }

    /// Number of grouped operations (the path cost used for placement)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[EditStep] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditStep> {
        self.steps.iter()
    }

    /// The bare operation sequence, without anchors
    pub fn operations(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.steps.iter().map(|step| &step.op)
    }

    pub fn to_operations(&self) -> Vec<Operation> {
        self.operations().cloned().collect()
    }

    /// Apply every step left to right, starting from `source`
    ///
    /// # Errors
    ///
    /// Returns `AnchorMismatch` if any step does not fit the string produced
    /// by the steps before it.
    pub fn apply(&self, source: &str) -> Result<String> {
        self.steps
            .iter()
            .try_fold(source.to_string(), |value, step| step.apply(&value))
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a EditStep;
    type IntoIter = std::slice::Iter<'a, EditStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
