use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{EvoTreeError, Result};

/// Separator between the two characters of a substitution payload
pub const SUBSTITUTION_ARROW: char = '→';

/// The three kinds of edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Insert,
    Delete,
    Substitute,
}

impl OperationKind {
    /// Stable short tag used in the textual encoding (`add`, `del`, `sub`)
    pub fn tag(&self) -> &'static str {
        match self {
            OperationKind::Insert => "add",
            OperationKind::Delete => "del",
            OperationKind::Substitute => "sub",
        }
    }

    /// Parse a short tag back into a kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "add" => Some(OperationKind::Insert),
            "del" => Some(OperationKind::Delete),
            "sub" => Some(OperationKind::Substitute),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single grouped edit operation
///
/// `Insert` and `Delete` carry a non-empty run of characters; `Substitute`
/// replaces exactly one character with a different one. Build values through
/// the checked constructors ([`Operation::insert`], [`Operation::delete`],
/// [`Operation::substitute`]) or [`FromStr`] so malformed payloads are
/// rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Insert { text: String },
    Delete { text: String },
    Substitute { from: char, to: char },
}

impl Operation {
    /// Create an insertion of a non-empty run
    ///
    /// # Errors
    ///
    /// Returns `EmptyPayload` if `text` is empty.
    pub fn insert(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(EvoTreeError::EmptyPayload {
                kind: OperationKind::Insert.tag().to_string(),
            });
        }
        Ok(Operation::Insert { text })
    }

    /// Create a deletion of a non-empty run
    ///
    /// # Errors
    ///
    /// Returns `EmptyPayload` if `text` is empty.
    pub fn delete(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(EvoTreeError::EmptyPayload {
                kind: OperationKind::Delete.tag().to_string(),
            });
        }
        Ok(Operation::Delete { text })
    }

    /// Create a single-character substitution
    ///
    /// # Errors
    ///
    /// Returns `NoOpSubstitution` if `from == to`.
    pub fn substitute(from: char, to: char) -> Result<Self> {
        if from == to {
            return Err(EvoTreeError::NoOpSubstitution { ch: from });
        }
        Ok(Operation::Substitute { from, to })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Insert { .. } => OperationKind::Insert,
            Operation::Delete { .. } => OperationKind::Delete,
            Operation::Substitute { .. } => OperationKind::Substitute,
        }
    }

    /// Edge label for renderers: the run for insert/delete, `x→y` for substitutions
    pub fn label(&self) -> String {
        match self {
            Operation::Insert { text } | Operation::Delete { text } => text.clone(),
            Operation::Substitute { from, to } => format!("{}{}{}", from, SUBSTITUTION_ARROW, to),
        }
    }

    /// Number of source characters this operation consumes
    pub fn consumed_len(&self) -> usize {
        match self {
            Operation::Insert { .. } => 0,
            Operation::Delete { text } => text.chars().count(),
            Operation::Substitute { .. } => 1,
        }
    }

    /// Apply this operation at char offset `at` of `value`
    ///
    /// # Errors
    ///
    /// Returns `AnchorMismatch` if the deleted run or substituted character is
    /// not present at `at`, or if `at` lies past the end of `value`.
    pub fn apply_at(&self, value: &str, at: usize) -> Result<String> {
        let chars: Vec<char> = value.chars().collect();
        let mismatch = || EvoTreeError::AnchorMismatch {
            op: self.to_string(),
            at,
            value: value.to_string(),
        };

        if at > chars.len() {
            return Err(mismatch());
        }

        let mut out = String::with_capacity(value.len());
        match self {
            Operation::Insert { text } => {
                out.extend(&chars[..at]);
                out.push_str(text);
                out.extend(&chars[at..]);
            }
            Operation::Delete { text } => {
                let run: Vec<char> = text.chars().collect();
                let end = at + run.len();
                if end > chars.len() || chars[at..end] != run[..] {
                    return Err(mismatch());
                }
                out.extend(&chars[..at]);
                out.extend(&chars[end..]);
            }
            Operation::Substitute { from, to } => {
                if chars.get(at) != Some(from) {
                    return Err(mismatch());
                }
                out.extend(&chars[..at]);
                out.push(*to);
                out.extend(&chars[at + 1..]);
            }
        }
        Ok(out)
    }

    /// Parse a payload for a known kind (`"d"`, `"xy"`, `"b→x"`)
    ///
    /// # Errors
    ///
    /// Returns `MalformedOperation` for a substitution payload without the
    /// `→` separator or with sides that are not single characters, and
    /// `EmptyPayload` / `NoOpSubstitution` from the checked constructors.
    pub fn from_payload(kind: OperationKind, payload: &str) -> Result<Self> {
        match kind {
            OperationKind::Insert => Operation::insert(payload),
            OperationKind::Delete => Operation::delete(payload),
            OperationKind::Substitute => {
                let malformed = |reason: &str| EvoTreeError::MalformedOperation {
                    text: payload.to_string(),
                    reason: reason.to_string(),
                };
                let (from, to) = payload
                    .split_once(SUBSTITUTION_ARROW)
                    .ok_or_else(|| malformed("missing '→' separator"))?;
                let from = single_char(from).ok_or_else(|| malformed("left side must be one character"))?;
                let to = single_char(to).ok_or_else(|| malformed("right side must be one character"))?;
                Operation::substitute(from, to)
            }
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().tag(), self.label())
    }
}

/// Parses the `tag:payload` encoding produced by `Display`
impl FromStr for Operation {
    type Err = EvoTreeError;

    fn from_str(s: &str) -> Result<Self> {
        let (tag, payload) = s.split_once(':').ok_or_else(|| EvoTreeError::MalformedOperation {
            text: s.to_string(),
            reason: "expected '<add|del|sub>:<payload>'".to_string(),
        })?;
        let kind = OperationKind::from_tag(tag).ok_or_else(|| EvoTreeError::MalformedOperation {
            text: s.to_string(),
            reason: format!("unknown operation tag '{}'", tag),
        })?;
        Operation::from_payload(kind, payload)
    }
}
