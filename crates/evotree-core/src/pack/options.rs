use serde::{Deserialize, Serialize};

use crate::errors::{EvoTreeError, Result};

/// Branching cap used when none is configured
pub const DEFAULT_MAX_EDGES: usize = 3;

/// Packing configuration
///
/// Missing fields fall back to their defaults when deserialized, so `{}` is a
/// valid configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackOptions {
    /// Maximum number of outgoing edges per node
    pub max_edges: usize,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            max_edges: DEFAULT_MAX_EDGES,
        }
    }
}

impl PackOptions {
    pub fn with_max_edges(max_edges: usize) -> Self {
        Self { max_edges }
    }

    /// Parse options from a JSON document
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed JSON or unknown keys, and
    /// `InvalidOptions` if the parsed values fail [`PackOptions::validate`].
    pub fn from_json(text: &str) -> Result<Self> {
        let options: PackOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the options before a build
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` if `max_edges` is zero (the root could never
    /// take a path).
    pub fn validate(&self) -> Result<()> {
        if self.max_edges == 0 {
            return Err(EvoTreeError::InvalidOptions {
                reason: "max_edges must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cap_is_three() {
        assert_eq!(PackOptions::default().max_edges, 3);
        assert!(PackOptions::default().validate().is_ok());
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let err = PackOptions::with_max_edges(0).validate().unwrap_err();
        assert!(matches!(err, EvoTreeError::InvalidOptions { .. }));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        assert_eq!(PackOptions::from_json("{}").unwrap(), PackOptions::default());
        assert_eq!(
            PackOptions::from_json(r#"{"max_edges": 5}"#).unwrap().max_edges,
            5
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_keys_and_zero_cap() {
        assert!(matches!(
            PackOptions::from_json(r#"{"max_children": 5}"#),
            Err(EvoTreeError::Serialization { .. })
        ));
        assert!(matches!(
            PackOptions::from_json(r#"{"max_edges": 0}"#),
            Err(EvoTreeError::InvalidOptions { .. })
        ));
    }
}
