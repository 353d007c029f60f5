//! Error taxonomy: configuration diagnostics and operation errors
//!
//! Nothing here aborts a running instance. Configuration diagnostics either
//! trigger a fallback (warnings) or leave the pool empty (fatal); operation
//! errors are carried next to an identity/no-op fallback value.

use thiserror::Error;

use crate::cipher::Direction;

/// Diagnostics emitted while resolving construction options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigDiagnostic {
    /// A named character set is not in the registry; it is skipped.
    #[error("character set '{0}' not found")]
    UnknownCharacterSet(String),

    /// The `characters` override is not a sequence of single-character
    /// symbols; it is discarded in favor of `characterSet`.
    #[error("characters must be an array of single-character symbols, falling back to character sets")]
    CharactersNotASequence,

    /// `size` could not be coerced to a positive integer; the default is used.
    #[error("size must be a positive integer, got '{0}', using default")]
    InvalidSize(String),

    /// Preloaded mapping objects were supplied in a shape `load` rejects.
    /// The pool stays empty because preloading takes precedence over building.
    #[error("load expected array of mapping object")]
    MappingObjectsNotASequence,

    /// No explicit characters, no resolvable sets, no preloaded pool.
    #[error("no valid characters available for masking")]
    NoUsableCharacters,
}

impl ConfigDiagnostic {
    /// Fatal diagnostics leave the instance with an empty pool; every
    /// subsequent operation degrades to passthrough.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConfigDiagnostic::MappingObjectsNotASequence | ConfigDiagnostic::NoUsableCharacters
        )
    }
}

/// Errors reported by encrypt/decrypt/load. Each one is paired with a safe
/// fallback at the call site; none of them poisons the instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// A foreign payload was not a string. The payload is returned unchanged.
    #[error("{direction} expected a string payload, got {found}")]
    ExpectedText {
        direction: Direction,
        found: &'static str,
    },

    /// No mapping object matches the requested id.
    #[error("mapping object with id '{0}' not found")]
    MappingNotFound(String),

    /// The pool is empty; there is nothing to transform with.
    #[error("no mapping objects are loaded")]
    EmptyPool,

    /// `load` was handed something other than a sequence.
    #[error("load expected array of mapping object")]
    LoadNotASequence,

    /// A sequence element did not decode as a mapping object. The whole
    /// load is rejected; the store keeps its previous pool.
    #[error("mapping object at index {index} is malformed: {detail}")]
    MalformedMappingObject { index: usize, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_message_is_pinned() {
        assert_eq!(
            OperationError::LoadNotASequence.to_string(),
            "load expected array of mapping object"
        );
        assert_eq!(
            ConfigDiagnostic::MappingObjectsNotASequence.to_string(),
            "load expected array of mapping object"
        );
    }

    #[test]
    fn test_expected_text_names_direction() {
        let err = OperationError::ExpectedText {
            direction: Direction::Encrypt,
            found: "number",
        };
        assert_eq!(err.to_string(), "encrypt expected a string payload, got number");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ConfigDiagnostic::NoUsableCharacters.is_fatal());
        assert!(ConfigDiagnostic::MappingObjectsNotASequence.is_fatal());
        assert!(!ConfigDiagnostic::UnknownCharacterSet("x".into()).is_fatal());
        assert!(!ConfigDiagnostic::CharactersNotASequence.is_fatal());
        assert!(!ConfigDiagnostic::InvalidSize("0".into()).is_fatal());
    }
}
