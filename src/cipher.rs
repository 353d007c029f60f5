//! Substitution cipher: stateless per-symbol transforms
//!
//! Selects a mapping object out of a pool and maps each symbol of the input
//! through its table. Symbols absent from the table pass through unchanged,
//! which covers whitespace, punctuation and scripts outside the configured
//! character pool.

use std::collections::HashMap;
use std::fmt;

use crate::error::OperationError;
use crate::mapping::MappingObject;

/// Which of a mapping object's two tables a transform reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    /// The table this direction reads from.
    pub fn table<'a>(&self, object: &'a MappingObject) -> &'a HashMap<char, char> {
        match self {
            Direction::Encrypt => &object.encrypt,
            Direction::Decrypt => &object.decrypt,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => write!(f, "encrypt"),
            Direction::Decrypt => write!(f, "decrypt"),
        }
    }
}

/// Resolve the mapping object a transform should use: the one matching `id`
/// when given, otherwise the first object in the pool.
pub fn select<'a>(
    pool: &'a [MappingObject],
    id: Option<&str>,
) -> Result<&'a MappingObject, OperationError> {
    if pool.is_empty() {
        return Err(OperationError::EmptyPool);
    }
    match id {
        Some(id) => pool
            .iter()
            .find(|object| object.id == id)
            .ok_or_else(|| OperationError::MappingNotFound(id.to_string())),
        None => Ok(&pool[0]),
    }
}

/// Map each symbol of `data` through `table`, passing unmapped symbols
/// through unchanged.
pub fn substitute(data: &str, table: &HashMap<char, char>) -> String {
    data.chars()
        .map(|symbol| table.get(&symbol).copied().unwrap_or(symbol))
        .collect()
}
