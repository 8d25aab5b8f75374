//! Error taxonomy shared by the engine, stores and service layer.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, QuestError>;

/// Errors surfaced by the progression engine and its stores.
///
/// Every operation fails on the first violated precondition, before any
/// state has been committed. `status_code` gives a transport layer the
/// conventional HTTP mapping without it needing to match on variants.
#[derive(Debug, Error)]
pub enum QuestError {
    /// An entity (zone, node, child, gate, content record) is absent.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The operation does not apply to the target's current type/state,
    /// e.g. checking a gate on a lesson node.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Malformed input: unknown status value, missing required field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The child lacks the currency/items the operation needs. Unused by
    /// the map core itself but shared with sibling purchase flows.
    #[error("insufficient resources: {0}")]
    InsufficientResources(String),

    /// The backing store failed to load or persist an entity.
    #[error("storage error: {0}")]
    Storage(String),
}

impl QuestError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        QuestError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        QuestError::InvalidState(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        QuestError::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        QuestError::Storage(msg.into())
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            QuestError::NotFound { .. } => 404,
            QuestError::InvalidState(_) => 409,
            QuestError::Validation(_) => 400,
            QuestError::InsufficientResources(_) => 402,
            QuestError::Storage(_) => 500,
        }
    }
}

impl From<std::io::Error> for QuestError {
    fn from(err: std::io::Error) -> Self {
        QuestError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(QuestError::not_found("zone", "z9").status_code(), 404);
        assert_eq!(QuestError::invalid_state("gate check on lesson").status_code(), 409);
        assert_eq!(QuestError::validation("bad status").status_code(), 400);
        assert_eq!(QuestError::storage("disk full").status_code(), 500);
    }

    #[test]
    fn test_not_found_message() {
        let err = QuestError::not_found("node", "n42");
        assert_eq!(err.to_string(), "node not found: n42");
    }
}
