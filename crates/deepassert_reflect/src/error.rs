//! Member access errors.

use thiserror::Error;

/// Why a member of a node could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The member lives in a cell that is currently mutably borrowed.
    #[error("value is already mutably borrowed")]
    Borrowed,

    /// The member is a weak reference whose target was dropped.
    #[error("weak reference target was dropped")]
    Dangling,

    /// Any other reason reported by a hand-written reflection impl.
    #[error("{0}")]
    Other(String),
}

impl AccessError {
    /// Creates an access error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
