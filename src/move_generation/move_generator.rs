//! Shared error type for move generation and execution.

use std::error::Error;
use std::fmt;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    /// A precondition was violated: a move referenced an empty origin square,
    /// an unmake was requested with nothing to unmake, or the undo stack's
    /// LIFO discipline was broken.
    InvalidState(String),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for MoveGenerationError {}
