//! Diagram error types

use thiserror::Error;

/// Contract violations raised by chain operations.
///
/// Every operation validates in full before mutating, so a returned error
/// means the chain is unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagramError {
    /// Malformed input: empty or duplicate labels, bad layout values, or a
    /// corridor that cannot clear the chain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Node index outside the chain
    #[error("Index {index} out of range for chain of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A route or branch was requested between a node and itself
    #[error("Route endpoints are the same node (index {0})")]
    SameIndex(usize),

    /// Relabel plan does not cover the chain exactly
    #[error("Expected {expected} labels, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Result type for diagram operations
pub type Result<T> = std::result::Result<T, DiagramError>;
