//! Error types for pick path generation

use thiserror::Error;

use crate::models::Coordinate;

/// Pick path error type
///
/// Everything except [`PickPathError::Invariant`] describes bad input for a
/// single generation attempt. `Invariant` means the pipeline itself broke a
/// contract and must never be skipped over.
#[derive(Error, Debug)]
pub enum PickPathError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid warehouse layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unsupported warehouse format version {found} (expected {expected})")]
    UnsupportedVersion { found: String, expected: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No shelving column {0} in the warehouse layout")]
    UnknownColumn(String),

    #[error("No navigable route from {from} to {to}")]
    Unreachable { from: Coordinate, to: Coordinate },

    #[error("Requested {requested} books but only {available} are available")]
    NotEnoughBooks { requested: usize, available: usize },

    #[error("Tour needs at least one node besides the source")]
    TooFewNodes,

    #[error("Tour over {targets} targets exceeds the solver limit of {limit}")]
    TooManyNodes { targets: usize, limit: usize },

    #[error("Reduced graph has no edge from node {from} to node {to}")]
    IncompleteGraph { from: usize, to: usize },

    #[error("Internal consistency violated: {0}")]
    Invariant(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl PickPathError {
    /// True for errors caused by the input of one generation attempt.
    /// A batch may skip such a draw and carry on.
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            PickPathError::Invariant(_) | PickPathError::Io(_) | PickPathError::Render(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PickPathError>;
