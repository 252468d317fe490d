use thiserror::Error;

use crate::ant::AntId;

/// Errors raised while loading an ant farm description
#[derive(Debug, Error)]
pub enum ParseError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A line does not have the shape of any known record
    #[error("line {line}: {reason}")]
    Format { line: usize, reason: String },
    /// The scan finished but the graph is inconsistent
    #[error("invalid ant farm: {0}")]
    Validation(#[from] ValidationError),
}

impl ParseError {
    /// Creates a format error for the given 1-based line number.
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }

    /// Line number the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io(_) => None,
            ParseError::Format { line, .. } => Some(*line),
            ParseError::Validation(err) => err.line(),
        }
    }
}

/// Whole-graph consistency failures, detected after the scan completes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no ##start room")]
    MissingStart,
    #[error("no ##end room")]
    MissingEnd,
    #[error("line {line}: second ##start room '{room}'")]
    DuplicateStart { line: usize, room: String },
    #[error("line {line}: second ##end room '{room}'")]
    DuplicateEnd { line: usize, room: String },
    #[error("line {line}: room '{room}' is already defined")]
    DuplicateRoom { line: usize, room: String },
    #[error("line {line}: tunnel references unknown room '{room}'")]
    UnknownTunnelRoom { line: usize, room: String },
    #[error("line {line}: ant {ant} moves to unknown room '{room}'")]
    UnknownMoveRoom { line: usize, ant: AntId, room: String },
    #[error("line {line}: ant {ant} moves twice in turn {turn}")]
    DuplicateMove { line: usize, ant: AntId, turn: u32 },
}

impl ValidationError {
    /// Line number the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ValidationError::MissingStart | ValidationError::MissingEnd => None,
            ValidationError::DuplicateStart { line, .. }
            | ValidationError::DuplicateEnd { line, .. }
            | ValidationError::DuplicateRoom { line, .. }
            | ValidationError::UnknownTunnelRoom { line, .. }
            | ValidationError::UnknownMoveRoom { line, .. }
            | ValidationError::DuplicateMove { line, .. } => Some(*line),
        }
    }
}

/// Errors surfaced by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The controller task has shut down and no longer accepts commands
    #[error("simulation controller is no longer running")]
    ControllerClosed,
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, ParseError>;
