//! Error types for command handlers.

use std::error::Error;
use std::fmt;

use crate::repository::RepositoryError;
use crate::scoring::ScoringError;
use crate::store::StoreError;

#[derive(Debug)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    DecodeFailed(String),
    /// The scoring engine rejected the command.
    Scoring(ScoringError),
    /// Match or set not found, or not visible to the session.
    NotFound(String),
    Repository(RepositoryError),
    /// Guard rejected the command (required input missing).
    GuardRejected(String),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::Scoring(e) => write!(f, "{}", e),
            HandlerError::NotFound(what) => write!(f, "{} not found", what),
            HandlerError::Repository(e) => write!(f, "repository error: {}", e),
            HandlerError::GuardRejected(name) => {
                write!(f, "guard rejected command: {}", name)
            }
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Scoring(e) => Some(e),
            HandlerError::Repository(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScoringError> for HandlerError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::NotFound(what) => HandlerError::NotFound(what),
            other => HandlerError::Scoring(other),
        }
    }
}

impl From<RepositoryError> for HandlerError {
    fn from(err: RepositoryError) -> Self {
        HandlerError::Repository(err)
    }
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Scoring(e) => e.into(),
            StoreError::Repository(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::NotFound(_) => 404,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Scoring(e) => match e {
                ScoringError::InvalidScore { .. } | ScoringError::InvalidTeamName(_) => 400,
                ScoringError::NotFound(_) => 404,
                ScoringError::HistoryConflict { .. } => 409,
                ScoringError::MatchNotActive { .. }
                | ScoringError::InvalidTransition { .. }
                | ScoringError::InvalidSetScore { .. }
                | ScoringError::NothingToUndo
                | ScoringError::UndoAlreadyUsed => 422,
            },
            HandlerError::Repository(RepositoryError::ConcurrentWrite { .. }) => 409,
            HandlerError::Repository(_) => 500,
        }
    }

    /// Stable identifier for the failure, returned to callers as `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::UnknownCommand(_) => "UnknownCommand",
            HandlerError::DecodeFailed(_) => "DecodeFailed",
            HandlerError::Scoring(e) => e.kind(),
            HandlerError::NotFound(_) => "NotFound",
            HandlerError::Repository(_) => "Repository",
            HandlerError::GuardRejected(_) => "GuardRejected",
        }
    }
}
