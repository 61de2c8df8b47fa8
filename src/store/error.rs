use std::fmt;

use crate::repository::RepositoryError;
use crate::scoring::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The engine rejected the operation; nothing was written.
    Scoring(ScoringError),
    Repository(RepositoryError),
}

impl StoreError {
    pub fn not_found(id: u64) -> Self {
        StoreError::Scoring(ScoringError::NotFound(format!("match {}", id)))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Scoring(err) => write!(f, "{}", err),
            StoreError::Repository(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Scoring(err) => Some(err),
            StoreError::Repository(err) => Some(err),
        }
    }
}

impl From<ScoringError> for StoreError {
    fn from(err: ScoringError) -> Self {
        StoreError::Scoring(err)
    }
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        StoreError::Repository(err)
    }
}
