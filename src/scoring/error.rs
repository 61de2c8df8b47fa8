use std::fmt;

use super::MatchStatus;

/// Rejections raised by the scoring engine. Each variant is a distinct,
/// user-presentable failure; none is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Point, reset or live edit attempted outside `IN_PROGRESS`.
    MatchNotActive { status: MatchStatus },
    /// Pause/resume from a status that does not allow it.
    InvalidTransition {
        from: MatchStatus,
        action: &'static str,
    },
    /// Negative, fractional or out-of-range points, as the caller sent them.
    InvalidScore { value: String },
    /// A historical set edit whose score is not a finished set.
    InvalidSetScore {
        set_number: u32,
        team1_points: u32,
        team2_points: u32,
    },
    /// A historical set edit that would leave a team with more sets than
    /// it takes to win the match.
    HistoryConflict { set_number: u32 },
    InvalidTeamName(String),
    NothingToUndo,
    UndoAlreadyUsed,
    NotFound(String),
}

impl ScoringError {
    /// Stable identifier for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::MatchNotActive { .. } => "MatchNotActive",
            ScoringError::InvalidTransition { .. } => "InvalidTransition",
            ScoringError::InvalidScore { .. } => "InvalidScore",
            ScoringError::InvalidSetScore { .. } => "InvalidSetScore",
            ScoringError::HistoryConflict { .. } => "HistoryConflict",
            ScoringError::InvalidTeamName(_) => "InvalidTeamName",
            ScoringError::NothingToUndo => "NothingToUndo",
            ScoringError::UndoAlreadyUsed => "UndoAlreadyUsed",
            ScoringError::NotFound(_) => "NotFound",
        }
    }
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::MatchNotActive { status } => {
                write!(f, "match is not in progress (status {})", status)
            }
            ScoringError::InvalidTransition { from, action } => {
                write!(f, "cannot {} a match that is {}", action, from)
            }
            ScoringError::InvalidScore { value } => write!(
                f,
                "invalid score {}: points must be a whole number of 0 or more",
                value
            ),
            ScoringError::InvalidSetScore {
                set_number,
                team1_points,
                team2_points,
            } => write!(
                f,
                "{}-{} does not finish set {}: first to {} with a margin of 2",
                team1_points,
                team2_points,
                set_number,
                crate::rules::set_target(*set_number)
            ),
            ScoringError::HistoryConflict { set_number } => write!(
                f,
                "editing set {} would give a team more than {} sets",
                set_number,
                crate::rules::SETS_TO_WIN
            ),
            ScoringError::InvalidTeamName(reason) => write!(f, "invalid team name: {}", reason),
            ScoringError::NothingToUndo => write!(f, "no point to undo"),
            ScoringError::UndoAlreadyUsed => {
                write!(f, "the last point was already undone; score a point first")
            }
            ScoringError::NotFound(what) => write!(f, "{} not found", what),
        }
    }
}

impl std::error::Error for ScoringError {}
