use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Team1,
    Team2,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::Team1 => Team::Team2,
            Team::Team2 => Team::Team1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Team1 => "team1",
            Team::Team2 => "team2",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    InProgress,
    Paused,
    Completed,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::InProgress => "IN_PROGRESS",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished set as recorded in the match history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScore {
    pub id: u64,
    pub set_number: u32,
    pub team1_points: u32,
    pub team2_points: u32,
}

impl SetScore {
    pub fn points(&self, team: Team) -> u32 {
        match team {
            Team::Team1 => self.team1_points,
            Team::Team2 => self.team2_points,
        }
    }
}

/// The single-use right to revert the most recent point.
///
/// Present only while the last mutation was a point (or an undo of it); any
/// other mutation clears it. `closed_set` tells the undo whether that point
/// finalized a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUndo {
    pub team: Team,
    pub scored_at: DateTime<Utc>,
    pub closed_set: bool,
    pub used: bool,
}

/// What a point (or a live-score edit) did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    Scored,
    SetWon { set_number: u32, winner: Team },
    MatchWon { set_number: u32, winner: Team },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    PointRemoved { team: Team },
    SetReopened { set_number: u32, match_reopened: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetEditOutcome {
    pub set_number: u32,
    pub winner: Team,
    pub completed: bool,
    pub reopened: bool,
}
