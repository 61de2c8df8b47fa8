use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Match, MatchStatus, SetScore, Team};

/// External representation of a match, as returned by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: u64,
    pub team1_name: String,
    pub team2_name: String,
    pub team1_score: u32,
    pub team2_score: u32,
    pub team1_sets: u32,
    pub team2_sets: u32,
    pub current_set: u32,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub sets: Vec<SetScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scoring_team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_score_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_used: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_team1_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_team2_score: Option<u32>,
}

impl From<&Match> for MatchView {
    fn from(m: &Match) -> Self {
        let pending = m.pending_undo();
        MatchView {
            id: m.id(),
            team1_name: m.team1_name().to_string(),
            team2_name: m.team2_name().to_string(),
            team1_score: m.score(Team::Team1),
            team2_score: m.score(Team::Team2),
            team1_sets: m.sets_won(Team::Team1),
            team2_sets: m.sets_won(Team::Team2),
            current_set: m.current_set(),
            status: m.status(),
            created_at: m.created_at(),
            sets: m.sets().to_vec(),
            last_scoring_team: pending.map(|p| p.team),
            last_score_time: pending.map(|p| p.scored_at),
            undo_used: pending.map(|p| p.used),
            previous_team1_score: m.previous_score().map(|(t1, _)| t1),
            previous_team2_score: m.previous_score().map(|(_, t2)| t2),
        }
    }
}
