use chrono::{DateTime, Utc};
use tracing::info;

use super::match_state::now;
use super::{Match, MatchEvent, MatchStatus, ScoringError};

/// Input for creating a match.
#[derive(Debug, Clone, Default)]
pub struct NewMatch {
    pub team1_name: String,
    pub team2_name: String,
    pub owner: Option<String>,
}

fn team_name(raw: &str, max_len: usize) -> Result<String, ScoringError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ScoringError::InvalidTeamName("name is empty".into()));
    }
    if name.chars().count() > max_len {
        return Err(ScoringError::InvalidTeamName(format!(
            "name is longer than {} characters",
            max_len
        )));
    }
    Ok(name.to_string())
}

impl Match {
    /// Start a new match at 0-0 in set 1.
    pub fn create(id: u64, new: NewMatch, max_name_len: usize) -> Result<Match, ScoringError> {
        let team1_name = team_name(&new.team1_name, max_name_len)?;
        let team2_name = team_name(&new.team2_name, max_name_len)?;
        let created_at = now();

        let mut m = Match::default();
        m.apply_created(id, team1_name, team2_name, new.owner, created_at);
        MatchEvent::Created {
            id,
            team1_name: m.team1_name.clone(),
            team2_name: m.team2_name.clone(),
            owner: m.owner.clone(),
            created_at_ms: created_at.timestamp_millis(),
        }
        .record_on(&mut m.entity);

        info!(match_id = id, team1 = %m.team1_name, team2 = %m.team2_name, "match created");
        Ok(m)
    }

    pub(crate) fn apply_created(
        &mut self,
        id: u64,
        team1_name: String,
        team2_name: String,
        owner: Option<String>,
        created_at: DateTime<Utc>,
    ) {
        self.entity.set_id(id.to_string());
        self.id = id;
        self.team1_name = team1_name;
        self.team2_name = team2_name;
        self.owner = owner;
        self.created_at = created_at;
        self.status = MatchStatus::InProgress;
        self.current_set = 1;
    }

    pub fn pause(&mut self) -> Result<(), ScoringError> {
        self.apply_pause()?;
        MatchEvent::Paused.record_on(&mut self.entity);
        info!(match_id = self.id, "match paused");
        Ok(())
    }

    pub(crate) fn apply_pause(&mut self) -> Result<(), ScoringError> {
        if self.status != MatchStatus::InProgress {
            return Err(ScoringError::InvalidTransition {
                from: self.status,
                action: "pause",
            });
        }
        self.status = MatchStatus::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), ScoringError> {
        self.apply_resume()?;
        MatchEvent::Resumed.record_on(&mut self.entity);
        info!(match_id = self.id, "match resumed");
        Ok(())
    }

    pub(crate) fn apply_resume(&mut self) -> Result<(), ScoringError> {
        if self.status != MatchStatus::Paused {
            return Err(ScoringError::InvalidTransition {
                from: self.status,
                action: "resume",
            });
        }
        self.status = MatchStatus::InProgress;
        Ok(())
    }

    /// Zero the live score. Finished sets are untouched.
    pub fn reset_current_set(&mut self) -> Result<(), ScoringError> {
        self.apply_reset()?;
        MatchEvent::SetReset.record_on(&mut self.entity);
        info!(match_id = self.id, set_number = self.current_set, "live score reset");
        Ok(())
    }

    pub(crate) fn apply_reset(&mut self) -> Result<(), ScoringError> {
        self.ensure_in_progress()?;
        self.team1_score = 0;
        self.team2_score = 0;
        self.pending_undo = None;
        Ok(())
    }

    /// Mark the match deleted. A deleted match is treated as missing.
    pub fn delete(&mut self) -> Result<(), ScoringError> {
        self.apply_delete()?;
        MatchEvent::Deleted.record_on(&mut self.entity);
        info!(match_id = self.id, "match deleted");
        Ok(())
    }

    pub(crate) fn apply_delete(&mut self) -> Result<(), ScoringError> {
        if self.deleted {
            return Err(ScoringError::NotFound(format!("match {}", self.id)));
        }
        self.deleted = true;
        self.pending_undo = None;
        Ok(())
    }
}
