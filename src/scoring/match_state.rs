use chrono::{DateTime, SubsecRound, Utc};

use crate::entity::{Entity, EventRecord};
use crate::rules;

use super::{
    MatchEvent, MatchStatus, MatchView, PendingUndo, PointOutcome, ScoringError, SetScore, Team,
};

/// The match aggregate: live score, finished sets and the undo opportunity.
///
/// Every public mutation validates first, changes state only on success and
/// then records exactly one `MatchEvent`; replay drives the same `apply_*`
/// paths, so a reloaded match is identical to the one that was committed.
#[derive(Debug, Clone)]
pub struct Match {
    pub(crate) entity: Entity,
    pub(crate) id: u64,
    pub(crate) team1_name: String,
    pub(crate) team2_name: String,
    pub(crate) owner: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) team1_score: u32,
    pub(crate) team2_score: u32,
    pub(crate) team1_sets: u32,
    pub(crate) team2_sets: u32,
    pub(crate) current_set: u32,
    pub(crate) status: MatchStatus,
    pub(crate) sets: Vec<SetScore>,
    pub(crate) next_set_id: u64,
    pub(crate) pending_undo: Option<PendingUndo>,
    pub(crate) previous_score: Option<(u32, u32)>,
    pub(crate) deleted: bool,
}

impl Default for Match {
    fn default() -> Self {
        Match {
            entity: Entity::default(),
            id: 0,
            team1_name: String::new(),
            team2_name: String::new(),
            owner: None,
            created_at: DateTime::<Utc>::default(),
            team1_score: 0,
            team2_score: 0,
            team1_sets: 0,
            team2_sets: 0,
            current_set: 1,
            status: MatchStatus::InProgress,
            sets: Vec::new(),
            next_set_id: 0,
            pending_undo: None,
            previous_score: None,
            deleted: false,
        }
    }
}

crate::impl_aggregate!(Match, entity, replay);

impl Match {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn team1_name(&self) -> &str {
        &self.team1_name
    }

    pub fn team2_name(&self) -> &str {
        &self.team2_name
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::Team1 => self.team1_score,
            Team::Team2 => self.team2_score,
        }
    }

    pub fn sets_won(&self, team: Team) -> u32 {
        match team {
            Team::Team1 => self.team1_sets,
            Team::Team2 => self.team2_sets,
        }
    }

    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn sets(&self) -> &[SetScore] {
        &self.sets
    }

    pub fn pending_undo(&self) -> Option<&PendingUndo> {
        self.pending_undo.as_ref()
    }

    pub fn previous_score(&self) -> Option<(u32, u32)> {
        self.previous_score
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Whether `owner` may see this match. Ownerless matches are public.
    pub fn is_visible_to(&self, owner: Option<&str>) -> bool {
        match self.owner.as_deref() {
            None => true,
            Some(mine) => owner == Some(mine),
        }
    }

    pub fn view(&self) -> MatchView {
        MatchView::from(self)
    }

    pub(crate) fn live_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::Team1 => &mut self.team1_score,
            Team::Team2 => &mut self.team2_score,
        }
    }

    pub(crate) fn sets_won_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::Team1 => &mut self.team1_sets,
            Team::Team2 => &mut self.team2_sets,
        }
    }

    pub(crate) fn ensure_in_progress(&self) -> Result<(), ScoringError> {
        if self.status == MatchStatus::InProgress {
            Ok(())
        } else {
            Err(ScoringError::MatchNotActive {
                status: self.status,
            })
        }
    }

    /// Append the live score as a finished set if it wins `current_set`.
    pub(crate) fn finalize_if_won(&mut self) -> PointOutcome {
        let set_number = self.current_set;
        let Some(winner) = rules::set_winner(set_number, self.team1_score, self.team2_score)
        else {
            return PointOutcome::Scored;
        };

        self.next_set_id += 1;
        self.sets.push(SetScore {
            id: self.next_set_id,
            set_number,
            team1_points: self.team1_score,
            team2_points: self.team2_score,
        });
        *self.sets_won_mut(winner) += 1;
        self.team1_score = 0;
        self.team2_score = 0;

        if rules::is_match_won(self.team1_sets, self.team2_sets) {
            self.status = MatchStatus::Completed;
            PointOutcome::MatchWon { set_number, winner }
        } else {
            self.current_set += 1;
            PointOutcome::SetWon { set_number, winner }
        }
    }

    fn replay(&mut self, record: &EventRecord) -> Result<(), String> {
        let event = MatchEvent::try_from(record)?;
        self.apply(event)
    }

    fn apply(&mut self, event: MatchEvent) -> Result<(), String> {
        let applied = match event {
            MatchEvent::Created {
                id,
                team1_name,
                team2_name,
                owner,
                created_at_ms,
            } => {
                let created_at = from_millis(created_at_ms)?;
                self.apply_created(id, team1_name, team2_name, owner, created_at);
                Ok(())
            }
            MatchEvent::PointScored { team, at_ms } => {
                let at = from_millis(at_ms)?;
                self.apply_point(team, at).map(|_| ())
            }
            MatchEvent::PointUndone => self.apply_undo().map(|_| ()),
            MatchEvent::CurrentScoreEdited {
                team1_points,
                team2_points,
            } => self
                .apply_current_score_edit(team1_points, team2_points)
                .map(|_| ()),
            MatchEvent::SetEdited {
                set_number,
                team1_points,
                team2_points,
            } => self
                .apply_set_edit(set_number, team1_points, team2_points)
                .map(|_| ()),
            MatchEvent::SetReset => self.apply_reset(),
            MatchEvent::Paused => self.apply_pause(),
            MatchEvent::Resumed => self.apply_resume(),
            MatchEvent::Deleted => self.apply_delete(),
        };
        applied.map_err(|e| e.to_string())
    }
}

/// Millisecond-precision "now", so live and replayed timestamps agree.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, String> {
    DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| format!("timestamp {} out of range", ms))
}
