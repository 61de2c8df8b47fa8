use tracing::info;

use crate::rules;

use super::{Match, MatchEvent, MatchStatus, PointOutcome, ScoringError, SetEditOutcome, Team};

/// Validate a caller-supplied point count.
fn points(value: i64) -> Result<u32, ScoringError> {
    u32::try_from(value).map_err(|_| ScoringError::InvalidScore {
        value: value.to_string(),
    })
}

impl Match {
    /// Overwrite the live score of the current set.
    ///
    /// The score before the edit is kept as `previous_score`. A manual
    /// overwrite is not an undoable point, so the undo opportunity is
    /// dropped. If the new score wins the set it is finalized exactly as a
    /// winning point would be.
    pub fn edit_current_set_score(
        &mut self,
        team1_points: i64,
        team2_points: i64,
    ) -> Result<PointOutcome, ScoringError> {
        let team1_points = points(team1_points)?;
        let team2_points = points(team2_points)?;

        let outcome = self.apply_current_score_edit(team1_points, team2_points)?;
        MatchEvent::CurrentScoreEdited {
            team1_points,
            team2_points,
        }
        .record_on(&mut self.entity);

        info!(
            match_id = self.id,
            set_number = self.current_set,
            team1_points,
            team2_points,
            ?outcome,
            "live score edited"
        );
        Ok(outcome)
    }

    pub(crate) fn apply_current_score_edit(
        &mut self,
        team1_points: u32,
        team2_points: u32,
    ) -> Result<PointOutcome, ScoringError> {
        self.ensure_in_progress()?;

        self.previous_score = Some((self.team1_score, self.team2_score));
        self.team1_score = team1_points;
        self.team2_score = team2_points;
        self.pending_undo = None;
        Ok(self.finalize_if_won())
    }

    /// Correct the recorded score of a finished set.
    ///
    /// Set counts and status are re-derived from the whole set history, so
    /// an edit can complete the match, reopen it or change its winner. An
    /// edit that would leave a team with more than three sets is rejected.
    pub fn edit_completed_set(
        &mut self,
        set_number: u32,
        team1_points: i64,
        team2_points: i64,
    ) -> Result<SetEditOutcome, ScoringError> {
        let team1_points = points(team1_points)?;
        let team2_points = points(team2_points)?;

        let outcome = self.apply_set_edit(set_number, team1_points, team2_points)?;
        MatchEvent::SetEdited {
            set_number,
            team1_points,
            team2_points,
        }
        .record_on(&mut self.entity);

        info!(
            match_id = self.id,
            set_number,
            team1_points,
            team2_points,
            winner = %outcome.winner,
            completed = outcome.completed,
            reopened = outcome.reopened,
            "set edited"
        );
        Ok(outcome)
    }

    pub(crate) fn apply_set_edit(
        &mut self,
        set_number: u32,
        team1_points: u32,
        team2_points: u32,
    ) -> Result<SetEditOutcome, ScoringError> {
        let index = self
            .sets
            .iter()
            .position(|s| s.set_number == set_number)
            .ok_or_else(|| ScoringError::NotFound(format!("set {}", set_number)))?;

        let winner = rules::set_winner(set_number, team1_points, team2_points).ok_or(
            ScoringError::InvalidSetScore {
                set_number,
                team1_points,
                team2_points,
            },
        )?;

        // Recount the whole history with the edit applied. A flip may hand
        // the match to the other team, but no team can hold more than
        // SETS_TO_WIN sets.
        let (mut team1_sets, mut team2_sets) = (0, 0);
        for (i, set) in self.sets.iter().enumerate() {
            let (p1, p2) = if i == index {
                (team1_points, team2_points)
            } else {
                (set.team1_points, set.team2_points)
            };
            match rules::set_winner(set.set_number, p1, p2) {
                Some(Team::Team1) => team1_sets += 1,
                Some(Team::Team2) => team2_sets += 1,
                None => {}
            }
        }
        if team1_sets > rules::SETS_TO_WIN || team2_sets > rules::SETS_TO_WIN {
            return Err(ScoringError::HistoryConflict { set_number });
        }

        let set = &mut self.sets[index];
        set.team1_points = team1_points;
        set.team2_points = team2_points;
        self.team1_sets = team1_sets;
        self.team2_sets = team2_sets;
        self.pending_undo = None;

        let was_completed = self.status == MatchStatus::Completed;
        let won = rules::is_match_won(team1_sets, team2_sets);
        let mut completed = false;
        let mut reopened = false;
        if won && !was_completed {
            self.status = MatchStatus::Completed;
            self.team1_score = 0;
            self.team2_score = 0;
            completed = true;
        } else if !won && was_completed {
            self.status = MatchStatus::InProgress;
            self.current_set = self.sets.len() as u32 + 1;
            reopened = true;
        }

        Ok(SetEditOutcome {
            set_number,
            winner,
            completed,
            reopened,
        })
    }
}
