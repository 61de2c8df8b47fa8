use chrono::{DateTime, Utc};
use tracing::info;

use super::match_state::now;
use super::{Match, MatchEvent, PendingUndo, PointOutcome, ScoringError, Team};

impl Match {
    /// Award one rally to `team`, finishing the set (and match) when it is won.
    pub fn score_point(&mut self, team: Team) -> Result<PointOutcome, ScoringError> {
        let at = now();
        let outcome = self.apply_point(team, at)?;
        MatchEvent::PointScored {
            team,
            at_ms: at.timestamp_millis(),
        }
        .record_on(&mut self.entity);

        match outcome {
            PointOutcome::Scored => {}
            PointOutcome::SetWon { set_number, winner } => {
                info!(match_id = self.id, set_number, %winner, "set completed");
            }
            PointOutcome::MatchWon { set_number, winner } => {
                info!(match_id = self.id, set_number, %winner, "match completed");
            }
        }
        Ok(outcome)
    }

    pub(crate) fn apply_point(
        &mut self,
        team: Team,
        at: DateTime<Utc>,
    ) -> Result<PointOutcome, ScoringError> {
        self.ensure_in_progress()?;

        *self.live_mut(team) += 1;
        let outcome = self.finalize_if_won();
        self.pending_undo = Some(PendingUndo {
            team,
            scored_at: at,
            closed_set: outcome != PointOutcome::Scored,
            used: false,
        });
        Ok(outcome)
    }
}
