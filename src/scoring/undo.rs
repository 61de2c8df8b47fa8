use tracing::info;

use super::{Match, MatchEvent, MatchStatus, ScoringError, UndoOutcome};

impl Match {
    /// Revert the most recent point, once.
    ///
    /// A point that finished a set reopens that set (and the match, if it
    /// was the deciding set). The undo opportunity stays visible but spent
    /// until the next point is scored.
    pub fn undo_last_point(&mut self) -> Result<UndoOutcome, ScoringError> {
        let outcome = self.apply_undo()?;
        MatchEvent::PointUndone.record_on(&mut self.entity);

        match outcome {
            UndoOutcome::PointRemoved { team } => {
                info!(match_id = self.id, %team, "point undone");
            }
            UndoOutcome::SetReopened {
                set_number,
                match_reopened,
            } => {
                info!(match_id = self.id, set_number, match_reopened, "set reopened by undo");
            }
        }
        Ok(outcome)
    }

    pub(crate) fn apply_undo(&mut self) -> Result<UndoOutcome, ScoringError> {
        let pending = self.pending_undo.clone().ok_or(ScoringError::NothingToUndo)?;
        if pending.used {
            return Err(ScoringError::UndoAlreadyUsed);
        }

        let outcome = if pending.closed_set {
            let Some(closed) = self.sets.pop() else {
                return Err(ScoringError::NothingToUndo);
            };
            let winner = pending.team;
            *self.sets_won_mut(winner) -= 1;
            self.team1_score = closed.team1_points;
            self.team2_score = closed.team2_points;
            *self.live_mut(winner) -= 1;

            let match_reopened = self.status == MatchStatus::Completed;
            if match_reopened {
                self.status = MatchStatus::InProgress;
            }
            self.current_set = closed.set_number;
            UndoOutcome::SetReopened {
                set_number: closed.set_number,
                match_reopened,
            }
        } else {
            let score = self.live_mut(pending.team);
            if *score == 0 {
                return Err(ScoringError::NothingToUndo);
            }
            *score -= 1;
            UndoOutcome::PointRemoved { team: pending.team }
        };

        if let Some(pending) = self.pending_undo.as_mut() {
            pending.used = true;
        }
        Ok(outcome)
    }
}
