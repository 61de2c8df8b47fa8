//! Post-commit notices for in-process listeners.
//!
//! Notices are derived from the committed change and fired through an
//! `EventEmitter` after the commit succeeds, so a listener never sees a
//! change that was rolled back.

use serde::Serialize;

use crate::scoring::{MatchStatus, MatchView, Team};

pub const SET_COMPLETED: &str = "set.completed";
pub const SET_REOPENED: &str = "set.reopened";
pub const MATCH_COMPLETED: &str = "match.completed";
pub const MATCH_REOPENED: &str = "match.reopened";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchNotice {
    #[serde(skip)]
    pub event: &'static str,
    pub match_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Team>,
}

impl MatchNotice {
    fn new(event: &'static str, match_id: u64) -> Self {
        MatchNotice {
            event,
            match_id,
            set_number: None,
            winner: None,
        }
    }

    /// Notices implied by going from `before` to `after`.
    pub fn between(before: &MatchView, after: &MatchView) -> Vec<MatchNotice> {
        let mut notices = Vec::new();
        let id = after.id;

        for set in after.sets.iter().skip(before.sets.len()) {
            let winner = if set.team1_points > set.team2_points {
                Team::Team1
            } else {
                Team::Team2
            };
            notices.push(MatchNotice {
                set_number: Some(set.set_number),
                winner: Some(winner),
                ..MatchNotice::new(SET_COMPLETED, id)
            });
        }
        for set in before.sets.iter().skip(after.sets.len()) {
            notices.push(MatchNotice {
                set_number: Some(set.set_number),
                ..MatchNotice::new(SET_REOPENED, id)
            });
        }

        // A completed match whose history edit changed the winner is
        // announced again with the new winner.
        match (match_winner(before), match_winner(after)) {
            (old, Some(winner)) if old != Some(winner) => notices.push(MatchNotice {
                winner: Some(winner),
                ..MatchNotice::new(MATCH_COMPLETED, id)
            }),
            (Some(_), None) => notices.push(MatchNotice::new(MATCH_REOPENED, id)),
            _ => {}
        }

        notices
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn match_winner(view: &MatchView) -> Option<Team> {
    if view.status != MatchStatus::Completed {
        None
    } else if view.team1_sets > view.team2_sets {
        Some(Team::Team1)
    } else {
        Some(Team::Team2)
    }
}

#[cfg(feature = "emitter")]
pub use notifier::MatchNotifier;

#[cfg(feature = "emitter")]
mod notifier {
    use std::sync::Mutex;

    use event_emitter_rs::EventEmitter;
    use tracing::{debug, warn};

    use super::MatchNotice;

    /// Fans notices out to listeners registered with `on`.
    ///
    /// Listeners run on the emitter's own threads and receive the notice as
    /// a JSON string.
    pub struct MatchNotifier {
        emitter: Mutex<EventEmitter>,
    }

    impl Default for MatchNotifier {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MatchNotifier {
        pub fn new() -> Self {
            MatchNotifier {
                emitter: Mutex::new(EventEmitter::new()),
            }
        }

        pub fn on<F>(&self, event: &str, listener: F)
        where
            F: Fn(String) + Send + Sync + 'static,
        {
            match self.emitter.lock() {
                Ok(mut emitter) => {
                    emitter.on(event, listener);
                }
                Err(_) => warn!(event, "notifier poisoned; listener not registered"),
            }
        }

        pub fn publish(&self, notices: &[MatchNotice]) {
            if notices.is_empty() {
                return;
            }
            let Ok(mut emitter) = self.emitter.lock() else {
                warn!(count = notices.len(), "notifier poisoned; notices dropped");
                return;
            };
            for notice in notices {
                debug!(event = notice.event, match_id = notice.match_id, "emitting notice");
                emitter.emit(notice.event, notice.to_json());
            }
        }
    }
}
