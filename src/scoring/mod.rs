//! The match aggregate and the operations that score it.

mod editor;
mod engine;
mod error;
mod events;
mod lifecycle;
mod match_state;
mod types;
mod undo;
mod view;

pub use error::ScoringError;
pub use events::MatchEvent;
pub use lifecycle::NewMatch;
pub use match_state::Match;
pub use types::{
    MatchStatus, PendingUndo, PointOutcome, SetEditOutcome, SetScore, Team, UndoOutcome,
};
pub use view::MatchView;
