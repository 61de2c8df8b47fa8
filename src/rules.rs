//! Best-of-5 volleyball thresholds.
//!
//! Every win check in the crate goes through these functions.

use crate::scoring::Team;

/// Sets a team must win to take the match.
pub const SETS_TO_WIN: u32 = 3;

/// Highest set number a match can reach.
pub const MAX_SETS: u32 = 2 * SETS_TO_WIN - 1;

/// Minimum winning margin in every set.
pub const WIN_MARGIN: u32 = 2;

const REGULAR_SET_TARGET: u32 = 25;
const DECIDING_SET_TARGET: u32 = 15;

/// Points needed to win set `set_number`: 15 in the fifth set, 25 otherwise.
pub fn set_target(set_number: u32) -> u32 {
    if set_number == MAX_SETS {
        DECIDING_SET_TARGET
    } else {
        REGULAR_SET_TARGET
    }
}

pub fn is_set_won(set_number: u32, team1_points: u32, team2_points: u32) -> bool {
    team1_points.max(team2_points) >= set_target(set_number)
        && team1_points.abs_diff(team2_points) >= WIN_MARGIN
}

/// Winner of a set with this score, if the score is a finished set.
pub fn set_winner(set_number: u32, team1_points: u32, team2_points: u32) -> Option<Team> {
    if !is_set_won(set_number, team1_points, team2_points) {
        return None;
    }
    if team1_points > team2_points {
        Some(Team::Team1)
    } else {
        Some(Team::Team2)
    }
}

pub fn is_match_won(team1_sets: u32, team2_sets: u32) -> bool {
    team1_sets == SETS_TO_WIN || team2_sets == SETS_TO_WIN
}
