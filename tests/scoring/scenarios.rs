use volleyscore::{MatchStatus, PointOutcome, ScoringError, Team, UndoOutcome};

use crate::support::{live, live_score, new_match, win_set};

#[test]
fn scenario_a_set_closes_at_twenty_five() {
    let mut m = new_match(1);
    live(&mut m, 24, 23);
    m.score_point(Team::Team1).unwrap();

    assert_eq!(m.sets().len(), 1);
    assert_eq!(m.sets()[0].team1_points, 25);
    assert_eq!(m.sets()[0].team2_points, 23);
    assert_eq!(live_score(&m), (0, 0));
    assert_eq!(m.current_set(), 2);
}

#[test]
fn scenario_b_margin_of_one_is_not_enough() {
    let mut m = new_match(1);
    win_set(&mut m, Team::Team1);
    win_set(&mut m, Team::Team2);
    win_set(&mut m, Team::Team1);
    live(&mut m, 24, 24);

    assert_eq!(m.score_point(Team::Team1).unwrap(), PointOutcome::Scored);
    assert_eq!(live_score(&m), (25, 24));
    assert_eq!(m.sets().len(), 3);
    assert_eq!(m.status(), MatchStatus::InProgress);
}

#[test]
fn scenario_c_extended_set_wins_the_match() {
    let mut m = new_match(1);
    win_set(&mut m, Team::Team1);
    win_set(&mut m, Team::Team2);
    win_set(&mut m, Team::Team1);
    live(&mut m, 25, 23);

    m.score_point(Team::Team1).unwrap();
    let last = m.sets().last().unwrap();
    assert_eq!((last.team1_points, last.team2_points), (26, 23));
    assert_eq!(m.sets_won(Team::Team1), 3);
    assert_eq!(m.status(), MatchStatus::Completed);
}

#[test]
fn scenario_d_undo_reopens_set_one() {
    let mut m = new_match(1);
    live(&mut m, 24, 23);
    m.score_point(Team::Team1).unwrap();

    assert_eq!(
        m.undo_last_point().unwrap(),
        UndoOutcome::SetReopened {
            set_number: 1,
            match_reopened: false
        }
    );
    assert!(m.sets().is_empty());
    assert_eq!(m.current_set(), 1);
    assert_eq!(live_score(&m), (24, 23));
}

#[test]
fn scenario_e_second_undo_is_refused() {
    let mut m = new_match(1);
    m.score_point(Team::Team2).unwrap();
    m.undo_last_point().unwrap();
    assert_eq!(m.undo_last_point(), Err(ScoringError::UndoAlreadyUsed));
}

#[test]
fn scenario_f_flipping_the_deciding_set() {
    let mut m = new_match(1);
    win_set(&mut m, Team::Team1);
    win_set(&mut m, Team::Team1);
    win_set(&mut m, Team::Team2);
    win_set(&mut m, Team::Team1);
    assert_eq!(m.status(), MatchStatus::Completed);

    let outcome = m.edit_completed_set(4, 23, 25).unwrap();
    assert!(outcome.reopened);
    assert_eq!(m.sets_won(Team::Team1), 2);
    assert_eq!(m.sets_won(Team::Team2), 2);
    assert_eq!(m.status(), MatchStatus::InProgress);
    assert_eq!(m.current_set(), 5);
}

#[test]
fn undo_on_the_match_point_reopens_the_match() {
    let mut m = new_match(1);
    win_set(&mut m, Team::Team2);
    win_set(&mut m, Team::Team2);
    win_set(&mut m, Team::Team1);
    win_set(&mut m, Team::Team1);
    live(&mut m, 12, 14);
    m.score_point(Team::Team2).unwrap();
    assert_eq!(m.status(), MatchStatus::Completed);
    assert_eq!(m.current_set(), 5);

    m.undo_last_point().unwrap();
    assert_eq!(m.status(), MatchStatus::InProgress);
    assert_eq!(m.current_set(), 5);
    assert_eq!(live_score(&m), (12, 14));
    assert_eq!(m.sets().len(), 4);
}

#[test]
fn pause_twice_is_rejected() {
    let mut m = new_match(1);
    m.pause().unwrap();
    assert!(matches!(
        m.pause(),
        Err(ScoringError::InvalidTransition { action: "pause", .. })
    ));
}

#[test]
fn set_ids_are_not_reused_after_undo() {
    let mut m = new_match(1);
    win_set(&mut m, Team::Team1);
    m.undo_last_point().unwrap();
    m.score_point(Team::Team1).unwrap();

    assert_eq!(m.sets().len(), 1);
    assert_eq!(m.sets()[0].id, 2);
}
