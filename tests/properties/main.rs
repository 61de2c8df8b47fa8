//! Property tests: invariants that hold after any sequence of commands.

use proptest::prelude::*;
use volleyscore::{
    hydrate, rules, Aggregate, Entity, Match, MatchStatus, NewMatch, Team,
};

#[derive(Debug, Clone)]
enum Action {
    Point(Team),
    Undo,
    EditLive(i64, i64),
    EditSet(u32, i64, i64),
    Reset,
    Pause,
    Resume,
}

fn team() -> impl Strategy<Value = Team> {
    prop_oneof![Just(Team::Team1), Just(Team::Team2)]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => team().prop_map(Action::Point),
        2 => Just(Action::Undo),
        1 => (0i64..30, 0i64..30).prop_map(|(a, b)| Action::EditLive(a, b)),
        1 => (1u32..=5, 0i64..40, 0i64..40).prop_map(|(n, a, b)| Action::EditSet(n, a, b)),
        1 => Just(Action::Reset),
        1 => Just(Action::Pause),
        1 => Just(Action::Resume),
    ]
}

fn new_match() -> Match {
    Match::create(
        1,
        NewMatch {
            team1_name: "Sharks".into(),
            team2_name: "Eagles".into(),
            owner: None,
        },
        64,
    )
    .unwrap()
}

/// Apply `action`, reporting whether it was accepted.
fn apply(m: &mut Match, action: &Action) -> bool {
    match *action {
        Action::Point(team) => m.score_point(team).is_ok(),
        Action::Undo => m.undo_last_point().is_ok(),
        Action::EditLive(a, b) => m.edit_current_set_score(a, b).is_ok(),
        Action::EditSet(n, a, b) => m.edit_completed_set(n, a, b).is_ok(),
        Action::Reset => m.reset_current_set().is_ok(),
        Action::Pause => m.pause().is_ok(),
        Action::Resume => m.resume().is_ok(),
    }
}

fn check_invariants(m: &Match) -> Result<(), TestCaseError> {
    let team1 = m.sets_won(Team::Team1);
    let team2 = m.sets_won(Team::Team2);
    prop_assert_eq!((team1 + team2) as usize, m.sets().len());

    let mut recount = (0, 0);
    for (i, set) in m.sets().iter().enumerate() {
        prop_assert_eq!(set.set_number as usize, i + 1);
        match rules::set_winner(set.set_number, set.team1_points, set.team2_points) {
            Some(Team::Team1) => recount.0 += 1,
            Some(Team::Team2) => recount.1 += 1,
            None => prop_assert!(false, "unfinished set recorded: {:?}", set),
        }
    }
    prop_assert_eq!(recount, (team1, team2));

    let decided = rules::is_match_won(team1, team2);
    prop_assert_eq!(m.status() == MatchStatus::Completed, decided);
    prop_assert!(team1 <= rules::SETS_TO_WIN && team2 <= rules::SETS_TO_WIN);
    if !decided {
        prop_assert_eq!(m.current_set() as usize, m.sets().len() + 1);
    }
    prop_assert!(m.current_set() >= 1 && m.current_set() <= rules::MAX_SETS + 1);
    Ok(())
}

proptest! {
    /// Property: every accepted or rejected command leaves a consistent match.
    #[test]
    fn prop_invariants_hold(actions in prop::collection::vec(action(), 0..300)) {
        let mut m = new_match();
        for action in &actions {
            apply(&mut m, action);
            check_invariants(&m)?;
        }
    }

    /// Property: a rejected command changes nothing, not even the event log.
    #[test]
    fn prop_rejections_are_atomic(actions in prop::collection::vec(action(), 0..200)) {
        let mut m = new_match();
        for action in &actions {
            let before = m.view();
            let version = m.entity().version();
            if !apply(&mut m, action) {
                prop_assert_eq!(m.view(), before);
                prop_assert_eq!(m.entity().version(), version);
            }
        }
    }

    /// Property: replaying the event log rebuilds the same match.
    #[test]
    fn prop_replay_reproduces_view(actions in prop::collection::vec(action(), 0..200)) {
        let mut m = new_match();
        for action in &actions {
            apply(&mut m, action);
        }

        let mut entity = Entity::with_id(m.entity().id());
        entity.load_from_history(m.entity().events().to_vec());
        let replayed = hydrate::<Match>(entity).unwrap();
        prop_assert_eq!(replayed.view(), m.view());
        prop_assert_eq!(replayed.pending_undo(), m.pending_undo());
    }

    /// Property: undo right after a point restores the pre-point score and
    /// refuses a second undo.
    #[test]
    fn prop_undo_restores_score(
        actions in prop::collection::vec(action(), 0..100),
        scorer in team(),
    ) {
        let mut m = new_match();
        for action in &actions {
            apply(&mut m, action);
        }
        let before = m.view();
        prop_assume!(m.score_point(scorer).is_ok());

        m.undo_last_point().unwrap();
        let after = m.view();
        prop_assert_eq!(after.team1_score, before.team1_score);
        prop_assert_eq!(after.team2_score, before.team2_score);
        prop_assert_eq!(after.sets, before.sets);
        prop_assert_eq!(after.current_set, before.current_set);
        prop_assert_eq!(after.status, before.status);
        prop_assert!(m.undo_last_point().is_err());
    }
}
