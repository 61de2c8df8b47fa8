use volleyscore::{
    Aggregate, AggregateBuilder, HashMapRepository, Match, MatchEvent, Queueable, Team,
};

use crate::support::{live, new_match, win_set};

#[test]
fn stored_match_reloads_identically() {
    let repo = HashMapRepository::new().aggregate::<Match>();
    let mut m = new_match(3);
    win_set(&mut m, Team::Team2);
    m.score_point(Team::Team1).unwrap();
    m.undo_last_point().unwrap();
    live(&mut m, 7, 9);
    m.edit_completed_set(1, 26, 28).unwrap();
    repo.commit(&mut m).unwrap();

    let loaded = repo.get("3").unwrap().unwrap();
    assert_eq!(loaded.view(), m.view());
}

#[test]
fn reload_after_each_step_matches_the_live_match() {
    let repo = HashMapRepository::new().queued().aggregate::<Match>();
    let mut created = new_match(4);
    repo.commit(&mut created).unwrap();

    let steps: Vec<Box<dyn Fn(&mut Match)>> = vec![
        Box::new(|m: &mut Match| {
            m.score_point(Team::Team1).unwrap();
        }),
        Box::new(|m: &mut Match| live(m, 24, 22)),
        Box::new(|m: &mut Match| {
            m.score_point(Team::Team1).unwrap();
        }),
        Box::new(|m: &mut Match| {
            m.undo_last_point().unwrap();
        }),
        Box::new(|m: &mut Match| m.pause().unwrap()),
        Box::new(|m: &mut Match| m.resume().unwrap()),
        Box::new(|m: &mut Match| m.reset_current_set().unwrap()),
    ];

    for step in steps {
        let mut loaded = repo.get("4").unwrap().unwrap();
        step(&mut loaded);
        repo.commit(&mut loaded).unwrap();

        let reread = repo.peek("4").unwrap().unwrap();
        assert_eq!(reread.view(), loaded.view());
        assert_eq!(reread.pending_undo(), loaded.pending_undo());
    }
}

#[test]
fn event_log_names_each_mutation() {
    let mut m = new_match(5);
    m.score_point(Team::Team1).unwrap();
    m.undo_last_point().unwrap();
    m.pause().unwrap();

    let names: Vec<&str> = m
        .entity()
        .events()
        .iter()
        .map(|e| e.event_name.as_str())
        .collect();
    assert_eq!(names, vec!["Created", "PointScored", "PointUndone", "Paused"]);

    let decoded = MatchEvent::try_from(&m.entity().events()[1]).unwrap();
    assert!(matches!(decoded, MatchEvent::PointScored { team: Team::Team1, .. }));
}

#[test]
fn stale_commit_is_rejected() {
    let repo = HashMapRepository::new().aggregate::<Match>();
    let mut m = new_match(6);
    repo.commit(&mut m).unwrap();

    let mut first = repo.get("6").unwrap().unwrap();
    let mut second = repo.get("6").unwrap().unwrap();
    first.score_point(Team::Team1).unwrap();
    second.score_point(Team::Team2).unwrap();

    repo.commit(&mut first).unwrap();
    assert!(repo.commit(&mut second).is_err());
}
