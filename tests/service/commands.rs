use serde_json::json;
use volleyscore::microsvc::{CommandRequest, HandlerError};

use crate::support::{create, guest, run, score, service, set_point};

#[test]
fn create_returns_a_fresh_match() {
    let service = service();
    let view = service
        .dispatch(
            "match.create",
            json!({ "team1Name": " Sharks ", "team2Name": "Eagles" }),
            guest(),
        )
        .unwrap();

    assert_eq!(view["team1Name"], "Sharks");
    assert_eq!(view["team1Score"], 0);
    assert_eq!(view["currentSet"], 1);
    assert_eq!(view["status"], "IN_PROGRESS");
    assert_eq!(view["sets"], json!([]));
    assert!(view["createdAt"].is_string());
}

#[test]
fn every_command_is_registered() {
    let service = service();
    assert_eq!(
        service.commands(),
        vec![
            "match.create",
            "match.delete",
            "match.edit_score",
            "match.edit_set",
            "match.get",
            "match.list",
            "match.pause",
            "match.reset_set",
            "match.resume",
            "match.score",
            "match.undo",
        ]
    );
}

#[test]
fn point_then_undo() {
    let service = service();
    let id = create(&service, guest());

    let view = score(&service, id, "team2").unwrap();
    assert_eq!(view["team2Score"], 1);
    assert_eq!(view["lastScoringTeam"], "team2");
    assert_eq!(view["undoUsed"], false);

    let view = run(&service, "match.undo", id).unwrap();
    assert_eq!(view["team2Score"], 0);
    assert_eq!(view["undoUsed"], true);
    assert_eq!(view["lastScoringTeam"], "team2");

    let err = run(&service, "match.undo", id).unwrap_err();
    assert_eq!(err.kind(), "UndoAlreadyUsed");
    assert_eq!(err.status_code(), 422);
}

#[test]
fn set_point_closes_set_and_undo_reopens_it() {
    let service = service();
    let id = create(&service, guest());
    set_point(&service, id);

    let view = score(&service, id, "team1").unwrap();
    assert_eq!(view["sets"][0]["team1Points"], 25);
    assert_eq!(view["team1Sets"], 1);
    assert_eq!(view["currentSet"], 2);

    let view = run(&service, "match.undo", id).unwrap();
    assert_eq!(view["sets"], json!([]));
    assert_eq!(view["currentSet"], 1);
    assert_eq!(view["team1Score"], 24);
    assert_eq!(view["team2Score"], 20);
}

#[test]
fn edit_score_rejects_negative_points() {
    let service = service();
    let id = create(&service, guest());
    let err = service
        .dispatch(
            "match.edit_score",
            json!({ "id": id, "team1Points": -2, "team2Points": 3 }),
            guest(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidScore");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn fractional_and_huge_points_are_invalid_scores() {
    let service = service();
    let id = create(&service, guest());

    let err = service
        .dispatch(
            "match.edit_score",
            json!({ "id": id, "team1Points": 2.5, "team2Points": 3 }),
            guest(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidScore");
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("2.5"));

    let err = service
        .dispatch(
            "match.edit_set",
            json!({ "id": id, "setNumber": 1, "team1Points": 25, "team2Points": u64::MAX }),
            guest(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidScore");
    assert!(err.to_string().contains(&u64::MAX.to_string()));

    let err = service
        .dispatch(
            "match.edit_score",
            json!({ "id": id, "team1Points": "two", "team2Points": 3 }),
            guest(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "DecodeFailed");

    let view = service.dispatch("match.get", json!({ "id": id }), guest()).unwrap();
    assert_eq!(view["team1Score"], 0);
    assert!(view.get("previousTeam1Score").is_none());
}

#[test]
fn edit_score_reports_previous_score() {
    let service = service();
    let id = create(&service, guest());
    score(&service, id, "team1").unwrap();

    let view = service
        .dispatch(
            "match.edit_score",
            json!({ "id": id, "team1Points": 10, "team2Points": 12 }),
            guest(),
        )
        .unwrap();
    assert_eq!(view["previousTeam1Score"], 1);
    assert_eq!(view["previousTeam2Score"], 0);
    assert!(view.get("lastScoringTeam").is_none());
}

#[test]
fn edit_set_reopens_completed_match() {
    let service = service();
    let id = create(&service, guest());
    for _ in 0..3 {
        set_point(&service, id);
        score(&service, id, "team1").unwrap();
    }
    let view = run(&service, "match.get", id).unwrap();
    assert_eq!(view["status"], "COMPLETED");

    let view = service
        .dispatch(
            "match.edit_set",
            json!({ "id": id, "setNumber": 3, "team1Points": 20, "team2Points": 25 }),
            guest(),
        )
        .unwrap();
    assert_eq!(view["status"], "IN_PROGRESS");
    assert_eq!(view["team1Sets"], 2);
    assert_eq!(view["team2Sets"], 1);
    assert_eq!(view["currentSet"], 4);
}

#[test]
fn edit_set_needs_a_finished_score() {
    let service = service();
    let id = create(&service, guest());
    set_point(&service, id);
    score(&service, id, "team1").unwrap();

    let err = service
        .dispatch(
            "match.edit_set",
            json!({ "id": id, "setNumber": 1, "team1Points": 25, "team2Points": 24 }),
            guest(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidSetScore");

    let err = service
        .dispatch(
            "match.edit_set",
            json!({ "id": id, "setNumber": 4, "team1Points": 25, "team2Points": 10 }),
            guest(),
        )
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotFound(ref what) if what == "set 4"));
}

#[test]
fn pause_blocks_scoring_until_resume() {
    let service = service();
    let id = create(&service, guest());

    let view = run(&service, "match.pause", id).unwrap();
    assert_eq!(view["status"], "PAUSED");
    assert_eq!(score(&service, id, "team1").unwrap_err().kind(), "MatchNotActive");
    assert_eq!(
        run(&service, "match.pause", id).unwrap_err().kind(),
        "InvalidTransition"
    );

    run(&service, "match.resume", id).unwrap();
    assert_eq!(score(&service, id, "team1").unwrap()["team1Score"], 1);
}

#[test]
fn reset_set_zeroes_live_score() {
    let service = service();
    let id = create(&service, guest());
    score(&service, id, "team1").unwrap();
    score(&service, id, "team2").unwrap();

    let view = run(&service, "match.reset_set", id).unwrap();
    assert_eq!(view["team1Score"], 0);
    assert_eq!(view["team2Score"], 0);
    assert_eq!(run(&service, "match.undo", id).unwrap_err().kind(), "NothingToUndo");
}

#[test]
fn list_filters_active_matches() {
    let service = service();
    let a = create(&service, guest());
    let b = create(&service, guest());
    run(&service, "match.pause", b).unwrap();

    let all = service.dispatch("match.list", json!({}), guest()).unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let active = service
        .dispatch("match.list", json!({ "status": "active" }), guest())
        .unwrap();
    let ids: Vec<u64> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![a]);

    let err = service
        .dispatch("match.list", json!({ "status": "sideways" }), guest())
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn delete_hides_the_match() {
    let service = service();
    let id = create(&service, guest());

    let body = run(&service, "match.delete", id).unwrap();
    assert_eq!(body, json!({ "id": id, "deleted": true }));
    assert_eq!(run(&service, "match.get", id).unwrap_err().status_code(), 404);
    assert_eq!(score(&service, id, "team1").unwrap_err().kind(), "NotFound");
}

#[test]
fn guards_reject_missing_fields() {
    let service = service();
    let err = service
        .dispatch("match.score", json!({ "team": "team1" }), guest())
        .unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));

    let err = service
        .dispatch("match.create", json!({ "team1Name": "Sharks" }), guest())
        .unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
}

#[test]
fn unknown_team_fails_to_decode() {
    let service = service();
    let id = create(&service, guest());
    let err = score(&service, id, "team3").unwrap_err();
    assert!(matches!(err, HandlerError::DecodeFailed(_)));
}

#[test]
fn dispatch_request_renders_errors() {
    let service = service();
    let response = service.dispatch_request(&CommandRequest {
        command: "match.get".to_string(),
        input: json!({ "id": 99 }),
        session_variables: Default::default(),
    });
    assert_eq!(response.status, 404);
    assert_eq!(response.body["kind"], "NotFound");
    assert_eq!(response.body["error"], "match 99 not found");
}

#[cfg(feature = "emitter")]
#[test]
fn completion_notices_follow_the_commit() {
    use std::sync::mpsc;
    use std::time::Duration;
    use volleyscore::emitter::{MATCH_COMPLETED, SET_COMPLETED};

    let service = service();
    let (tx, rx) = mpsc::channel::<(String, String)>();
    for event in [SET_COMPLETED, MATCH_COMPLETED] {
        let tx = tx.clone();
        service.repo().notifier().on(event, move |payload: String| {
            let _ = tx.send((event.to_string(), payload));
        });
    }

    let id = create(&service, guest());
    for _ in 0..3 {
        set_point(&service, id);
        score(&service, id, "team1").unwrap();
    }

    let mut received = Vec::new();
    while let Ok(notice) = rx.recv_timeout(Duration::from_secs(1)) {
        received.push(notice);
        if received.len() == 4 {
            break;
        }
    }
    let sets = received.iter().filter(|(e, _)| e == SET_COMPLETED).count();
    assert_eq!(sets, 3);

    let (_, payload) = received
        .iter()
        .find(|(e, _)| e == MATCH_COMPLETED)
        .expect("match.completed notice");
    let body: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(body["matchId"], id);
    assert_eq!(body["winner"], "team1");
}
