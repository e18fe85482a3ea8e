use axum::http::StatusCode;
use serde_json::json;

use super::*;

#[tokio::test]
async fn tournament_main() {
    let (app, config) = setup_app().await;
    let owner = token(&config, "owner-id");
    let alice = token(&config, "alice-id");
    let bob = token(&config, "bob-id");
    for (token, name) in [(&owner, "owner"), (&alice, "alice"), (&bob, "bob")] {
        let (status, _) = post(&app, "/users", Some(token), json!({ "username": name })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = post(&app, "/quizzes", Some(&owner), quiz_body()).await;
    let quiz_id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, _) = post(&app, "/tournaments", None, tournament_body(&quiz_id, 2)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = tournament_body(&quiz_id, 1);
    let (status, body) = post(&app, "/tournaments", Some(&owner), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let request = tournament_body(&quiz_id, 2);
    let (status, body) = post(&app, "/tournaments", Some(&owner), request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "upcoming");
    let id = body["data"]["id"].as_str().unwrap().to_owned();
    let join = format!("/tournaments/{id}/join");

    let (status, body) = post_empty(&app, &join, &alice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["participantCount"], 1);

    let (status, body) = post_empty(&app, &join, &alice).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_JOINED");

    let (status, body) = post_empty(&app, &join, &bob).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["participantCount"], 2);

    let (status, body) = post_empty(&app, &join, &owner).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "TOURNAMENT_FULL");

    let answers = json!({ "answers": [{ "selectedAnswer": 1, "timeSpent": 4 }, null] });
    let submit = format!("/tournaments/{id}/submit");
    let (status, body) = post(&app, &submit, Some(&alice), answers).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");

    let (status, body) = get(&app, &format!("/tournaments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["participants"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["participantCount"], 2);

    let (status, body) = get(&app, &format!("/tournaments/{id}/leaderboard"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = get(&app, "/tournaments?status=upcoming", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let cancel = format!("/tournaments/{id}/cancel");
    let (status, body) = post_empty(&app, &cancel, &alice).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, body) = post_empty(&app, &cancel, &owner).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");

    let (status, body) = get(&app, "/tournaments/missing/leaderboard", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tournament not found");
}

#[tokio::test]
async fn tournament_private_invite_code() {
    let (app, config) = setup_app().await;
    let owner = token(&config, "owner-id");
    let alice = token(&config, "alice-id");
    post(&app, "/users", Some(&owner), json!({ "username": "owner" })).await;

    let (_, body) = post(&app, "/quizzes", Some(&owner), quiz_body()).await;
    let quiz_id = body["data"]["id"].as_str().unwrap().to_owned();

    let mut request = tournament_body(&quiz_id, 4);
    request["isPrivate"] = json!(true);
    let (status, body) = post(&app, "/tournaments", Some(&owner), request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["inviteCode"].as_str().unwrap().len(), 6);
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (_, body) = get(&app, &format!("/tournaments/{id}"), Some(&alice)).await;
    assert!(body["data"].get("inviteCode").is_none());

    let (_, body) = get(&app, "/tournaments", None).await;
    assert_eq!(body["data"]["total"], 0);
}
