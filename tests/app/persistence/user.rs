use std::sync::Arc;

use futures::future::join_all;

use app::error::ArenaError;
use app::persistence::users::{create_user, get_profile, global_leaderboard};
use app::state::AppState;
use models::params::user::CreateUserParams;

use super::super::common::*;

pub(crate) async fn test_user(state: &AppState) {
    let alice = seed_user(state, "alice").await;

    let err = create_user(
        &state.conn,
        "someone-else",
        CreateUserParams {
            username: "alice".to_owned(),
            avatar: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ArenaError::Validation(_)), "{err:?}");

    let err = create_user(
        &state.conn,
        &alice,
        CreateUserParams {
            username: "alice2".to_owned(),
            avatar: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ArenaError::Validation(_)), "{err:?}");

    seed_quiz(state, &alice).await;
    let profile = get_profile(&state.conn, &alice).await.unwrap();
    assert_eq!(profile.user.username, "alice");
    assert_eq!(profile.created_quizzes, 1);
    assert_eq!(profile.tournaments, 0);
    assert!(profile.user.stats.badges.is_empty());

    let err = get_profile(&state.conn, "ghost").await.unwrap_err();
    assert!(matches!(err, ArenaError::NotFound("User")), "{err:?}");

    let board = global_leaderboard(&state.conn).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].rank, 1);
}

pub(crate) async fn test_concurrent_usernames(state: AppState) {
    let state = Arc::new(state);
    let handles = (0..4).map(|i| {
        let state = state.clone();
        tokio::spawn(async move {
            create_user(
                &state.conn,
                &format!("identity-{i}"),
                CreateUserParams {
                    username: "contested".to_owned(),
                    avatar: String::new(),
                },
            )
            .await
        })
    });
    let results: Vec<_> = join_all(handles).await.into_iter().map(Result::unwrap).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(matches!(result, Err(ArenaError::Validation(_))), "{result:?}");
    }
}
