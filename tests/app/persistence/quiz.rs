use app::error::ArenaError;
use app::persistence::quizzes::{create_quiz, get_quiz, quiz_view, submit_quiz};
use app::persistence::users::{get_user, global_leaderboard};
use app::state::AppState;
use models::params::quiz::SubmitQuizParams;

use super::super::common::*;

pub(crate) async fn test_quiz_validation(state: &AppState) {
    let author = seed_user(state, "author").await;

    let err = create_quiz(&state.conn, quiz_params(vec![question(3, 10)]), &author)
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::Validation(_)), "{err:?}");

    let err = create_quiz(&state.conn, quiz_params(vec![question(-1, 10)]), &author)
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::Validation(_)), "{err:?}");

    let mut params = quiz_params(vec![question(0, 10)]);
    params.category = "Cooking".to_owned();
    let err = create_quiz(&state.conn, params, &author).await.unwrap_err();
    assert!(matches!(err, ArenaError::Validation(_)), "{err:?}");

    // Two answers worth more together than a score can hold.
    let params = quiz_params(vec![question(0, 2_000_000_000), question(0, 2_000_000_000)]);
    let err = create_quiz(&state.conn, params, &author).await.unwrap_err();
    assert!(matches!(err, ArenaError::Validation(_)), "{err:?}");

    let mut params = quiz_params(vec![question(0, 10)]);
    params.questions[0].points = None;
    let quiz = create_quiz(&state.conn, params, &author).await.unwrap();
    let view = quiz_view(quiz.clone(), false).unwrap();
    assert_eq!(view.max_score, 10);
    assert_eq!(view.questions[0].time_limit, 30);
    assert_eq!(view.questions[0].correct_answer, None);
    assert_eq!(quiz_view(quiz, true).unwrap().questions[0].correct_answer, Some(0));
}

pub(crate) async fn test_quiz_submission(state: &AppState) {
    let author = seed_user(state, "author").await;
    let player = seed_user(state, "player").await;
    let quiz_id = seed_quiz(state, &author).await;

    let result = submit_quiz(
        &state.conn,
        &quiz_id,
        &player,
        SubmitQuizParams {
            answers: vec![Some(1), Some(0)],
        },
    )
    .await
    .unwrap();
    assert_eq!((result.score, result.max_score), (30, 30));
    assert_eq!(result.percentage, 100.0);
    assert!(result.results.iter().all(|r| r.is_correct));
    assert_eq!(result.stats.total_quizzes, 1);
    assert_eq!(result.stats.badges, vec!["Perfect Score".to_owned()]);

    let result = submit_quiz(
        &state.conn,
        &quiz_id,
        &player,
        SubmitQuizParams {
            answers: vec![Some(0)],
        },
    )
    .await
    .unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.percentage, 0.0);
    assert_eq!(result.results[1].selected_answer, None);

    let user = get_user(&state.conn, &player).await.unwrap();
    assert_eq!(user.total_quizzes, 2);
    assert_eq!(user.total_score, 30);
    assert_eq!(user.average_score, 15.0);

    let quiz = get_quiz(&state.conn, &quiz_id).await.unwrap();
    assert_eq!(quiz.total_attempts, 2);
    assert_eq!(quiz.average_score, 50.0);

    let board = global_leaderboard(&state.conn).await.unwrap();
    assert_eq!(board[0].user_id, player);

    let err = submit_quiz(&state.conn, "missing", &player, SubmitQuizParams { answers: vec![] })
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::NotFound("Quiz")), "{err:?}");
}

pub(crate) async fn test_quiz_unreadable(state: &AppState) {
    let author = seed_user(state, "author").await;
    let player = seed_user(state, "player").await;
    let quiz_id = seed_quiz(state, &author).await;
    corrupt_quiz(state, &quiz_id).await;

    let quiz = get_quiz(&state.conn, &quiz_id).await.unwrap();
    let err = quiz_view(quiz, false).unwrap_err();
    assert!(matches!(err, ArenaError::StorageUnavailable(_)), "{err:?}");

    let err = submit_quiz(
        &state.conn,
        &quiz_id,
        &player,
        SubmitQuizParams {
            answers: vec![Some(1), Some(0)],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ArenaError::StorageUnavailable(_)), "{err:?}");

    let user = get_user(&state.conn, &player).await.unwrap();
    assert_eq!(user.total_quizzes, 0);
    let quiz = get_quiz(&state.conn, &quiz_id).await.unwrap();
    assert_eq!(quiz.total_attempts, 0);
}
