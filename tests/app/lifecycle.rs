use app::core::{cancel_tournament, cancel_tournament_at, get_tournament_detail, join_tournament};
use app::error::ArenaError;
use app::persistence::tournaments::get_tournament;
use app::state::AppState;
use models::domains::sea_orm_active_enums::TournamentStatus;

use super::common::*;

pub(super) async fn test_owner_cancels(state: &AppState) {
    let owner = seed_user(state, "owner").await;
    let alice = seed_user(state, "alice").await;
    let quiz = seed_quiz(state, &owner).await;
    let tournament = seed_tournament(state, &quiz, &owner, 5, &Schedule::upcoming()).await;

    let err = cancel_tournament(state, &tournament.id, &alice).await.unwrap_err();
    assert!(matches!(err, ArenaError::Forbidden), "{err:?}");

    let cancelled = cancel_tournament(state, &tournament.id, &owner).await.unwrap();
    assert_eq!(cancelled.status, TournamentStatus::Cancelled);

    let stored = get_tournament(&state.conn, &tournament.id).await.unwrap();
    assert_eq!(stored.status, TournamentStatus::Cancelled);

    let err = join_tournament(state, &tournament.id, &alice).await.unwrap_err();
    assert!(matches!(err, ArenaError::InvalidState(TournamentStatus::Cancelled)), "{err:?}");

    let err = cancel_tournament(state, &tournament.id, &owner).await.unwrap_err();
    assert!(matches!(err, ArenaError::InvalidState(TournamentStatus::Cancelled)), "{err:?}");
}

pub(super) async fn test_cancel_active_but_not_finished(state: &AppState) {
    let owner = seed_user(state, "owner").await;
    let quiz = seed_quiz(state, &owner).await;
    let schedule = Schedule::upcoming();

    let finished = seed_tournament(state, &quiz, &owner, 5, &schedule).await;
    let err = cancel_tournament_at(state, &finished.id, &owner, schedule.after_end())
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::InvalidState(TournamentStatus::Completed)), "{err:?}");

    let running = seed_tournament(state, &quiz, &owner, 5, &schedule).await;
    let cancelled = cancel_tournament_at(state, &running.id, &owner, schedule.during(1))
        .await
        .unwrap();
    assert_eq!(cancelled.status, TournamentStatus::Cancelled);
}

pub(super) async fn test_detail_reports_derived_status(state: &AppState) {
    let owner = seed_user(state, "owner").await;
    let alice = seed_user(state, "alice").await;
    let quiz = seed_quiz(state, &owner).await;
    let tournament = seed_tournament(state, &quiz, &owner, 5, &Schedule::upcoming()).await;
    join_tournament(state, &tournament.id, &alice).await.unwrap();

    let detail = get_tournament_detail(state, &tournament.id, None).await.unwrap();
    assert_eq!(detail.tournament.status, TournamentStatus::Upcoming);
    assert_eq!(detail.tournament.participant_count, 1);
    assert_eq!(detail.participants.len(), 1);
    assert_eq!(detail.participants[0].user_id, alice);
    assert_eq!(detail.participants[0].completed_at, None);

    let err = get_tournament_detail(state, "missing", None).await.unwrap_err();
    assert!(matches!(err, ArenaError::NotFound("Tournament")), "{err:?}");
}
