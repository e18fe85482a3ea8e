use std::sync::Arc;

use futures::future::join_all;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use app::core::{
    ParticipantJoinedPayload, RecordingNotifier, TournamentEvent, join_tournament,
    join_tournament_at,
};
use app::error::ArenaError;
use app::persistence::tournaments::get_tournament;
use app::state::AppState;
use models::domains::{participants, sea_orm_active_enums::TournamentStatus};

use super::common::*;

async fn participant_rows(state: &AppState, tournament_id: &str) -> u64 {
    participants::Entity::find()
        .filter(participants::Column::TournamentId.eq(tournament_id))
        .count(&state.conn)
        .await
        .unwrap()
}

pub(super) async fn test_join_notifies(state: &AppState, notifier: &RecordingNotifier) {
    let owner = seed_user(state, "owner").await;
    let alice = seed_user(state, "alice").await;
    let quiz = seed_quiz(state, &owner).await;
    let tournament = seed_tournament(state, &quiz, &owner, 5, &Schedule::upcoming()).await;

    let joined = join_tournament(state, &tournament.id, &alice).await.unwrap();
    assert_eq!(joined.participant_count, 1);

    let stored = get_tournament(&state.conn, &tournament.id).await.unwrap();
    assert_eq!(stored.participant_count, 1);
    assert_eq!(participant_rows(state, &tournament.id).await, 1);

    assert_eq!(
        notifier.events(),
        vec![(
            tournament.id.clone(),
            TournamentEvent::ParticipantJoined(ParticipantJoinedPayload {
                participant_count: 1
            })
        )]
    );
}

pub(super) async fn test_single_slot(state: &AppState, notifier: &RecordingNotifier) {
    let owner = seed_user(state, "owner").await;
    let a = seed_user(state, "user_a").await;
    let b = seed_user(state, "user_b").await;
    let quiz = seed_quiz(state, &owner).await;
    let tournament = seed_tournament(state, &quiz, &owner, 1, &Schedule::upcoming()).await;

    join_tournament(state, &tournament.id, &a).await.unwrap();
    let err = join_tournament(state, &tournament.id, &b).await.unwrap_err();
    assert!(matches!(err, ArenaError::Full), "{err:?}");

    // Capacity is checked before membership.
    let err = join_tournament(state, &tournament.id, &a).await.unwrap_err();
    assert!(matches!(err, ArenaError::Full), "{err:?}");

    assert_eq!(participant_rows(state, &tournament.id).await, 1);
    assert_eq!(notifier.events().len(), 1);
}

pub(super) async fn test_duplicate_join(state: &AppState) {
    let owner = seed_user(state, "owner").await;
    let alice = seed_user(state, "alice").await;
    let quiz = seed_quiz(state, &owner).await;
    let tournament = seed_tournament(state, &quiz, &owner, 5, &Schedule::upcoming()).await;

    join_tournament(state, &tournament.id, &alice).await.unwrap();
    let err = join_tournament(state, &tournament.id, &alice).await.unwrap_err();
    assert!(matches!(err, ArenaError::AlreadyJoined), "{err:?}");

    let stored = get_tournament(&state.conn, &tournament.id).await.unwrap();
    assert_eq!(stored.participant_count, 1);
}

pub(super) async fn test_join_requires_upcoming(state: &AppState) {
    let owner = seed_user(state, "owner").await;
    let alice = seed_user(state, "alice").await;
    let quiz = seed_quiz(state, &owner).await;
    let schedule = Schedule::upcoming();
    let tournament = seed_tournament(state, &quiz, &owner, 5, &schedule).await;

    let err = join_tournament_at(state, &tournament.id, &alice, schedule.during(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::InvalidState(TournamentStatus::Active)), "{err:?}");

    let err = join_tournament_at(state, &tournament.id, &alice, schedule.after_end())
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::InvalidState(TournamentStatus::Completed)), "{err:?}");

    let err = join_tournament(state, "missing", &alice).await.unwrap_err();
    assert!(matches!(err, ArenaError::NotFound("Tournament")), "{err:?}");

    let err = join_tournament(state, &tournament.id, "ghost").await.unwrap_err();
    assert!(matches!(err, ArenaError::NotFound("User")), "{err:?}");
}

/// State is checked before capacity.
pub(super) async fn test_state_precedes_capacity(state: &AppState) {
    let owner = seed_user(state, "owner").await;
    let a = seed_user(state, "user_a").await;
    let b = seed_user(state, "user_b").await;
    let quiz = seed_quiz(state, &owner).await;
    let schedule = Schedule::upcoming();
    let tournament = seed_tournament(state, &quiz, &owner, 1, &schedule).await;

    join_tournament(state, &tournament.id, &a).await.unwrap();
    let err = join_tournament_at(state, &tournament.id, &b, schedule.during(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::InvalidState(TournamentStatus::Active)), "{err:?}");
}

pub(super) async fn test_concurrent_joins(state: AppState) {
    const CAPACITY: i32 = 3;
    const CONTENDERS: usize = 12;

    let owner = seed_user(&state, "owner").await;
    let quiz = seed_quiz(&state, &owner).await;
    let tournament = seed_tournament(&state, &quiz, &owner, CAPACITY, &Schedule::upcoming()).await;

    let mut users = Vec::new();
    for i in 0..CONTENDERS {
        users.push(seed_user(&state, &format!("player{i}")).await);
    }

    let state = Arc::new(state);
    let handles = users.into_iter().map(|user| {
        let state = state.clone();
        let id = tournament.id.clone();
        tokio::spawn(async move { join_tournament(&state, &id, &user).await })
    });
    let results: Vec<_> = join_all(handles).await.into_iter().map(Result::unwrap).collect();

    let joined = results.iter().filter(|r| r.is_ok()).count();
    let full = results
        .iter()
        .filter(|r| matches!(r, Err(ArenaError::Full)))
        .count();
    assert_eq!(joined, CAPACITY as usize);
    assert_eq!(full, CONTENDERS - CAPACITY as usize);

    let stored = get_tournament(&state.conn, &tournament.id).await.unwrap();
    assert_eq!(stored.participant_count, CAPACITY);
    assert_eq!(participant_rows(&state, &tournament.id).await, CAPACITY as u64);
    assert_eq!(state.tournament_locks.count(), 0);
}

pub(super) async fn test_concurrent_duplicate_joins(state: AppState) {
    let owner = seed_user(&state, "owner").await;
    let alice = seed_user(&state, "alice").await;
    let quiz = seed_quiz(&state, &owner).await;
    let tournament = seed_tournament(&state, &quiz, &owner, 10, &Schedule::upcoming()).await;

    let state = Arc::new(state);
    let handles = (0..6).map(|_| {
        let state = state.clone();
        let id = tournament.id.clone();
        let user = alice.clone();
        tokio::spawn(async move { join_tournament(&state, &id, &user).await })
    });
    let results: Vec<_> = join_all(handles).await.into_iter().map(Result::unwrap).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(ArenaError::AlreadyJoined)))
    );
    assert_eq!(participant_rows(&state, &tournament.id).await, 1);

    let stored = get_tournament(&state.conn, &tournament.id).await.unwrap();
    assert_eq!(stored.participant_count, 1);
}
