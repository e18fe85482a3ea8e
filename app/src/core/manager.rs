use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use tracing::info;

use models::domains::sea_orm_active_enums::TournamentStatus;
use models::params::tournament::CreateTournamentParams;
use models::schemas::leaderboard::LeaderboardEntry;
use models::schemas::tournament::{ParticipantSchema, TournamentDetailSchema, TournamentSchema};

use super::lifecycle::{self, TournamentAction};
use super::ranking;
use crate::error::ArenaError;
use crate::persistence::tournaments;
use crate::state::AppState;

pub async fn create_tournament(
    state: &AppState,
    params: CreateTournamentParams,
    creator_id: &str,
) -> Result<TournamentSchema, ArenaError> {
    let now = Utc::now();
    let tournament = tournaments::create_tournament(&state.conn, params, creator_id, now).await?;
    let status = lifecycle::status_of(&tournament, now);
    Ok(TournamentSchema::new(tournament, status, Some(creator_id)))
}

/// Tournament with its clock-derived status and participant list. Never mutates.
pub async fn get_tournament_detail(
    state: &AppState,
    tournament_id: &str,
    viewer: Option<&str>,
) -> Result<TournamentDetailSchema, ArenaError> {
    let tournament = tournaments::get_tournament(&state.conn, tournament_id).await?;
    let participants = tournaments::get_participants(&state.conn, tournament_id).await?;
    let status = lifecycle::status_of(&tournament, Utc::now());

    Ok(TournamentDetailSchema {
        tournament: TournamentSchema::new(tournament, status, viewer),
        participants: participants.into_iter().map(ParticipantSchema::from).collect(),
    })
}

/// Ranked completed participants, read from a single query so the snapshot is consistent.
pub async fn get_leaderboard(
    state: &AppState,
    tournament_id: &str,
) -> Result<Vec<LeaderboardEntry>, ArenaError> {
    tournaments::get_tournament(&state.conn, tournament_id).await?;
    let rows = tournaments::participants_with_users(&state.conn, tournament_id).await?;
    Ok(ranking::leaderboard(rows))
}

pub async fn cancel_tournament(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
) -> Result<TournamentSchema, ArenaError> {
    cancel_tournament_at(state, tournament_id, user_id, Utc::now()).await
}

/// Only the creator may cancel, and only before the tournament has finished.
pub async fn cancel_tournament_at(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<TournamentSchema, ArenaError> {
    let guard = state.tournament_locks.acquire(tournament_id).await;
    let result = cancel_locked(state, tournament_id, user_id, now).await;
    drop(guard);
    state.tournament_locks.evict_idle();

    if result.is_ok() {
        info!(tournament_id, user_id, "tournament cancelled");
    }
    result
}

async fn cancel_locked(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<TournamentSchema, ArenaError> {
    let txn = state.conn.begin().await?;

    let tournament = tournaments::get_tournament(&txn, tournament_id).await?;
    if tournament.created_by != user_id {
        return Err(ArenaError::Forbidden);
    }

    let status = lifecycle::status_of(&tournament, now);
    lifecycle::ensure_allowed(TournamentAction::Cancel, status)?;

    // The stored column may lag, so the swap is keyed on what is actually stored.
    if !tournaments::set_status(&txn, tournament_id, tournament.status, TournamentStatus::Cancelled)
        .await?
    {
        return Err(ArenaError::InvalidState(status));
    }

    let tournament = tournaments::get_tournament(&txn, tournament_id).await?;
    txn.commit().await?;

    Ok(TournamentSchema::new(tournament, TournamentStatus::Cancelled, Some(user_id)))
}
