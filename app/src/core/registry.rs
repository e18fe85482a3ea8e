use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use tracing::{debug, info};

use models::schemas::tournament::JoinResultSchema;

use super::dtos::{ParticipantJoinedPayload, TournamentEvent};
use super::lifecycle::{self, TournamentAction};
use crate::error::ArenaError;
use crate::persistence::{tournaments, users};
use crate::state::AppState;

/// Registers `user_id` for an upcoming tournament.
///
/// Fails with, in order of precedence: `InvalidState` unless the tournament is
/// upcoming, `Full` once every slot is taken, `AlreadyJoined` on a repeat join.
pub async fn join_tournament(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
) -> Result<JoinResultSchema, ArenaError> {
    join_tournament_at(state, tournament_id, user_id, Utc::now()).await
}

pub async fn join_tournament_at(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<JoinResultSchema, ArenaError> {
    let guard = state.tournament_locks.acquire(tournament_id).await;
    let result = join_locked(state, tournament_id, user_id, now).await;
    drop(guard);
    state.tournament_locks.evict_idle();

    match &result {
        Ok(joined) => {
            info!(
                tournament_id,
                user_id,
                participant_count = joined.participant_count,
                "participant joined"
            );
            state.notifier.publish(
                tournament_id,
                TournamentEvent::ParticipantJoined(ParticipantJoinedPayload {
                    participant_count: joined.participant_count,
                }),
            );
        }
        Err(e) => debug!(tournament_id, user_id, "join rejected: {}", e),
    }

    result
}

async fn join_locked(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<JoinResultSchema, ArenaError> {
    let txn = state.conn.begin().await?;

    let tournament = tournaments::get_tournament(&txn, tournament_id).await?;
    let status = tournaments::sync_status(&txn, &tournament, now).await?;
    lifecycle::ensure_allowed(TournamentAction::Join, status)?;
    users::get_user(&txn, user_id).await?;

    if !tournaments::claim_slot(&txn, tournament_id).await? {
        return Err(ArenaError::Full);
    }
    tournaments::insert_participant(&txn, tournament_id, user_id, now).await?;

    let participant_count = tournaments::get_tournament(&txn, tournament_id)
        .await?
        .participant_count;

    txn.commit().await?;

    Ok(JoinResultSchema { participant_count })
}
