use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use tracing::{debug, info};

use models::params::tournament::SubmitTournamentParams;
use models::schemas::leaderboard::LeaderboardEntry;
use models::schemas::tournament::{AnswerRecord, SubmitResultSchema};

use super::dtos::{ParticipantFinishedPayload, TournamentEvent};
use super::lifecycle::{self, TournamentAction};
use super::{ranking, scoring};
use crate::error::ArenaError;
use crate::persistence::{quizzes, tournaments};
use crate::state::AppState;

/// Scores a participant's one and only submission for an active tournament.
///
/// Fails with `InvalidState` unless active, `NotRegistered` if the user never
/// joined, `AlreadySubmitted` if a result was already recorded. The stored
/// result is never overwritten.
pub async fn submit_answers(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
    params: SubmitTournamentParams,
) -> Result<SubmitResultSchema, ArenaError> {
    submit_answers_at(state, tournament_id, user_id, params, Utc::now()).await
}

pub async fn submit_answers_at(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
    params: SubmitTournamentParams,
    now: DateTime<Utc>,
) -> Result<SubmitResultSchema, ArenaError> {
    let guard = state.tournament_locks.acquire(tournament_id).await;
    let result = submit_locked(state, tournament_id, user_id, params, now).await;
    drop(guard);
    state.tournament_locks.evict_idle();

    match result {
        Ok((submitted, leaderboard)) => {
            info!(
                tournament_id,
                user_id,
                score = submitted.score,
                rank = submitted.rank,
                "submission scored"
            );
            state.notifier.publish(
                tournament_id,
                TournamentEvent::ParticipantFinished(ParticipantFinishedPayload {
                    participant_id: user_id.to_owned(),
                    score: submitted.score,
                    leaderboard,
                }),
            );
            Ok(submitted)
        }
        Err(e) => {
            debug!(tournament_id, user_id, "submission rejected: {}", e);
            Err(e)
        }
    }
}

async fn submit_locked(
    state: &AppState,
    tournament_id: &str,
    user_id: &str,
    params: SubmitTournamentParams,
    now: DateTime<Utc>,
) -> Result<(SubmitResultSchema, Vec<LeaderboardEntry>), ArenaError> {
    let txn = state.conn.begin().await?;

    let tournament = tournaments::get_tournament(&txn, tournament_id).await?;
    let status = tournaments::sync_status(&txn, &tournament, now).await?;
    lifecycle::ensure_allowed(TournamentAction::Submit, status)?;

    let participant = tournaments::find_participant(&txn, tournament_id, user_id)
        .await?
        .ok_or(ArenaError::NotRegistered)?;
    if participant.completed_at.is_some() {
        return Err(ArenaError::AlreadySubmitted);
    }

    let quiz = quizzes::get_quiz(&txn, &tournament.quiz_id).await?;
    let questions = quizzes::stored_questions(&quiz)?;

    let selected: Vec<Option<i32>> = params
        .answers
        .iter()
        .copied()
        .map(|answer| answer.and_then(|a| a.selected_answer))
        .collect();
    let card = scoring::score(&questions, &selected)?;
    let max_score = scoring::max_score(&questions)?;

    let records: Vec<AnswerRecord> = card
        .per_question
        .iter()
        .map(|result| AnswerRecord {
            question_index: result.question_index,
            selected_answer: result.selected_answer,
            time_spent: params
                .answers
                .get(result.question_index)
                .copied()
                .flatten()
                .map_or(0, |a| a.time_spent),
            is_correct: result.is_correct,
        })
        .collect();

    let recorded = tournaments::complete_participant(
        &txn,
        participant.id,
        card.total_score,
        AnswerRecord::to_value(&records),
        now,
    )
    .await?;
    if !recorded {
        return Err(ArenaError::AlreadySubmitted);
    }

    let leaderboard =
        ranking::leaderboard(tournaments::participants_with_users(&txn, tournament_id).await?);

    txn.commit().await?;

    let result = SubmitResultSchema {
        score: card.total_score,
        max_score,
        rank: ranking::rank_of(&leaderboard, user_id),
    };

    Ok((result, leaderboard))
}
