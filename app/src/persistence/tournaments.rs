use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbConn, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, sea_query::Expr,
};
use tracing::info;

use models::domains::{participants, sea_orm_active_enums::TournamentStatus, tournaments, users};
use models::params::tournament::CreateTournamentParams;
use models::queries::TournamentPaginationQuery;
use models::schemas::pagination::PaginatedData;
use models::schemas::tournament::{Prize, TournamentSchema};

use super::{ID_ALPHABET, quizzes};
use crate::core::lifecycle;
use crate::error::{ArenaError, is_unique_violation};

const TOURNAMENT_ID_LENGTH: usize = 24;
const INVITE_CODE_LENGTH: usize = 6;
const INVITE_CODE_ATTEMPTS: usize = 5;
const INVITE_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

pub fn generate_invite_code() -> String {
    nanoid::nanoid!(INVITE_CODE_LENGTH, &INVITE_ALPHABET)
}

pub async fn create_tournament(
    db: &DbConn,
    params: CreateTournamentParams,
    creator_id: &str,
    now: DateTime<Utc>,
) -> Result<tournaments::Model, ArenaError> {
    lifecycle::validate_schedule(params.start_time, params.end_time, now)?;
    if params.max_participants < 2 {
        return Err(ArenaError::validation("A tournament needs room for at least 2 participants"));
    }
    quizzes::get_quiz(db, &params.quiz_id).await?;
    super::users::get_user(db, creator_id).await?;

    let id = nanoid::nanoid!(TOURNAMENT_ID_LENGTH, &ID_ALPHABET);

    // Invite codes are random; a collision trips the unique index and we draw again.
    let mut attempt = 0;
    let tournament = loop {
        attempt += 1;
        let new_tournament = tournaments::ActiveModel {
            id: Set(id.clone()),
            title: Set(params.title.clone()),
            description: Set(params.description.clone()),
            quiz_id: Set(params.quiz_id.clone()),
            created_by: Set(creator_id.to_owned()),
            max_participants: Set(params.max_participants),
            participant_count: Set(0),
            start_time: Set(params.start_time),
            end_time: Set(params.end_time),
            status: Set(TournamentStatus::Upcoming),
            is_private: Set(params.is_private),
            invite_code: Set(params.is_private.then(generate_invite_code)),
            prizes: Set(Prize::to_value(&params.prizes)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match new_tournament.insert(db).await {
            Ok(tournament) => break tournament,
            Err(e)
                if params.is_private
                    && is_unique_violation(&e)
                    && attempt < INVITE_CODE_ATTEMPTS =>
            {
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    };

    info!(tournament_id = %tournament.id, creator_id, "tournament created");
    Ok(tournament)
}

pub async fn get_tournament<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<tournaments::Model, ArenaError> {
    tournaments::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ArenaError::NotFound("Tournament"))
}

/// SQL condition matching tournaments whose clock-derived status is `status` at `now`.
fn derived_status_condition(status: TournamentStatus, now: DateTime<Utc>) -> Condition {
    use tournaments::Column;

    let open = Column::Status.is_not_in([TournamentStatus::Completed, TournamentStatus::Cancelled]);

    match status {
        TournamentStatus::Upcoming => Condition::all().add(open).add(Column::StartTime.gt(now)),
        TournamentStatus::Active => Condition::all()
            .add(open)
            .add(Column::StartTime.lte(now))
            .add(Column::EndTime.gte(now)),
        TournamentStatus::Completed => Condition::any()
            .add(Column::Status.eq(TournamentStatus::Completed))
            .add(Condition::all().add(open).add(Column::EndTime.lt(now))),
        TournamentStatus::Cancelled => {
            Condition::all().add(Column::Status.eq(TournamentStatus::Cancelled))
        }
    }
}

pub async fn search_tournaments(
    db: &DbConn,
    query: TournamentPaginationQuery,
    viewer: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PaginatedData<TournamentSchema>, ArenaError> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);

    let mut sql_query =
        tournaments::Entity::find().filter(tournaments::Column::IsPrivate.eq(false));

    if let Some(status) = query.status {
        sql_query = sql_query.filter(derived_status_condition(status, now));
    }

    let paginator = sql_query
        .order_by_asc(tournaments::Column::StartTime)
        .order_by_asc(tournaments::Column::Id)
        .paginate(db, limit);

    let total = paginator.num_items().await?;
    let data = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(|t| {
            let status = lifecycle::status_of(&t, now);
            TournamentSchema::new(t, status, viewer)
        })
        .collect();

    Ok(PaginatedData::new(data, page, limit, total))
}

/// All participants of a tournament with their user rows, in join order.
pub async fn participants_with_users<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
) -> Result<Vec<(participants::Model, Option<users::Model>)>, ArenaError> {
    Ok(participants::Entity::find()
        .filter(participants::Column::TournamentId.eq(tournament_id))
        .order_by_asc(participants::Column::Id)
        .find_also_related(users::Entity)
        .all(db)
        .await?)
}

pub async fn get_participants<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
) -> Result<Vec<participants::Model>, ArenaError> {
    Ok(participants::Entity::find()
        .filter(participants::Column::TournamentId.eq(tournament_id))
        .order_by_asc(participants::Column::Id)
        .all(db)
        .await?)
}

pub async fn find_participant<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
    user_id: &str,
) -> Result<Option<participants::Model>, ArenaError> {
    Ok(participants::Entity::find()
        .filter(participants::Column::TournamentId.eq(tournament_id))
        .filter(participants::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

/// Increments `participant_count` only while it is below `max_participants`.
/// Returns false when the tournament was already full.
pub async fn claim_slot<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
) -> Result<bool, ArenaError> {
    let result = tournaments::Entity::update_many()
        .col_expr(
            tournaments::Column::ParticipantCount,
            Expr::col(tournaments::Column::ParticipantCount).add(1),
        )
        .col_expr(tournaments::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(tournaments::Column::Id.eq(tournament_id))
        .filter(
            Expr::col(tournaments::Column::ParticipantCount)
                .lt(Expr::col(tournaments::Column::MaxParticipants)),
        )
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Inserts a fresh participant. A duplicate `(tournament, user)` pair maps to `AlreadyJoined`.
pub async fn insert_participant<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<participants::Model, ArenaError> {
    participants::ActiveModel {
        tournament_id: Set(tournament_id.to_owned()),
        user_id: Set(user_id.to_owned()),
        score: Set(0),
        completed_at: Set(None),
        answers: Set(serde_json::json!([])),
        joined_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ArenaError::AlreadyJoined
        } else {
            e.into()
        }
    })
}

/// Records a scored submission only if none was recorded before.
/// Returns false when `completed_at` was already set.
pub async fn complete_participant<C: ConnectionTrait>(
    db: &C,
    participant_id: i32,
    score: i32,
    answers: serde_json::Value,
    completed_at: DateTime<Utc>,
) -> Result<bool, ArenaError> {
    let result = participants::Entity::update_many()
        .col_expr(participants::Column::Score, Expr::value(score))
        .col_expr(participants::Column::Answers, Expr::value(answers))
        .col_expr(participants::Column::CompletedAt, Expr::value(Some(completed_at)))
        .filter(participants::Column::Id.eq(participant_id))
        .filter(participants::Column::CompletedAt.is_null())
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Moves the stored status from `from` to `to` if nobody changed it meanwhile.
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
    from: TournamentStatus,
    to: TournamentStatus,
) -> Result<bool, ArenaError> {
    lifecycle::validate_transition(from, to)?;

    let result = tournaments::Entity::update_many()
        .col_expr(tournaments::Column::Status, Expr::value(to))
        .col_expr(tournaments::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(tournaments::Column::Id.eq(tournament_id))
        .filter(tournaments::Column::Status.eq(from))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Derives the status at `now` and persists it when the stored column lags.
pub async fn sync_status<C: ConnectionTrait>(
    db: &C,
    tournament: &tournaments::Model,
    now: DateTime<Utc>,
) -> Result<TournamentStatus, ArenaError> {
    let derived = lifecycle::status_of(tournament, now);

    if derived != tournament.status
        && lifecycle::validate_transition(tournament.status, derived).is_ok()
        && set_status(db, &tournament.id, tournament.status, derived).await?
    {
        info!(
            tournament_id = %tournament.id,
            from = %tournament.status,
            to = %derived,
            "tournament status persisted"
        );
    }

    Ok(derived)
}
