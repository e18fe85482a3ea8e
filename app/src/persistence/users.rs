use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use models::domains::{participants, quizzes, users};
use models::params::user::CreateUserParams;
use models::schemas::user::{GlobalRankSchema, UserProfileSchema, UserSchema, UserStatsSchema};

use crate::error::{ArenaError, is_unique_violation};

const GLOBAL_LEADERBOARD_SIZE: u64 = 50;

/// Registers the profile of an identity issued elsewhere.
pub async fn create_user(
    db: &DbConn,
    id: &str,
    params: CreateUserParams,
) -> Result<users::Model, ArenaError> {
    if users::Entity::find_by_id(id).one(db).await?.is_some() {
        return Err(ArenaError::validation("Profile already exists"));
    }

    let existing_username = users::Entity::find()
        .filter(users::Column::Username.eq(&params.username))
        .one(db)
        .await?;
    if existing_username.is_some() {
        return Err(ArenaError::validation("Username already taken"));
    }

    let now = Utc::now();
    let user = users::ActiveModel {
        id: Set(id.to_owned()),
        username: Set(params.username),
        avatar: Set(params.avatar),
        total_quizzes: Set(0),
        total_score: Set(0),
        average_score: Set(0.0),
        badges: Set(serde_json::json!([])),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ArenaError::validation("Username already taken")
        } else {
            e.into()
        }
    })?;

    Ok(user)
}

pub async fn get_user<C: ConnectionTrait>(db: &C, id: &str) -> Result<users::Model, ArenaError> {
    users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ArenaError::NotFound("User"))
}

pub async fn get_profile(db: &DbConn, id: &str) -> Result<UserProfileSchema, ArenaError> {
    let user = get_user(db, id).await?;

    let created_quizzes = quizzes::Entity::find()
        .filter(quizzes::Column::CreatorId.eq(id))
        .count(db)
        .await?;
    let tournaments = participants::Entity::find()
        .filter(participants::Column::UserId.eq(id))
        .count(db)
        .await?;

    Ok(UserProfileSchema {
        user: UserSchema::from(user),
        created_quizzes,
        tournaments,
    })
}

/// Best average first, total score breaks ties.
pub async fn global_leaderboard(db: &DbConn) -> Result<Vec<GlobalRankSchema>, ArenaError> {
    let users = users::Entity::find()
        .order_by_desc(users::Column::AverageScore)
        .order_by_desc(users::Column::TotalScore)
        .order_by_asc(users::Column::CreatedAt)
        .limit(GLOBAL_LEADERBOARD_SIZE)
        .all(db)
        .await?;

    Ok(users
        .into_iter()
        .enumerate()
        .map(|(index, user)| GlobalRankSchema {
            rank: index + 1,
            user_id: user.id,
            username: user.username,
            avatar: user.avatar,
            total_quizzes: user.total_quizzes,
            total_score: user.total_score,
            average_score: user.average_score,
            badges: serde_json::from_value(user.badges).unwrap_or_default(),
        })
        .collect())
}

pub(crate) async fn save_stats<C: ConnectionTrait>(
    db: &C,
    user: users::Model,
    stats: &UserStatsSchema,
) -> Result<(), ArenaError> {
    let mut user = user.into_active_model();
    user.total_quizzes = Set(stats.total_quizzes);
    user.total_score = Set(stats.total_score);
    user.average_score = Set(stats.average_score);
    user.badges = Set(serde_json::to_value(&stats.badges).unwrap_or_default());
    user.updated_at = Set(Utc::now());
    user.update(db).await?;
    Ok(())
}
