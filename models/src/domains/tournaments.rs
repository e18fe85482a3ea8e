use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::TournamentStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tournaments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub quiz_id: String,
    pub created_by: String,
    pub max_participants: i32,
    /// Mirrors the number of rows in `participants`; guarded on write.
    pub participant_count: i32,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
    /// Last persisted status. May lag behind the clock; see `app::core::lifecycle`.
    pub status: TournamentStatus,
    pub is_private: bool,
    #[sea_orm(unique)]
    pub invite_code: Option<String>,
    pub prizes: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quizzes::Entity",
        from = "Column::QuizId",
        to = "super::quizzes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Quizzes,
    #[sea_orm(has_many = "super::participants::Entity")]
    Participants,
}

impl Related<super::quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quizzes.def()
    }
}

impl Related<super::participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
