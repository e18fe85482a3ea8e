use models::domains::{participants, quiz_attempts, quizzes, tournaments, users};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const PARTICIPANT_UNIQUE_INDEX: &str = "idx_participants_tournament_user";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(users::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(users::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(users::Column::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(users::Column::Avatar)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(users::Column::TotalQuizzes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(users::Column::TotalScore)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(users::Column::AverageScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(users::Column::Badges).json().not_null())
                    .col(
                        ColumnDef::new(users::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(users::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(quizzes::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(quizzes::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(quizzes::Column::Title).string().not_null())
                    .col(
                        ColumnDef::new(quizzes::Column::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(quizzes::Column::Category).string().not_null())
                    .col(
                        ColumnDef::new(quizzes::Column::Difficulty)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(quizzes::Column::Questions).json().not_null())
                    .col(
                        ColumnDef::new(quizzes::Column::CreatorId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(quizzes::Column::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(quizzes::Column::Tags).json().not_null())
                    .col(
                        ColumnDef::new(quizzes::Column::TotalAttempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(quizzes::Column::AverageScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(quizzes::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(quiz_attempts::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(quiz_attempts::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(quiz_attempts::Column::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(quiz_attempts::Column::QuizId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(quiz_attempts::Column::Score)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(quiz_attempts::Column::MaxScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(quiz_attempts::Column::Percentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(quiz_attempts::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(quiz_attempts::Entity, quiz_attempts::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(tournaments::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tournaments::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(tournaments::Column::Title).string().not_null())
                    .col(
                        ColumnDef::new(tournaments::Column::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::QuizId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::MaxParticipants)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::ParticipantCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::InviteCode)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(tournaments::Column::Prizes).json().not_null())
                    .col(
                        ColumnDef::new(tournaments::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(tournaments::Entity, tournaments::Column::QuizId)
                            .to(quizzes::Entity, quizzes::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(participants::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(participants::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(participants::Column::TournamentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(participants::Column::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(participants::Column::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(participants::Column::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(participants::Column::Answers)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(participants::Column::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(participants::Entity, participants::Column::TournamentId)
                            .to(tournaments::Entity, tournaments::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(participants::Entity, participants::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(PARTICIPANT_UNIQUE_INDEX)
                    .table(participants::Entity)
                    .col(participants::Column::TournamentId)
                    .col(participants::Column::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(participants::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tournaments::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(quiz_attempts::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(quizzes::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(users::Entity).to_owned())
            .await
    }
}
