use models::domains::sea_orm_active_enums::TournamentStatus;
use sea_orm::{DbErr, SqlErr};

/// Every way a core operation can fail. None of them leave partial writes behind.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Operation not allowed while tournament is {0}")]
    InvalidState(TournamentStatus),
    #[error("Tournament is full")]
    Full,
    #[error("Already joined this tournament")]
    AlreadyJoined,
    #[error("Not registered for this tournament")]
    NotRegistered,
    #[error("Answers already submitted")]
    AlreadySubmitted,
    #[error("Only the tournament creator may do that")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("Storage unavailable")]
    StorageUnavailable(String),
}

impl ArenaError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<DbErr> for ArenaError {
    fn from(err: DbErr) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

/// True when `err` is a unique-index violation.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
