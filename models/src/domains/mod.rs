pub mod participants;
pub mod quiz_attempts;
pub mod quizzes;
pub mod sea_orm_active_enums;
pub mod tournaments;
pub mod users;
