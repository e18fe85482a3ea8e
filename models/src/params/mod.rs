pub mod quiz;
pub mod tournament;
pub mod user;
