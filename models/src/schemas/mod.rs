pub mod leaderboard;
pub mod pagination;
pub mod quiz;
pub mod tournament;
pub mod user;
