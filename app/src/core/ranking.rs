//! Leaderboard computation. Always derived from current participant rows, never stored.

use chrono::{DateTime, Utc};
use models::{
    domains::{participants, users},
    schemas::leaderboard::LeaderboardEntry,
};

/// Anything that can be placed on a leaderboard.
pub trait Ranked {
    fn score(&self) -> i32;

    /// `None` while the attempt is still in progress; such entries are never ranked.
    fn completed_at(&self) -> Option<DateTime<Utc>>;
}

impl Ranked for participants::Model {
    fn score(&self) -> i32 {
        self.score
    }

    fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

impl<T: Ranked, U> Ranked for (T, U) {
    fn score(&self) -> i32 {
        self.0.score()
    }

    fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.0.completed_at()
    }
}

/// Orders completed entries by score descending, then completion time ascending,
/// and assigns distinct 1-based ranks. The sort is stable, so entries equal on
/// both keys keep their input order.
pub fn rank<T: Ranked>(entries: impl IntoIterator<Item = T>) -> Vec<(u32, T)> {
    let mut completed: Vec<(DateTime<Utc>, T)> = entries
        .into_iter()
        .filter_map(|entry| entry.completed_at().map(|at| (at, entry)))
        .collect();

    completed.sort_by(|(a_at, a), (b_at, b)| b.score().cmp(&a.score()).then(a_at.cmp(b_at)));

    completed
        .into_iter()
        .enumerate()
        .map(|(i, (_, entry))| (i as u32 + 1, entry))
        .collect()
}

/// Participants joined with their user rows, ordered by participant id.
/// Participants whose user row is gone are skipped.
pub fn leaderboard(
    rows: impl IntoIterator<Item = (participants::Model, Option<users::Model>)>,
) -> Vec<LeaderboardEntry> {
    let rows = rows
        .into_iter()
        .filter_map(|(participant, user)| user.map(|user| (participant, user)));

    rank(rows)
        .into_iter()
        .filter_map(|(rank, (participant, user))| {
            Some(LeaderboardEntry {
                user_id: participant.user_id,
                username: user.username,
                avatar: user.avatar,
                score: participant.score,
                completed_at: participant.completed_at?,
                rank,
            })
        })
        .collect()
}

pub fn rank_of(board: &[LeaderboardEntry], user_id: &str) -> u32 {
    board
        .iter()
        .find(|entry| entry.user_id == user_id)
        .map_or(0, |entry| entry.rank)
}
