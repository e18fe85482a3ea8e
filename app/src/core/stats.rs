use models::schemas::user::UserStatsSchema;

pub const PERFECT_SCORE_BADGE: &str = "Perfect Score";
pub const QUIZ_MASTER_BADGE: &str = "Quiz Master";
pub const QUIZ_MASTER_THRESHOLD: i32 = 10;

/// Folds one standalone quiz result into a user's aggregate stats.
///
/// `average_score` is the mean raw score per quiz. Badges are awarded once and
/// never revoked.
pub fn apply_quiz_result(stats: &mut UserStatsSchema, score: i32, max_score: i32) {
    stats.total_quizzes += 1;
    stats.total_score += i64::from(score);
    stats.average_score = stats.total_score as f64 / f64::from(stats.total_quizzes);

    if max_score > 0 && score == max_score {
        award(&mut stats.badges, PERFECT_SCORE_BADGE);
    }
    if stats.total_quizzes >= QUIZ_MASTER_THRESHOLD {
        award(&mut stats.badges, QUIZ_MASTER_BADGE);
    }
}

fn award(badges: &mut Vec<String>, badge: &str) {
    if !badges.iter().any(|b| b == badge) {
        badges.push(badge.to_owned());
    }
}
