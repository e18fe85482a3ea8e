//! Pure answer scoring shared by tournament and standalone quiz submissions.

use models::schemas::quiz::{Question, QuestionResult};

use crate::error::ArenaError;

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreCard {
    pub per_question: Vec<QuestionResult>,
    pub total_score: i32,
}

/// Scores `answers` against `questions` position by position.
///
/// A missing, `None` or out-of-range answer is simply incorrect. Answers beyond
/// the last question are ignored. Fails only when the points do not fit a score.
pub fn score(questions: &[Question], answers: &[Option<i32>]) -> Result<ScoreCard, ArenaError> {
    let per_question: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected_answer = answers.get(index).copied().flatten();
            let is_correct = selected_answer == Some(question.correct_answer);

            QuestionResult {
                question_index: index,
                selected_answer,
                correct_answer: question.correct_answer,
                is_correct,
                points: if is_correct { question.points } else { 0 },
            }
        })
        .collect();

    let total_score = sum_points(per_question.iter().map(|r| r.points))?;

    Ok(ScoreCard {
        per_question,
        total_score,
    })
}

/// Highest achievable score, independent of any submission.
pub fn max_score(questions: &[Question]) -> Result<i32, ArenaError> {
    sum_points(questions.iter().map(|q| q.points))
}

fn sum_points(mut points: impl Iterator<Item = i32>) -> Result<i32, ArenaError> {
    points
        .try_fold(0i32, i32::checked_add)
        .ok_or_else(|| ArenaError::validation("Quiz is worth more points than a score can hold"))
}

/// Percentage of `max_score` achieved; 0 for a quiz worth nothing.
pub fn percentage(score: i32, max_score: i32) -> f64 {
    if max_score <= 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(max_score) * 100.0
}
