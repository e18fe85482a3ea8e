use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbConn, EntityTrait, IntoActiveModel, Set,
    TransactionTrait,
};
use tracing::info;

use models::domains::{quiz_attempts, quizzes};
use models::params::quiz::{CreateQuizParams, SubmitQuizParams};
use models::schemas::quiz::{
    DEFAULT_QUESTION_POINTS, DEFAULT_QUESTION_TIME_LIMIT, Question, QuizResultSchema, QuizSchema,
};
use models::schemas::user::UserStatsSchema;

use super::{ID_ALPHABET, users};
use crate::core::{scoring, stats};
use crate::error::ArenaError;

const QUIZ_ID_LENGTH: usize = 24;

pub const QUIZ_CATEGORIES: [&str; 8] = [
    "General Knowledge",
    "Science",
    "History",
    "Sports",
    "Technology",
    "Entertainment",
    "Literature",
    "Geography",
];

fn questions_from_params(params: &CreateQuizParams) -> Result<Vec<Question>, ArenaError> {
    params
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let in_bounds = usize::try_from(q.correct_answer).is_ok_and(|i| i < q.options.len());
            if !in_bounds {
                return Err(ArenaError::validation(format!(
                    "Question {}: correct answer must index one of its options",
                    index + 1
                )));
            }

            Ok(Question {
                question: q.question.clone(),
                options: q.options.clone(),
                correct_answer: q.correct_answer,
                difficulty: q.difficulty,
                points: q.points.unwrap_or(DEFAULT_QUESTION_POINTS),
                time_limit: q.time_limit.unwrap_or(DEFAULT_QUESTION_TIME_LIMIT),
            })
        })
        .collect()
}

pub async fn create_quiz(
    db: &DbConn,
    params: CreateQuizParams,
    creator_id: &str,
) -> Result<quizzes::Model, ArenaError> {
    if !QUIZ_CATEGORIES.contains(&params.category.as_str()) {
        return Err(ArenaError::validation(format!(
            "Unknown category '{}'",
            params.category
        )));
    }
    users::get_user(db, creator_id).await?;

    let questions = questions_from_params(&params)?;
    scoring::max_score(&questions)?;
    let id = nanoid::nanoid!(QUIZ_ID_LENGTH, &ID_ALPHABET);

    let quiz = quizzes::ActiveModel {
        id: Set(id),
        title: Set(params.title),
        description: Set(params.description),
        category: Set(params.category),
        difficulty: Set(params.difficulty),
        questions: Set(Question::to_value(&questions)),
        creator_id: Set(creator_id.to_owned()),
        is_public: Set(params.is_public),
        tags: Set(serde_json::to_value(&params.tags).unwrap_or_default()),
        total_attempts: Set(0),
        average_score: Set(0.0),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    info!(quiz_id = %quiz.id, creator_id, "quiz created");
    Ok(quiz)
}

pub async fn get_quiz<C: ConnectionTrait>(db: &C, id: &str) -> Result<quizzes::Model, ArenaError> {
    quizzes::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ArenaError::NotFound("Quiz"))
}

/// Parses the stored question set. A column that no longer parses is a storage fault.
pub fn stored_questions(quiz: &quizzes::Model) -> Result<Vec<Question>, ArenaError> {
    Question::from_value(quiz.questions.clone()).map_err(|e| {
        ArenaError::StorageUnavailable(format!("Quiz {} has unreadable questions: {}", quiz.id, e))
    })
}

/// The quiz as a player (or, with `reveal`, its creator) sees it.
pub fn quiz_view(quiz: quizzes::Model, reveal: bool) -> Result<QuizSchema, ArenaError> {
    let questions = stored_questions(&quiz)?;
    let max_score = scoring::max_score(&questions)?;
    Ok(QuizSchema::new(quiz, questions, max_score, reveal))
}

/// Scores a standalone attempt and records it against both the user's stats
/// and the quiz's running averages, atomically.
pub async fn submit_quiz(
    db: &DbConn,
    quiz_id: &str,
    user_id: &str,
    params: SubmitQuizParams,
) -> Result<QuizResultSchema, ArenaError> {
    let txn = db.begin().await?;

    let quiz = get_quiz(&txn, quiz_id).await?;
    let user = users::get_user(&txn, user_id).await?;

    let questions = stored_questions(&quiz)?;
    let card = scoring::score(&questions, &params.answers)?;
    let max_score = scoring::max_score(&questions)?;
    let percentage = scoring::percentage(card.total_score, max_score);
    let now = Utc::now();

    quiz_attempts::ActiveModel {
        user_id: Set(user_id.to_owned()),
        quiz_id: Set(quiz_id.to_owned()),
        score: Set(card.total_score),
        max_score: Set(max_score),
        percentage: Set(percentage),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut user_stats = UserStatsSchema::from(&user);
    stats::apply_quiz_result(&mut user_stats, card.total_score, max_score);
    users::save_stats(&txn, user, &user_stats).await?;

    let attempts = quiz.total_attempts + 1;
    let average_score =
        (quiz.average_score * f64::from(quiz.total_attempts) + percentage) / f64::from(attempts);
    let mut quiz = quiz.into_active_model();
    quiz.total_attempts = Set(attempts);
    quiz.average_score = Set(average_score);
    quiz.update(&txn).await?;

    txn.commit().await?;

    info!(quiz_id, user_id, score = card.total_score, max_score, "quiz submitted");

    Ok(QuizResultSchema {
        score: card.total_score,
        max_score,
        percentage,
        results: card.per_question,
        stats: user_stats,
    })
}
