use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};

use app::config::Config;
use app::core::RecordingNotifier;
use app::persistence::{quizzes, users};
use app::state::AppState;
use models::domains::{sea_orm_active_enums::TournamentStatus, tournaments};
use models::params::quiz::{CreateQuizParams, QuestionParams};
use models::params::tournament::SubmittedAnswer;
use models::params::user::CreateUserParams;
use utils::testing::setup_test_db;

pub fn test_config() -> Config {
    Config::from_parts(
        "sqlite::memory:".to_owned(),
        "127.0.0.1".to_owned(),
        0,
        "http://localhost:5173".to_owned(),
        "test-secret",
    )
}

pub async fn setup_state() -> (AppState, Arc<RecordingNotifier>) {
    let conn = setup_test_db("sqlite::memory:")
        .await
        .expect("Set up db failed!");
    let notifier = Arc::new(RecordingNotifier::new());
    let state = AppState::new(conn, test_config(), notifier.clone());
    (state, notifier)
}

/// Creates a user whose id and username are both `name`.
pub async fn seed_user(state: &AppState, name: &str) -> String {
    users::create_user(
        &state.conn,
        name,
        CreateUserParams {
            username: name.to_owned(),
            avatar: format!("https://avatars.test/{name}.png"),
        },
    )
    .await
    .expect("Create user failed!")
    .id
}

pub fn question(correct_answer: i32, points: i32) -> QuestionParams {
    QuestionParams {
        question: format!("Worth {points}?"),
        options: vec!["a".into(), "b".into(), "c".into()],
        correct_answer,
        difficulty: Default::default(),
        points: Some(points),
        time_limit: None,
    }
}

pub fn quiz_params(questions: Vec<QuestionParams>) -> CreateQuizParams {
    CreateQuizParams {
        title: "General trivia".to_owned(),
        description: String::new(),
        category: "General Knowledge".to_owned(),
        difficulty: Default::default(),
        questions,
        is_public: true,
        tags: vec![],
    }
}

/// Two questions worth 10 and 20 points, answered by options 1 and 0.
pub async fn seed_quiz(state: &AppState, creator: &str) -> String {
    quizzes::create_quiz(
        &state.conn,
        quiz_params(vec![question(1, 10), question(0, 20)]),
        creator,
    )
    .await
    .expect("Create quiz failed!")
    .id
}

/// Overwrites a quiz's questions with JSON that is not a question list.
pub async fn corrupt_quiz(state: &AppState, quiz_id: &str) {
    let mut quiz = quizzes::get_quiz(&state.conn, quiz_id)
        .await
        .expect("Find quiz failed!")
        .into_active_model();
    quiz.questions = Set(serde_json::json!({ "x": 1 }));
    quiz.update(&state.conn).await.expect("Update quiz failed!");
}

static NEXT_TOURNAMENT: AtomicU64 = AtomicU64::new(1);

pub struct Schedule {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Schedule {
    /// Starts in an hour and runs for an hour.
    pub fn upcoming() -> Self {
        let start = Utc::now() + TimeDelta::hours(1);
        Self {
            start,
            end: start + TimeDelta::hours(1),
        }
    }

    pub fn during(&self, minutes: i64) -> DateTime<Utc> {
        self.start + TimeDelta::minutes(minutes)
    }

    pub fn after_end(&self) -> DateTime<Utc> {
        self.end + TimeDelta::minutes(1)
    }
}

/// Inserts a tournament directly, bypassing creation rules so tests can pick any capacity.
pub async fn seed_tournament(
    state: &AppState,
    quiz_id: &str,
    creator: &str,
    max_participants: i32,
    schedule: &Schedule,
) -> tournaments::Model {
    let now = Utc::now();
    tournaments::ActiveModel {
        id: Set(format!("t-{}", NEXT_TOURNAMENT.fetch_add(1, Ordering::Relaxed))),
        title: Set("Friday cup".to_owned()),
        description: Set(String::new()),
        quiz_id: Set(quiz_id.to_owned()),
        created_by: Set(creator.to_owned()),
        max_participants: Set(max_participants),
        participant_count: Set(0),
        start_time: Set(schedule.start),
        end_time: Set(schedule.end),
        status: Set(TournamentStatus::Upcoming),
        is_private: Set(false),
        invite_code: Set(None),
        prizes: Set(serde_json::json!([])),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.conn)
    .await
    .expect("Insert tournament failed!")
}

pub fn answers(selected: &[Option<i32>]) -> Vec<Option<SubmittedAnswer>> {
    selected
        .iter()
        .map(|selected_answer| {
            Some(SubmittedAnswer {
                selected_answer: *selected_answer,
                time_spent: 5,
            })
        })
        .collect()
}
