// Database model structs. Most rows double as wire responses, so they derive
// Serialize with the original deployment's column spellings.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Season {
    pub id: i64,
    pub year_hijri: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
    pub is_active: bool,
    pub winner_user_id: Option<i64>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ScheduleDay {
    pub id: i64,
    pub season_id: i64,
    pub day_number: i64,
    pub day_name: Option<String>,
    pub gregorian_date: NaiveDate,
    pub fajr: Option<String>,
    pub sunrise: Option<String>,
    pub dhuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
}

/// Full question row, including the correct option. Only ever serialized on
/// admin surfaces and in the post-maghrib result payload.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct QuestionRow {
    pub id: i64,
    pub season_id: i64,
    pub day_number: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub option5: String,
    pub correct_answer: i64,
    pub timer_seconds: i64,
    pub status: String,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct QuestionWithStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub question: QuestionRow,
    pub total_answers: i64,
    pub correct_answers: i64,
}

/// Today's question + aggregate counts, revealed after maghrib.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct DayResult {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub question: QuestionRow,
    pub correct_count: i64,
    pub total_answers: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct AnswerRow {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub selected_option: i64,
    pub is_correct: bool,
    pub time_taken_ms: i64,
    pub answered_at: String,
}

/// A user's own answer for a day, with the correct option attached so the
/// handler can decide whether to reveal it.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct MyAnswer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub answer: AnswerRow,
    pub correct_answer: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct AnswerWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub answer: AnswerRow,
    pub user_name: String,
    pub user_phone: String,
}

/// Public identity returned on login.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub score: i64,
    pub role: String,
    pub facebook_url: Option<String>,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub score: i64,
    pub total_time_ms: i64,
    pub facebook_url: Option<String>,
    pub profile_picture: Option<String>,
    pub rank: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct LeaderboardRow {
    pub id: i64,
    pub name: String,
    pub score: i64,
    pub total_time_ms: i64,
    pub facebook_url: Option<String>,
    pub rank: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct AdminUserRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub score: i64,
    pub total_time_ms: i64,
    pub role: String,
    pub created_at: String,
    pub answers_count: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct AdminUserDetail {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub national_id: String,
    pub agreed_terms: bool,
    pub facebook_url: Option<String>,
    pub profile_picture: Option<String>,
    pub role: String,
    pub score: i64,
    pub total_time_ms: i64,
    pub created_at: String,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ResultRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub score: i64,
    pub total_time_ms: i64,
    pub correct_answers: i64,
    pub total_answers: i64,
    pub rank: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_answers: i64,
    pub published_questions: i64,
    pub total_content: i64,
    pub total_playlists: i64,
}

/// The fastest correct answer of a given day.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct DayChampion {
    pub name: String,
    pub profile_picture: Option<String>,
    pub facebook_url: Option<String>,
    pub time_taken_ms: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ChallengeLeaderboardRow {
    pub name: String,
    pub facebook_url: Option<String>,
    pub total_points: i64,
    pub completed_count: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ContentRow {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_active: bool,
    pub sort_order: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct PlaylistRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i64,
    pub video_count: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct VideoRow {
    pub id: i64,
    pub playlist_id: i64,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub sort_order: i64,
}
