//! Request and response shapes for the JSON API. Key spellings follow the
//! original deployment's wire format, including its mixed casing
//! (`daysLeft` next to `season_id`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::challenges::Challenge;
use crate::competition::Status;
use crate::db::models::QuestionRow;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fajr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maghrib: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "daysLeft", skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<i64>,
}

impl From<&Status> for StatusResponse {
    fn from(status: &Status) -> Self {
        let mut response = StatusResponse {
            status: status.label(),
            season_id: None,
            day_number: None,
            fajr: None,
            maghrib: None,
            date: None,
            days_left: None,
            winner_id: None,
        };
        match status {
            Status::NoSeason => {}
            Status::Upcoming {
                season_id,
                days_left,
            } => {
                response.season_id = Some(*season_id);
                response.days_left = Some(*days_left);
            }
            Status::Day { day, .. } => {
                response.season_id = Some(day.season_id);
                response.day_number = Some(day.day_number);
                response.fajr = day.fajr.clone();
                response.maghrib = day.maghrib.clone();
                response.date = Some(day.date);
            }
            Status::Ended { winner_id } => {
                response.winner_id = Some(*winner_id);
            }
        }
        response
    }
}

/// The question as served to players: no correct option.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub option5: String,
    pub timer_seconds: i64,
}

impl From<QuestionRow> for QuestionView {
    fn from(q: QuestionRow) -> Self {
        QuestionView {
            id: q.id,
            question_text: q.question_text,
            option1: q.option1,
            option2: q.option2,
            option3: q.option3,
            option4: q.option4,
            option5: q.option5,
            timer_seconds: q.timer_seconds,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerBody {
    pub user_id: i64,
    pub question_id: i64,
    pub selected_option: i64,
    #[serde(default)]
    pub time_taken_ms: i64,
}

#[derive(Debug, Deserialize)]
pub struct SmartCompletionBody {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteChallengeBody {
    pub user_id: i64,
    pub day_number: i64,
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRewardBody {
    pub user_id: i64,
}

/// A challenge definition on the wire, in the shape the tracker UI expects.
#[derive(Debug, Serialize)]
pub struct ChallengeView {
    pub day: u32,
    pub name: &'static str,
    pub desc: &'static str,
    pub emoji: &'static str,
    pub points: i64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub target: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl From<&Challenge> for ChallengeView {
    fn from(c: &Challenge) -> Self {
        use crate::challenges::Target;

        let (target, count) = match c.target {
            Target::Juz(n) => (serde_json::json!(n), None),
            Target::FullQuran => (serde_json::json!("finish"), None),
            Target::Worship(id) => (serde_json::json!(id), None),
            Target::Tasbih { id, required } => (serde_json::json!(id), required),
            Target::Manual => (serde_json::Value::Null, None),
        };

        ChallengeView {
            day: c.day,
            name: c.name,
            desc: c.description,
            emoji: c.emoji,
            points: c.points,
            kind: c.target.kind(),
            target,
            count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub phone: String,
    pub national_id: String,
    pub password: String,
    #[serde(default)]
    pub agreed_terms: bool,
    #[serde(default)]
    pub facebook_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub current_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionBody {
    pub season_id: i64,
    pub day_number: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    #[serde(default)]
    pub option3: String,
    #[serde(default)]
    pub option4: String,
    #[serde(default)]
    pub option5: String,
    pub correct_answer: i64,
    #[serde(default)]
    pub timer_seconds: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionUpdateBody {
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    #[serde(default)]
    pub option3: String,
    #[serde(default)]
    pub option4: String,
    #[serde(default)]
    pub option5: String,
    pub correct_answer: i64,
    pub timer_seconds: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminUserBody {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub national_id: Option<String>,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminUserUpdateBody {
    pub name: String,
    pub phone: String,
    pub score: i64,
    pub role: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBody {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistBody {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct VideoBody {
    pub title: String,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
}

/// One imsakia row as uploaded by the admin tool; `ramadan_date` is the
/// 1-based day number.
#[derive(Debug, Deserialize)]
pub struct ImsakiaDay {
    pub ramadan_date: i64,
    #[serde(default)]
    pub day_name: Option<String>,
    pub gregorian_date: NaiveDate,
    #[serde(default)]
    pub fajr: Option<String>,
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub dhuhr: Option<String>,
    #[serde(default)]
    pub asr: Option<String>,
    #[serde(default)]
    pub maghrib: Option<String>,
    #[serde(default)]
    pub isha: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonBody {
    pub year_hijri: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_total_days")]
    pub total_days: i64,
}

fn default_total_days() -> i64 {
    crate::names::SEASON_MAX_DAYS as i64
}

#[derive(Debug, Deserialize)]
pub struct UploadImsakiaBody {
    pub season_id: i64,
    pub data: Vec<ImsakiaDay>,
}

fn default_true() -> bool {
    true
}
