//! The 30-day challenge tracker surface.
//!
//! Completion awards go through one idempotent path: the `(user, day)`
//! uniqueness constraint decides whether credit applies, so a retried or
//! duplicated report can never double-award.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_i18n::t;
use serde_json::json;

use crate::challenges::{self, Evidence};
use crate::competition;
use crate::db::CompletionOutcome;
use crate::models::{ChallengeView, CompleteChallengeBody, ShareRewardBody, SmartCompletionBody};
use crate::names;
use crate::rejections::{AppError, ResultExt};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::CHALLENGES_URL, get(list))
        .route(names::SMART_COMPLETION_URL, post(smart_completion))
        .route(names::COMPLETE_CHALLENGE_URL, post(complete))
        .route(names::CHALLENGE_STATUS_URL, get(my_status))
        .route(names::CHALLENGE_LEADERBOARD_URL, get(challenge_leaderboard))
        .route(names::SHARE_REWARD_URL, post(share_reward))
}

async fn list() -> impl IntoResponse {
    let all: Vec<ChallengeView> = challenges::CHALLENGES.iter().map(ChallengeView::from).collect();
    Json(all)
}

/// Evaluates a progress report against today's challenge. A report that does
/// not satisfy the target is a normal outcome, not an error: trackers send
/// every progress event and most of them complete nothing.
async fn smart_completion(
    State(state): State<AppState>,
    Json(body): Json<SmartCompletionBody>,
) -> Result<impl IntoResponse, AppError> {
    let evidence = Evidence::from_report(&body.kind, body.value.as_ref(), body.count)
        .ok_or(AppError::Input("error.invalid_input"))?;

    let season = state
        .db
        .active_season()
        .await
        .reject("failed to load active season")?;

    let Some(season) = season else {
        return Ok(Json(json!({ "success": false, "completed": false, "reason": "no_season" })));
    };

    let day = challenges::current_day(competition::clock_now().date, season.start_date);
    let Some(challenge) = challenges::for_day(day) else {
        return Ok(Json(
            json!({ "success": false, "completed": false, "reason": "no_challenge" }),
        ));
    };

    if !challenge.target.matches(&evidence) {
        return Ok(Json(json!({ "success": true, "completed": false })));
    }

    let outcome = state
        .db
        .complete_challenge(body.user_id, day as i64, challenge.points)
        .await
        .reject("failed to complete challenge")?;

    let response = match outcome {
        CompletionOutcome::New => json!({
            "success": true,
            "completed": true,
            "new": true,
            "points": challenge.points,
            "name": challenge.name,
        }),
        CompletionOutcome::AlreadyCompleted => json!({
            "success": true,
            "completed": true,
            "new": false,
        }),
    };

    Ok(Json(response))
}

/// Manual completion for challenges with no trackable evidence. Points come
/// from the challenge definition, never from the client.
async fn complete(
    State(state): State<AppState>,
    Json(body): Json<CompleteChallengeBody>,
) -> Result<impl IntoResponse, AppError> {
    let day = u32::try_from(body.day_number).ok().filter(|d| (1..=names::SEASON_MAX_DAYS).contains(d));
    let challenge = day
        .and_then(challenges::for_day)
        .ok_or(AppError::Input("error.invalid_input"))?;

    let outcome = state
        .db
        .complete_challenge(body.user_id, body.day_number, challenge.points)
        .await
        .reject("failed to complete challenge")?;

    // Already holding the day's credit is informational, not a fault.
    let response = match outcome {
        CompletionOutcome::New => json!({ "success": true, "points": challenge.points }),
        CompletionOutcome::AlreadyCompleted => json!({
            "success": true,
            "message": t!("challenge.already_completed").to_string(),
        }),
    };

    Ok(Json(response))
}

async fn my_status(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let completed = state
        .db
        .completed_days(user_id)
        .await
        .reject("failed to load completed challenges")?;

    let season = state
        .db
        .active_season()
        .await
        .reject("failed to load active season")?;
    let current_day = season
        .map(|s| challenges::current_day(competition::clock_now().date, s.start_date));

    Ok(Json(json!({
        "completedDays": completed,
        "currentDay": current_day,
    })))
}

async fn challenge_leaderboard(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .db
        .challenge_leaderboard()
        .await
        .reject("failed to load challenge leaderboard")?;

    Ok(Json(rows))
}

/// One share reward per user per calendar day.
async fn share_reward(
    State(state): State<AppState>,
    Json(body): Json<ShareRewardBody>,
) -> Result<impl IntoResponse, AppError> {
    let today = competition::clock_now().date;
    let outcome = state
        .db
        .record_share(body.user_id, today)
        .await
        .reject("failed to record share")?;

    match outcome {
        CompletionOutcome::New => Ok(Json(
            json!({ "success": true, "points": names::SHARE_REWARD_POINTS }),
        )),
        CompletionOutcome::AlreadyCompleted => Err(AppError::AlreadyShared),
    }
}
