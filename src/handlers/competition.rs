//! The daily competition surface: status, today's question, answer
//! submission, the result reveal and the leaderboard.
//!
//! Every handler re-derives the competition status from the clock before
//! touching the answer ledger, so a request that arrives one minute after
//! maghrib is rejected no matter what the client believes.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::competition;
use crate::db::RecordOutcome;
use crate::models::{QuestionView, StatusResponse, SubmitAnswerBody};
use crate::names;
use crate::rejections::{AppError, ResultExt};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::STATUS_URL, get(status))
        .route(names::TODAY_QUESTION_URL, get(today_question))
        .route(names::SUBMIT_ANSWER_URL, post(submit_answer))
        .route(names::TODAY_RESULT_URL, get(today_result))
        .route(names::MY_ANSWER_URL, get(my_answer))
        .route(names::LEADERBOARD_URL, get(leaderboard))
        .route(names::YESTERDAY_WINNER_URL, get(yesterday_winner))
}

async fn status(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let status = competition::current(&state.db)
        .await
        .reject("failed to resolve competition status")?;

    Ok(Json(StatusResponse::from(&status)))
}

async fn today_question(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let status = competition::current(&state.db)
        .await
        .reject("failed to resolve competition status")?;

    let Some(day) = status.open_day() else {
        return Ok(Json(json!({ "available": false, "reason": status.label() })));
    };

    let question = state
        .db
        .published_question(day.season_id, day.day_number)
        .await
        .reject("failed to load today's question")?;

    let response = match question {
        Some(question) => json!({
            "available": true,
            "day": day.day_number,
            "question": QuestionView::from(question),
        }),
        None => json!({ "available": false, "reason": "no_question" }),
    };

    Ok(Json(response))
}

async fn submit_answer(
    State(state): State<AppState>,
    Json(body): Json<SubmitAnswerBody>,
) -> Result<impl IntoResponse, AppError> {
    let status = competition::current(&state.db)
        .await
        .reject("failed to resolve competition status")?;

    // The window check happens here, against a fresh clock read. The ledger
    // below only enforces uniqueness.
    let Some(day) = status.open_day() else {
        return Err(AppError::CompetitionClosed);
    };

    let question = state
        .db
        .question(body.question_id)
        .await
        .reject("failed to load question")?
        .ok_or(AppError::NotFound("error.question_not_found"))?;

    // Answers only count against today's published question.
    if question.season_id != day.season_id
        || question.day_number != day.day_number
        || question.status != names::PUBLISHED_STATUS
    {
        return Err(AppError::CompetitionClosed);
    }

    let is_correct = body.selected_option == question.correct_answer;
    let outcome = state
        .db
        .record_answer(
            body.user_id,
            body.question_id,
            body.selected_option,
            is_correct,
            body.time_taken_ms,
        )
        .await
        .reject("failed to record answer")?;

    match outcome {
        // Correctness is not echoed back: the result stays hidden until
        // maghrib.
        RecordOutcome::Recorded { .. } => Ok(Json(json!({ "success": true, "recorded": true }))),
        RecordOutcome::AlreadyAnswered => Err(AppError::AlreadyAnswered),
    }
}

async fn today_result(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let status = competition::current(&state.db)
        .await
        .reject("failed to resolve competition status")?;

    let Some(day) = status.day() else {
        return Ok(Json(json!({ "available": false, "reason": status.label() })));
    };

    if !status.reveals_result() {
        return Ok(Json(json!({
            "available": false,
            "reason": status.label(),
            "day": day.day_number,
        })));
    }

    let result = state
        .db
        .day_result(day.season_id, day.day_number)
        .await
        .reject("failed to load day result")?;

    let response = match result {
        Some(result) => {
            let champion = state
                .db
                .day_champion(result.question.id)
                .await
                .reject("failed to load day champion")?;
            json!({
                "available": true,
                "day": day.day_number,
                "result": result,
                "champion": champion,
            })
        }
        None => json!({ "available": false, "reason": "no_question", "day": day.day_number }),
    };

    Ok(Json(response))
}

async fn my_answer(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let status = competition::current(&state.db)
        .await
        .reject("failed to resolve competition status")?;

    let Some(day) = status.day() else {
        return Ok(Json(json!({ "answered": false, "showCorrect": false })));
    };

    let answer = state
        .db
        .answer_for_day(user_id, day.season_id, day.day_number)
        .await
        .reject("failed to load user's answer")?;

    let Some(answer) = answer else {
        return Ok(Json(json!({
            "answered": false,
            "showCorrect": status.reveals_result(),
        })));
    };

    // Until the reveal, the answer is echoed without anything that betrays
    // correctness.
    let response = if status.reveals_result() {
        json!({ "answered": true, "answer": answer, "showCorrect": true })
    } else {
        json!({
            "answered": true,
            "answer": {
                "selected_option": answer.answer.selected_option,
                "time_taken_ms": answer.answer.time_taken_ms,
            },
            "showCorrect": false,
        })
    };

    Ok(Json(response))
}

async fn leaderboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let status = competition::current(&state.db)
        .await
        .reject("failed to resolve competition status")?;

    // While today's result is hidden, today's points are masked out of the
    // displayed scores.
    let mask_today = match status.day() {
        Some(day) if !status.reveals_result() => Some((day.season_id, day.day_number)),
        _ => None,
    };

    let rows = state
        .db
        .leaderboard(mask_today)
        .await
        .reject("failed to load leaderboard")?;

    Ok(Json(rows))
}

async fn yesterday_winner(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let status = competition::current(&state.db)
        .await
        .reject("failed to resolve competition status")?;

    let Some(day) = status.day().filter(|day| day.day_number > 1) else {
        return Ok(Json(json!({ "available": false })));
    };

    let question = state
        .db
        .question_for_day(day.season_id, day.day_number - 1)
        .await
        .reject("failed to load yesterday's question")?;

    let winner = match question {
        Some(question) => state
            .db
            .day_champion(question.id)
            .await
            .reject("failed to load yesterday's champion")?,
        None => None,
    };

    let response = match winner {
        Some(winner) => json!({
            "available": true,
            "winner": winner,
            "day": day.day_number - 1,
        }),
        None => json!({ "available": false }),
    };

    Ok(Json(response))
}
