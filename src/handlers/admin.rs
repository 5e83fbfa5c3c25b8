//! The admin surface: season setup, question management, user management,
//! results export, winner announcement, and content/playlist CRUD.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use crate::db::RegisterOutcome;
use crate::models::{
    AdminUserBody, AdminUserUpdateBody, ContentBody, PlaylistBody, QuestionBody,
    QuestionUpdateBody, SeasonBody, UploadImsakiaBody, VideoBody,
};
use crate::names;
use crate::rejections::{AppError, ResultExt};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_STATS_URL, get(stats))
        .route(names::ADMIN_SEASONS_URL, post(create_season))
        .route(names::ADMIN_QUESTIONS_URL, get(questions).post(upsert_question))
        .route(
            names::ADMIN_QUESTION_URL,
            put(update_question).delete(delete_question),
        )
        .route(names::ADMIN_QUESTION_ANSWERS_URL, get(question_answers))
        .route(names::ADMIN_SEASON_QUESTIONS_URL, get(season_questions))
        .route(names::ADMIN_USERS_URL, get(users).post(create_user))
        .route(
            names::ADMIN_USER_URL,
            get(user_detail).put(update_user).delete(delete_user),
        )
        .route(names::ADMIN_RESULTS_URL, get(results))
        .route(names::ADMIN_ANNOUNCE_WINNER_URL, post(announce_winner))
        .route(names::ADMIN_CONTENT_URL, get(all_content).post(create_content))
        .route(
            names::ADMIN_CONTENT_ITEM_URL,
            put(update_content).delete(delete_content),
        )
        .route(names::ADMIN_PLAYLISTS_URL, get(playlists).post(create_playlist))
        .route(
            names::ADMIN_PLAYLIST_URL,
            put(update_playlist).delete(delete_playlist),
        )
        .route(
            names::ADMIN_PLAYLIST_VIDEOS_URL,
            get(playlist_videos).post(add_video),
        )
        .route(names::ADMIN_VIDEO_URL, put(update_video).delete(delete_video))
        .route(names::ADMIN_UPLOAD_IMSAKIA_URL, post(upload_imsakia))
}

async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = state
        .db
        .dashboard_stats()
        .await
        .reject("failed to load dashboard stats")?;

    Ok(Json(stats))
}

async fn create_season(
    State(state): State<AppState>,
    Json(body): Json<SeasonBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.end_date < body.start_date {
        return Err(AppError::Input("error.invalid_input"));
    }

    let id = state
        .db
        .create_season(&body.year_hijri, body.start_date, body.end_date, body.total_days)
        .await
        .reject("failed to create season")?;

    Ok(Json(json!({ "success": true, "id": id })))
}

async fn questions(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let questions = state
        .db
        .questions_with_stats()
        .await
        .reject("failed to load questions")?;

    Ok(Json(questions))
}

async fn upsert_question(
    State(state): State<AppState>,
    Json(body): Json<QuestionBody>,
) -> Result<impl IntoResponse, AppError> {
    let options = [body.option1, body.option2, body.option3, body.option4, body.option5];
    let id = state
        .db
        .upsert_question(
            body.season_id,
            body.day_number,
            &body.question_text,
            &options,
            body.correct_answer,
            body.timer_seconds.unwrap_or(names::DEFAULT_TIMER_SECONDS),
            body.status.as_deref().unwrap_or(names::DEFAULT_QUESTION_STATUS),
        )
        .await
        .reject("failed to upsert question")?;

    Ok(Json(json!({ "success": true, "id": id })))
}

async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<QuestionUpdateBody>,
) -> Result<impl IntoResponse, AppError> {
    let options = [body.option1, body.option2, body.option3, body.option4, body.option5];
    let updated = state
        .db
        .update_question(
            id,
            &body.question_text,
            &options,
            body.correct_answer,
            body.timer_seconds,
            &body.status,
        )
        .await
        .reject("failed to update question")?;

    if !updated {
        return Err(AppError::NotFound("error.question_not_found"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_question(id)
        .await
        .reject("failed to delete question")?;

    if !deleted {
        return Err(AppError::NotFound("error.question_not_found"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn season_questions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = state
        .db
        .questions_for_season(id)
        .await
        .reject("failed to load season questions")?;

    Ok(Json(questions))
}

async fn question_answers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let answers = state
        .db
        .answers_for_question(id)
        .await
        .reject("failed to load question answers")?;

    Ok(Json(answers))
}

async fn users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.db.all_users().await.reject("failed to load users")?;
    Ok(Json(users))
}

async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<AdminUserBody>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .db
        .create_user(
            &body.name,
            &body.phone,
            body.national_id.as_deref().unwrap_or(""),
            &body.password,
            None,
            body.role.as_deref().unwrap_or(names::USER_ROLE),
        )
        .await
        .reject("failed to create user")?;

    match outcome {
        RegisterOutcome::Created { user_id } => {
            Ok(Json(json!({ "success": true, "userId": user_id })))
        }
        RegisterOutcome::PhoneTaken => Err(AppError::Input("error.phone_taken")),
    }
}

async fn user_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .db
        .user_detail(id)
        .await
        .reject("failed to load user")?
        .ok_or(AppError::NotFound("error.user_not_found"))?;

    Ok(Json(user))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AdminUserUpdateBody>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .db
        .admin_update_user(
            id,
            &body.name,
            &body.phone,
            body.score,
            &body.role,
            body.password.as_deref(),
        )
        .await
        .reject("failed to update user")?;

    if !updated {
        return Err(AppError::NotFound("error.user_not_found"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_user(id)
        .await
        .reject("failed to delete user")?;

    if !deleted {
        return Err(AppError::NotFound("error.user_not_found"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn results(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .db
        .admin_results()
        .await
        .reject("failed to load results")?;

    Ok(Json(rows))
}

/// Records the leaderboard head as the season winner. From that moment the
/// status machine reads `ended` for every request.
async fn announce_winner(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let winner = state
        .db
        .announce_winner()
        .await
        .reject("failed to announce winner")?
        .ok_or(AppError::NotFound("error.no_winner"))?;

    Ok(Json(json!({ "success": true, "winnerId": winner })))
}

async fn all_content(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .db
        .all_content()
        .await
        .reject("failed to load content")?;

    Ok(Json(rows))
}

async fn create_content(
    State(state): State<AppState>,
    Json(body): Json<ContentBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = state
        .db
        .create_content(
            &body.content_type,
            body.title.as_deref(),
            body.body.as_deref(),
            body.sort_order,
        )
        .await
        .reject("failed to create content")?;

    Ok(Json(json!({ "success": true, "id": id })))
}

async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ContentBody>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .db
        .update_content(
            id,
            &body.content_type,
            body.title.as_deref(),
            body.body.as_deref(),
            body.sort_order,
            body.is_active,
        )
        .await
        .reject("failed to update content")?;

    if !updated {
        return Err(AppError::NotFound("error.internal"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_content(id)
        .await
        .reject("failed to delete content")?;

    if !deleted {
        return Err(AppError::NotFound("error.internal"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn playlists(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .db
        .playlists(false)
        .await
        .reject("failed to load playlists")?;

    Ok(Json(rows))
}

async fn create_playlist(
    State(state): State<AppState>,
    Json(body): Json<PlaylistBody>,
) -> Result<impl IntoResponse, AppError> {
    let id = state
        .db
        .create_playlist(
            &body.title,
            body.description.as_deref(),
            body.thumbnail_url.as_deref(),
            body.sort_order,
        )
        .await
        .reject("failed to create playlist")?;

    Ok(Json(json!({ "success": true, "id": id })))
}

async fn update_playlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<PlaylistBody>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .db
        .update_playlist(
            id,
            &body.title,
            body.description.as_deref(),
            body.thumbnail_url.as_deref(),
            body.sort_order,
            body.is_active,
        )
        .await
        .reject("failed to update playlist")?;

    if !updated {
        return Err(AppError::NotFound("error.playlist_not_found"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn delete_playlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_playlist(id)
        .await
        .reject("failed to delete playlist")?;

    if !deleted {
        return Err(AppError::NotFound("error.playlist_not_found"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn playlist_videos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let videos = state
        .db
        .playlist_videos(id)
        .await
        .reject("failed to load playlist videos")?;

    Ok(Json(videos))
}

async fn add_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<VideoBody>,
) -> Result<impl IntoResponse, AppError> {
    state
        .db
        .playlist(id, false)
        .await
        .reject("failed to load playlist")?
        .ok_or(AppError::NotFound("error.playlist_not_found"))?;

    let video_id = state
        .db
        .add_video(
            id,
            &body.title,
            &body.video_url,
            body.thumbnail_url.as_deref(),
            body.duration.as_deref(),
            body.sort_order,
        )
        .await
        .reject("failed to add video")?;

    Ok(Json(json!({ "success": true, "id": video_id })))
}

async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<VideoBody>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .db
        .update_video(
            id,
            &body.title,
            &body.video_url,
            body.thumbnail_url.as_deref(),
            body.duration.as_deref(),
            body.sort_order,
        )
        .await
        .reject("failed to update video")?;

    if !updated {
        return Err(AppError::NotFound("error.internal"));
    }

    Ok(Json(json!({ "success": true })))
}

async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_video(id)
        .await
        .reject("failed to delete video")?;

    if !deleted {
        return Err(AppError::NotFound("error.internal"));
    }

    Ok(Json(json!({ "success": true })))
}

/// Bulk-loads a season's imsakia; each row replaces any existing row for its
/// `(season, day)` slot.
async fn upload_imsakia(
    State(state): State<AppState>,
    Json(body): Json<UploadImsakiaBody>,
) -> Result<impl IntoResponse, AppError> {
    let count = body.data.len();
    for day in &body.data {
        state
            .db
            .upsert_schedule_day(
                body.season_id,
                day.ramadan_date,
                day.day_name.as_deref(),
                day.gregorian_date,
                &[
                    day.fajr.as_deref(),
                    day.sunrise.as_deref(),
                    day.dhuhr.as_deref(),
                    day.asr.as_deref(),
                    day.maghrib.as_deref(),
                    day.isha.as_deref(),
                ],
            )
            .await
            .reject("failed to upsert schedule day")?;
    }

    Ok(Json(json!({ "success": true, "count": count })))
}
