//! Public read-only surfaces: the imsakia, daily content and video playlists.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rust_i18n::t;
use serde_json::json;

use crate::competition;
use crate::names;
use crate::rejections::{AppError, ResultExt};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::IMSAKIA_URL, get(imsakia))
        .route(names::IMSAKIA_TODAY_URL, get(imsakia_today))
        .route(names::CONTENT_URL, get(content))
        .route(names::PLAYLISTS_URL, get(playlists))
        .route(names::PLAYLIST_URL, get(playlist))
        .route(names::PLAYLIST_VIDEOS_URL, get(playlist_videos))
}

async fn imsakia(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let days = state
        .db
        .active_schedule()
        .await
        .reject("failed to load imsakia")?;

    Ok(Json(days))
}

async fn imsakia_today(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let season = state
        .db
        .active_season()
        .await
        .reject("failed to load active season")?;

    let today = competition::clock_now().date;
    let day = match season {
        Some(season) => state
            .db
            .schedule_for_date(season.id, today)
            .await
            .reject("failed to load today's schedule")?,
        None => None,
    };

    let response = match day {
        Some(day) => Json(json!(day)),
        None => Json(json!({ "message": t!("imsakia.no_data_today").to_string() })),
    };

    Ok(response)
}

async fn content(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .db
        .active_content(&content_type)
        .await
        .reject("failed to load content")?;

    Ok(Json(rows))
}

async fn playlists(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .db
        .playlists(true)
        .await
        .reject("failed to load playlists")?;

    Ok(Json(rows))
}

async fn playlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let playlist = state
        .db
        .playlist(id, true)
        .await
        .reject("failed to load playlist")?
        .ok_or(AppError::NotFound("error.playlist_not_found"))?;

    Ok(Json(playlist))
}

async fn playlist_videos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .db
        .playlist(id, true)
        .await
        .reject("failed to load playlist")?
        .ok_or(AppError::NotFound("error.playlist_not_found"))?;

    let videos = state
        .db
        .playlist_videos(id)
        .await
        .reject("failed to load playlist videos")?;

    Ok(Json(videos))
}
