//! Registration, login and profile management.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use crate::db::RegisterOutcome;
use crate::models::{LoginBody, RegisterBody, UpdateProfileBody};
use crate::names;
use crate::rejections::{AppError, ResultExt};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::REGISTER_URL, post(register))
        .route(names::LOGIN_URL, post(login))
        .route(names::PROFILE_URL, get(profile))
        .route(names::UPDATE_PROFILE_URL, put(update_profile))
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.name.trim().is_empty()
        || body.phone.trim().is_empty()
        || body.national_id.trim().is_empty()
        || body.password.is_empty()
    {
        return Err(AppError::Input("error.missing_fields"));
    }
    if !body.agreed_terms {
        return Err(AppError::Input("error.terms_required"));
    }

    let outcome = state
        .db
        .create_user(
            body.name.trim(),
            body.phone.trim(),
            body.national_id.trim(),
            &body.password,
            body.facebook_url.as_deref(),
            names::USER_ROLE,
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

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .db
        .verify_login(body.phone.trim(), &body.password)
        .await
        .reject("failed to verify login")?;

    // Unknown phone and wrong password are indistinguishable on the wire.
    match user {
        Some(user) => Ok(Json(json!({ "success": true, "user": user }))),
        None => Err(AppError::InvalidCredentials),
    }
}

async fn profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .db
        .profile(user_id)
        .await
        .reject("failed to load profile")?
        .ok_or(AppError::NotFound("error.user_not_found"))?;

    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Input("error.missing_fields"));
    }

    let password_change = match (&body.password, &body.current_password) {
        (Some(new), Some(current)) => Some((current.as_str(), new.as_str())),
        (Some(_), None) => return Err(AppError::Input("error.missing_fields")),
        _ => None,
    };

    let updated = state
        .db
        .update_profile(
            body.user_id,
            body.name.trim(),
            body.facebook_url.as_deref(),
            body.profile_picture.as_deref(),
            password_change,
        )
        .await
        .reject("failed to update profile")?;

    if !updated {
        return Err(AppError::Input("error.wrong_current_password"));
    }

    Ok(Json(json!({ "success": true })))
}
