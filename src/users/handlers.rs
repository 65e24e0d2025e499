use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::users::dto::{CreateUserRequest, UserListResponse, UserResponse};
use crate::users::repo::User;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UserListResponse>> {
    let users = User::list(&state.db).await?;
    Ok(Json(UserListResponse { users }))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if let Some(email) = payload.email.as_deref() {
        if !is_valid_email(email) {
            warn!(email = %email, "invalid email");
            return Err(AppError::BadRequest("Invalid email".into()));
        }
    }

    let user = User::create(
        &state.db,
        &payload.github_id,
        &payload.github_username,
        payload.email.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, github_username = %user.github_username, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(UserResponse { user }))
}
