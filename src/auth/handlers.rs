use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{info, instrument, warn};

use crate::auth::github;
use crate::auth::session::{generate_token, now_millis, Session, SESSION_COOKIE, SESSION_TTL_MS};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::users::dto::UserResponse;
use crate::users::repo::User;

/// CSRF state for the OAuth round trip, parked in a short-lived cookie.
const STATE_COOKIE: &str = "github_oauth_state";
const STATE_COOKIE_TTL: Duration = Duration::minutes(10);

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", get(logout))
        .route("/auth/me", get(me))
}

fn state_cookie(value: String) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(STATE_COOKIE_TTL)
        .path("/")
        .build()
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::milliseconds(SESSION_TTL_MS))
        .path("/")
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

#[instrument(skip(state, jar))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    let csrf = generate_token();
    let url = github::authorize_url(&state.config.github, &state.config.app_url, &csrf)?;
    Ok((jar.add(state_cookie(csrf)), Redirect::to(&url)))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
}

#[instrument(skip(state, query, jar))]
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    let stored_state = jar.get(STATE_COOKIE).map(|c| c.value().to_owned());
    let (Some(code), Some(cb_state), Some(stored)) = (
        query.code.as_deref(),
        query.state.as_deref(),
        stored_state.as_deref(),
    ) else {
        warn!("oauth callback missing code or state");
        return Err(AppError::BadRequest("Invalid OAuth callback".into()));
    };
    if cb_state != stored {
        warn!("oauth callback state mismatch");
        return Err(AppError::BadRequest("Invalid OAuth callback".into()));
    }

    let access_token =
        github::exchange_code(&state.http, &state.config.github, &state.config.app_url, code)
            .await
            .map_err(AppError::UpstreamAuth)?;
    let github_user = github::fetch_user(&state.http, &access_token)
        .await
        .map_err(AppError::UpstreamAuth)?;

    let github_id = github_user.id.to_string();
    let user = match User::find_by_github_id(&state.db, &github_id).await? {
        Some(user) => user,
        None => {
            let user = User::create(
                &state.db,
                &github_id,
                &github_user.login,
                github_user.email.as_deref(),
            )
            .await?;
            info!(user_id = %user.id, github_username = %user.github_username, "user created");
            user
        }
    };

    let session = Session::create(&state.db, user.id, &github_id, &github_user.login).await?;
    info!(user_id = %user.id, "session issued");

    let jar = jar
        .add(session_cookie(session.id))
        .remove(removal_cookie(STATE_COOKIE));
    Ok((jar, Redirect::to("/")))
}

#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<serde_json::Value>)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        Session::delete(&state.db, cookie.value()).await?;
    }
    let jar = jar.remove(removal_cookie(SESSION_COOKIE));
    Ok((
        jar,
        Json(serde_json::json!({ "message": "Logged out successfully" })),
    ))
}

#[instrument(skip(state, jar))]
pub async fn me(State(state): State<AppState>, jar: CookieJar) -> AppResult<Json<UserResponse>> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(AppError::Unauthenticated)?;

    let session = Session::find_valid(&state.db, &token, now_millis())
        .await?
        .ok_or(AppError::SessionExpired)?;

    let user = User::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(UserResponse { user }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok".into());
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn state_cookie_is_short_lived() {
        let cookie = state_cookie("csrf".into());
        assert_eq!(cookie.name(), "github_oauth_state");
        assert_eq!(cookie.max_age(), Some(Duration::minutes(10)));
    }
}
