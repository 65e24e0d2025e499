use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::session::{now_millis, Session, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;
use crate::users::repo::User;

/// Authenticated request identity, loaded from the session cookie.
///
/// Rejections: missing cookie -> 401 "Authentication required"; unknown or
/// expired token -> 401 "Session expired" (the two are deliberately
/// conflated); session pointing at a deleted user -> 404 "User not found".
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub github_id: String,
    pub github_username: String,
    pub email: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .ok_or(AppError::Unauthenticated)?;

        let session = Session::find_valid(&state.db, &token, now_millis())
            .await?
            .ok_or(AppError::SessionExpired)?;

        // A session row may outlive its user; that is a data-integrity
        // anomaly, not an auth failure.
        let user = User::find_by_id(&state.db, session.user_id)
            .await?
            .ok_or(AppError::NotFound("User not found"))?;

        Ok(AuthUser {
            id: user.id,
            github_id: user.github_id,
            github_username: user.github_username,
            email: user.email,
        })
    }
}

/// Like [`AuthUser`] but never short-circuits on auth failures: yields
/// `None` for missing, unknown or expired sessions and for dangling users.
/// Store errors still surface.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuthUser(Some(user))),
            Err(AppError::Unauthenticated)
            | Err(AppError::SessionExpired)
            | Err(AppError::NotFound(_)) => Ok(OptionalAuthUser(None)),
            Err(e) => Err(e),
        }
    }
}
