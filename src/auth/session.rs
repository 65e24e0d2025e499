use base64ct::{Base64UrlUnpadded, Encoding};
use rand::rngs::OsRng;
use rand::RngCore;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Name of the HTTP-only session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Sessions live 30 days from creation. Expiry is fixed at creation time;
/// there is no sliding window or refresh.
pub const SESSION_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000;

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Opaque session token: 32 bytes of CSPRNG output, base64url without
/// padding. Also used for the OAuth CSRF state.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    Base64UrlUnpadded::encode_string(&bytes)
}

/// Session row. Created at login, read on every authenticated request,
/// deleted on logout; never updated. Expired rows are filtered on read,
/// not swept.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: Uuid,
    pub github_id: String,
    pub github_username: String,
    pub expires_at: i64,
}

impl Session {
    pub fn is_valid(&self, now_ms: i64) -> bool {
        self.expires_at > now_ms
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        github_id: &str,
        github_username: &str,
    ) -> anyhow::Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, github_id, github_username, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, github_id, github_username, expires_at
            "#,
        )
        .bind(generate_token())
        .bind(user_id)
        .bind(github_id)
        .bind(github_username)
        .bind(now_millis() + SESSION_TTL_MS)
        .fetch_one(db)
        .await?;
        Ok(session)
    }

    /// Look up a session, dropping it when past expiry. An unknown token
    /// and an expired one are indistinguishable to callers.
    pub async fn find_valid(
        db: &PgPool,
        token: &str,
        now_ms: i64,
    ) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, github_id, github_username, expires_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(session.filter(|s| s.is_valid(now_ms)))
    }

    pub async fn delete(db: &PgPool, token: &str) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM sessions WHERE id = $1"#)
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }
}
