use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::listing::{decode_list, encode_list, ListQuery};
use crate::maintainers::dto::CreateMaintainerRequest;

#[derive(Debug, Clone, FromRow)]
pub struct MaintainerRow {
    pub id: Uuid,
    pub github_username: String,
    pub name: String,
    pub bio: Option<String>,
    pub skills: String,
    pub languages: String,
    pub experience: Option<String>,
    pub availability: String,
    pub interested_in_paid: bool,
    pub portfolio_url: Option<String>,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct Maintainer {
    pub id: Uuid,
    pub github_username: String,
    pub name: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub experience: Option<Vec<String>>,
    pub availability: String,
    pub interested_in_paid: bool,
    pub portfolio_url: Option<String>,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<MaintainerRow> for Maintainer {
    fn from(row: MaintainerRow) -> Self {
        Maintainer {
            id: row.id,
            github_username: row.github_username,
            name: row.name,
            bio: row.bio,
            skills: decode_list(&row.skills),
            languages: decode_list(&row.languages),
            experience: row.experience.as_deref().map(decode_list),
            availability: row.availability,
            interested_in_paid: row.interested_in_paid,
            portfolio_url: row.portfolio_url,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub async fn create(db: &PgPool, req: &CreateMaintainerRequest) -> anyhow::Result<Maintainer> {
    let row = sqlx::query_as::<_, MaintainerRow>(
        r#"
        INSERT INTO maintainers (
            id, github_username, name, bio, skills, languages,
            experience, availability, interested_in_paid, portfolio_url, user_id
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.github_username)
    .bind(&req.name)
    .bind(req.bio.as_deref())
    .bind(encode_list(&req.skills))
    .bind(encode_list(&req.languages))
    .bind(req.experience.as_deref().map(encode_list))
    .bind(&req.availability)
    .bind(req.interested_in_paid)
    .bind(req.portfolio_url.as_deref())
    .bind(req.user_id)
    .fetch_one(db)
    .await?;
    Ok(row.into())
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Maintainer>> {
    let row = sqlx::query_as::<_, MaintainerRow>(r#"SELECT * FROM maintainers WHERE id = $1"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(Maintainer::from))
}

/// Page fetch plus count with identical predicates, as for projects.
pub async fn list(db: &PgPool, query: &ListQuery) -> anyhow::Result<(Vec<Maintainer>, i64)> {
    let mut select = query.select();
    let rows = select
        .build_query_as::<MaintainerRow>()
        .fetch_all(db)
        .await?;
    let mut count = query.count();
    let total = count.build_query_scalar::<i64>().fetch_one(db).await?;
    Ok((rows.into_iter().map(Maintainer::from).collect(), total))
}
