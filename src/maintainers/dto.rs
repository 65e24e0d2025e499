use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listing::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::maintainers::repo::Maintainer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintainerRequest {
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
}

/// Query parameters recognized by the maintainer listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintainerListQuery {
    pub skill: Option<String>,
    pub language: Option<String>,
    pub availability: Option<String>,
    pub interested_in_paid: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
pub struct MaintainerListResponse {
    pub maintainers: Vec<Maintainer>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct MaintainerResponse {
    pub maintainer: Maintainer,
}
