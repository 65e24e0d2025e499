use serde::{Deserialize, Serialize};

use crate::users::repo::User;

/// Request body for creating a user directly (the OAuth callback is the
/// usual path).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub github_id: String,
    pub github_username: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}
