use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Role, UserStatus};

/// Authenticated user profile, as returned by `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub must_change_password: bool,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
