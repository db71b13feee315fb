//! User row models.
//!
//! Map to the `users` table; used by UserRepository and the admin listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full user row as stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ref_tag: Option<String>,
    pub do_not_disturb: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user slice shown by the /status command.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserStats {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub do_not_disturb: bool,
    pub created_at: DateTime<Utc>,
}
