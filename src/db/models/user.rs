use chrono::{DateTime, Utc};

use crate::models::Gender;

/// A stored account row. Only the accounts module sees the hash; everything
/// else works with `models::UserProfile`.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub gender: Option<Gender>,
    pub created_at: DateTime<Utc>,
}
