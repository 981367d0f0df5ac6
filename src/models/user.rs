use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A user account as stored in the `users` table.
///
/// The password hash is carried for credential verification but is never
/// serialized into API responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    /// Stored exactly as supplied at signup; uniqueness and login lookups
    /// are case-sensitive.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
