use std::fmt;

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
///
/// Deliberately not `Serialize`: responses go through [`crate::users::dto::PublicUser`].
#[derive(Clone, FromRow)]
pub struct User {
    pub id: Uuid,                      // unique user ID
    pub username: Option<String>,      // optional display name
    pub email: String,                 // normalized (trimmed, lowercase) email
    pub password_hash: String,         // Argon2 PHC string
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Values needed to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
}
