use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;

/// Public part of the user returned to the client. Has no password field to leak.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serialization_omits_password() {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            username: None,
            email: "test@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert!(json.get("id").is_some());
        assert!(json.get("created_at").is_some());
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
