use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";

/// Message a user sent to a hospital. Append-only.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HospitalContact {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hospital_name: String,
    pub message: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
