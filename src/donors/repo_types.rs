use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Donor row, one per user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DonorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub blood_type: String,
    pub contact_number: String,
    pub address: String,
    pub organ_type: String,
    pub medical_history: String,
    pub emergency_contact: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated mutable donor fields; every upsert writes all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorFields {
    pub full_name: String,
    pub age: i32,
    pub blood_type: String,
    pub contact_number: String,
    pub address: String,
    pub organ_type: String,
    pub medical_history: String,
    pub emergency_contact: String,
}
