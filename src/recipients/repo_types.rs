use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Recipient row, one per user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipientProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub blood_type: String,
    pub contact_number: String,
    pub address: String,
    pub organ_needed: String,
    pub medical_condition: String,
    pub urgency_level: String,
    pub hospital_affiliated: String,
    pub doctor_name: String,
    pub insurance_info: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientFields {
    pub full_name: String,
    pub age: i32,
    pub blood_type: String,
    pub contact_number: String,
    pub address: String,
    pub organ_needed: String,
    pub medical_condition: String,
    pub urgency_level: String,
    pub hospital_affiliated: String,
    pub doctor_name: String,
    pub insurance_info: String,
}
