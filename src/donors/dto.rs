use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Donor registration form. Every field is optional at the wire level; presence is
/// checked in [`super::services::validate`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorRegistration {
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "crate::validation::lenient_age")]
    pub age: Option<i32>,
    pub blood_type: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub organ_type: Option<String>,
    pub medical_history: Option<String>,
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorRegisterResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<Uuid>,
}
