use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRegistration {
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "crate::validation::lenient_age")]
    pub age: Option<i32>,
    pub blood_type: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub organ_needed: Option<String>,
    pub medical_condition: Option<String>,
    pub urgency_level: Option<String>,
    pub hospital_affiliated: Option<String>,
    pub doctor_name: Option<String>,
    pub insurance_info: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRegisterResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<Uuid>,
}
