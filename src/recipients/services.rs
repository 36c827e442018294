use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::RecipientRegistration,
    repo_types::{RecipientFields, RecipientProfile},
};
use crate::{
    error::AppError,
    storage::{Storage, Upserted},
    validation::{blood_type, optional, required},
};

const MISSING: &str = "Missing required recipient information";

pub fn validate(form: RecipientRegistration) -> Result<RecipientFields, AppError> {
    let (
        Some(full_name),
        Some(age),
        Some(raw_blood_type),
        Some(contact_number),
        Some(address),
        Some(organ_needed),
        Some(urgency_level),
    ) = (
        required(&form.full_name),
        form.age,
        required(&form.blood_type),
        required(&form.contact_number),
        required(&form.address),
        required(&form.organ_needed),
        required(&form.urgency_level),
    )
    else {
        return Err(AppError::validation(MISSING));
    };

    if age <= 0 {
        return Err(AppError::validation("Age must be a positive number"));
    }
    let blood_type = blood_type(&raw_blood_type)
        .ok_or_else(|| AppError::validation(format!("Invalid blood type {raw_blood_type:?}")))?;

    Ok(RecipientFields {
        full_name,
        age,
        blood_type,
        contact_number,
        address,
        organ_needed,
        medical_condition: optional(form.medical_condition),
        urgency_level,
        hospital_affiliated: optional(form.hospital_affiliated),
        doctor_name: optional(form.doctor_name),
        insurance_info: optional(form.insurance_info),
    })
}

pub async fn register(
    storage: &dyn Storage,
    user_id: Uuid,
    form: RecipientRegistration,
) -> Result<Upserted, AppError> {
    let fields = validate(form).map_err(|e| {
        warn!(%user_id, error = %e, "recipient registration rejected");
        e
    })?;

    let outcome = storage.upsert_recipient(user_id, &fields).await?;
    match outcome {
        Upserted::Created(recipient_id) => info!(%user_id, %recipient_id, "recipient registered"),
        Upserted::Updated => info!(%user_id, "recipient updated"),
    }
    Ok(outcome)
}

pub async fn profile(storage: &dyn Storage, user_id: Uuid) -> Result<RecipientProfile, AppError> {
    storage
        .find_recipient(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipient profile not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::repo_types::NewUser, state::AppState};

    fn complete_form() -> RecipientRegistration {
        RecipientRegistration {
            full_name: Some("Carl Jones".into()),
            age: Some(57),
            blood_type: Some("AB+".into()),
            contact_number: Some("555-0199".into()),
            address: Some("9 Elm St".into()),
            organ_needed: Some("Liver".into()),
            urgency_level: Some("high".into()),
            doctor_name: Some("Dr. Who".into()),
            ..Default::default()
        }
    }

    #[test]
    fn urgency_is_required_for_recipients() {
        let mut form = complete_form();
        form.urgency_level = None;
        match validate(form).unwrap_err() {
            AppError::Validation(msg) => assert_eq!(msg, MISSING),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let fields = validate(complete_form()).unwrap();
        assert_eq!(fields.medical_condition, "");
        assert_eq!(fields.insurance_info, "");
        assert_eq!(fields.doctor_name, "Dr. Who");
    }

    #[tokio::test]
    async fn register_then_reregister_replaces_the_profile() {
        let state = AppState::fake();
        let storage = state.storage.as_ref();
        let user = storage
            .create_user(NewUser {
                username: None,
                email: "r@x.com".into(),
                password_hash: "$argon2id$fake".into(),
            })
            .await
            .unwrap();

        assert!(matches!(
            register(storage, user.id, complete_form()).await.unwrap(),
            Upserted::Created(_)
        ));

        let mut form = complete_form();
        form.organ_needed = Some("Kidney".into());
        form.urgency_level = Some("critical".into());
        form.doctor_name = None;
        assert_eq!(register(storage, user.id, form).await.unwrap(), Upserted::Updated);

        let row = profile(storage, user.id).await.unwrap();
        assert_eq!(row.organ_needed, "Kidney");
        assert_eq!(row.urgency_level, "critical");
        assert_eq!(row.doctor_name, "");
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let state = AppState::fake();
        let err = profile(state.storage.as_ref(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
