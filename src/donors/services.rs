use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::DonorRegistration,
    repo_types::{DonorFields, DonorProfile},
};
use crate::{
    error::AppError,
    storage::{Storage, Upserted},
    validation::{blood_type, optional, required},
};

const MISSING: &str = "Missing required donor information";

pub fn validate(form: DonorRegistration) -> Result<DonorFields, AppError> {
    let (
        Some(full_name),
        Some(age),
        Some(raw_blood_type),
        Some(contact_number),
        Some(address),
        Some(organ_type),
    ) = (
        required(&form.full_name),
        form.age,
        required(&form.blood_type),
        required(&form.contact_number),
        required(&form.address),
        required(&form.organ_type),
    )
    else {
        return Err(AppError::validation(MISSING));
    };

    if age <= 0 {
        return Err(AppError::validation("Age must be a positive number"));
    }
    let blood_type = blood_type(&raw_blood_type)
        .ok_or_else(|| AppError::validation(format!("Invalid blood type {raw_blood_type:?}")))?;

    Ok(DonorFields {
        full_name,
        age,
        blood_type,
        contact_number,
        address,
        organ_type,
        medical_history: optional(form.medical_history),
        emergency_contact: optional(form.emergency_contact),
    })
}

/// Creates the caller's donor profile or replaces every field of the existing one.
pub async fn register(
    storage: &dyn Storage,
    user_id: Uuid,
    form: DonorRegistration,
) -> Result<Upserted, AppError> {
    let fields = validate(form).map_err(|e| {
        warn!(%user_id, error = %e, "donor registration rejected");
        e
    })?;

    let outcome = storage.upsert_donor(user_id, &fields).await?;
    match outcome {
        Upserted::Created(donor_id) => info!(%user_id, %donor_id, "donor registered"),
        Upserted::Updated => info!(%user_id, "donor updated"),
    }
    Ok(outcome)
}

pub async fn profile(storage: &dyn Storage, user_id: Uuid) -> Result<DonorProfile, AppError> {
    storage
        .find_donor(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Donor profile not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> DonorRegistration {
        DonorRegistration {
            full_name: Some("Ann Smith".into()),
            age: Some(42),
            blood_type: Some("o-".into()),
            contact_number: Some("555-0100".into()),
            address: Some("1 Main St".into()),
            organ_type: Some("Kidney".into()),
            medical_history: None,
            emergency_contact: Some("Bob".into()),
        }
    }

    #[test]
    fn complete_form_is_accepted_and_normalized() {
        let fields = validate(complete_form()).unwrap();
        assert_eq!(fields.blood_type, "O-");
        assert_eq!(fields.medical_history, "");
        assert_eq!(fields.emergency_contact, "Bob");
    }

    #[test]
    fn each_required_field_is_enforced() {
        let strip: [fn(&mut DonorRegistration); 6] = [
            |f: &mut DonorRegistration| f.full_name = None,
            |f: &mut DonorRegistration| f.age = None,
            |f: &mut DonorRegistration| f.blood_type = Some("  ".into()),
            |f: &mut DonorRegistration| f.contact_number = None,
            |f: &mut DonorRegistration| f.address = None,
            |f: &mut DonorRegistration| f.organ_type = Some(String::new()),
        ];
        for strip_field in strip {
            let mut form = complete_form();
            strip_field(&mut form);
            match validate(form).unwrap_err() {
                AppError::Validation(msg) => assert_eq!(msg, MISSING),
                other => panic!("expected Validation, got {other:?}"),
            }
        }
    }

    #[test]
    fn bad_age_and_blood_type_are_rejected() {
        let mut form = complete_form();
        form.age = Some(0);
        assert!(matches!(validate(form), Err(AppError::Validation(_))));

        let mut form = complete_form();
        form.blood_type = Some("Z+".into());
        assert!(matches!(validate(form), Err(AppError::Validation(_))));
    }
}
