use tracing::{info, warn};
use uuid::Uuid;

use super::{dto::ContactRequest, repo_types::HospitalContact};
use crate::{error::AppError, storage::Storage, validation::required};

pub async fn contact(
    storage: &dyn Storage,
    user_id: Uuid,
    req: ContactRequest,
) -> Result<HospitalContact, AppError> {
    let (Some(hospital_name), Some(message)) =
        (required(&req.hospital_name), required(&req.message))
    else {
        warn!(%user_id, "hospital contact missing fields");
        return Err(AppError::validation("Hospital name and message are required"));
    };

    let row = storage.create_contact(user_id, &hospital_name, &message).await?;
    info!(%user_id, contact_id = %row.id, hospital = %row.hospital_name, "hospital contact recorded");
    Ok(row)
}

pub async fn contacts(storage: &dyn Storage, user_id: Uuid) -> Result<Vec<HospitalContact>, AppError> {
    Ok(storage.list_contacts(user_id).await?)
}
