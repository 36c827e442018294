use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Storage, StorageError, StorageKind, StorageResult, Upserted};
use crate::{
    auth::repo_types::{NewUser, User},
    donors::repo_types::{DonorFields, DonorProfile},
    hospitals::repo_types::{HospitalContact, STATUS_PENDING},
    recipients::repo_types::{RecipientFields, RecipientProfile},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    emails: HashMap<String, Uuid>,
    donors: HashMap<Uuid, DonorProfile>,
    recipients: HashMap<Uuid, RecipientProfile>,
    // Insertion order is creation order.
    contacts: Vec<HospitalContact>,
}

impl Tables {
    fn require_owner(&self, user_id: Uuid) -> StorageResult<()> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(StorageError::MissingOwner)
        }
    }
}

/// Process-local storage used when no database is available.
///
/// Nothing survives a restart. Every write happens under a single write lock, so
/// owner-keyed upserts cannot produce duplicate rows.
#[derive(Default)]
pub struct EphemeralStorage {
    tables: RwLock<Tables>,
}

impl EphemeralStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for EphemeralStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Ephemeral
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let mut t = self.tables.write().await;
        if t.emails.contains_key(&user.email) {
            return Err(StorageError::Conflict);
        }
        if let Some(name) = &user.username {
            if t.users.values().any(|u| u.username.as_ref() == Some(name)) {
                return Err(StorageError::Conflict);
            }
        }

        let now = OffsetDateTime::now_utc();
        let row = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        t.emails.insert(row.email.clone(), row.id);
        t.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.emails.get(email).and_then(|id| t.users.get(id)).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StorageResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn upsert_donor(&self, user_id: Uuid, f: &DonorFields) -> StorageResult<Upserted> {
        let mut t = self.tables.write().await;
        t.require_owner(user_id)?;
        let now = OffsetDateTime::now_utc();

        if let Some(row) = t.donors.get_mut(&user_id) {
            row.full_name = f.full_name.clone();
            row.age = f.age;
            row.blood_type = f.blood_type.clone();
            row.contact_number = f.contact_number.clone();
            row.address = f.address.clone();
            row.organ_type = f.organ_type.clone();
            row.medical_history = f.medical_history.clone();
            row.emergency_contact = f.emergency_contact.clone();
            row.updated_at = now;
            return Ok(Upserted::Updated);
        }

        let id = Uuid::new_v4();
        t.donors.insert(
            user_id,
            DonorProfile {
                id,
                user_id,
                full_name: f.full_name.clone(),
                age: f.age,
                blood_type: f.blood_type.clone(),
                contact_number: f.contact_number.clone(),
                address: f.address.clone(),
                organ_type: f.organ_type.clone(),
                medical_history: f.medical_history.clone(),
                emergency_contact: f.emergency_contact.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(Upserted::Created(id))
    }

    async fn find_donor(&self, user_id: Uuid) -> StorageResult<Option<DonorProfile>> {
        Ok(self.tables.read().await.donors.get(&user_id).cloned())
    }

    async fn upsert_recipient(
        &self,
        user_id: Uuid,
        f: &RecipientFields,
    ) -> StorageResult<Upserted> {
        let mut t = self.tables.write().await;
        t.require_owner(user_id)?;
        let now = OffsetDateTime::now_utc();

        if let Some(row) = t.recipients.get_mut(&user_id) {
            row.full_name = f.full_name.clone();
            row.age = f.age;
            row.blood_type = f.blood_type.clone();
            row.contact_number = f.contact_number.clone();
            row.address = f.address.clone();
            row.organ_needed = f.organ_needed.clone();
            row.medical_condition = f.medical_condition.clone();
            row.urgency_level = f.urgency_level.clone();
            row.hospital_affiliated = f.hospital_affiliated.clone();
            row.doctor_name = f.doctor_name.clone();
            row.insurance_info = f.insurance_info.clone();
            row.updated_at = now;
            return Ok(Upserted::Updated);
        }

        let id = Uuid::new_v4();
        t.recipients.insert(
            user_id,
            RecipientProfile {
                id,
                user_id,
                full_name: f.full_name.clone(),
                age: f.age,
                blood_type: f.blood_type.clone(),
                contact_number: f.contact_number.clone(),
                address: f.address.clone(),
                organ_needed: f.organ_needed.clone(),
                medical_condition: f.medical_condition.clone(),
                urgency_level: f.urgency_level.clone(),
                hospital_affiliated: f.hospital_affiliated.clone(),
                doctor_name: f.doctor_name.clone(),
                insurance_info: f.insurance_info.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(Upserted::Created(id))
    }

    async fn find_recipient(&self, user_id: Uuid) -> StorageResult<Option<RecipientProfile>> {
        Ok(self.tables.read().await.recipients.get(&user_id).cloned())
    }

    async fn create_contact(
        &self,
        user_id: Uuid,
        hospital_name: &str,
        message: &str,
    ) -> StorageResult<HospitalContact> {
        let mut t = self.tables.write().await;
        t.require_owner(user_id)?;
        let row = HospitalContact {
            id: Uuid::new_v4(),
            user_id,
            hospital_name: hospital_name.to_string(),
            message: message.to_string(),
            status: STATUS_PENDING.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.contacts.push(row.clone());
        Ok(row)
    }

    async fn list_contacts(&self, user_id: Uuid) -> StorageResult<Vec<HospitalContact>> {
        let t = self.tables.read().await;
        Ok(t.contacts
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: None,
            email: email.into(),
            password_hash: "$argon2id$fake".into(),
        }
    }

    fn donor_fields(name: &str, organ: &str) -> DonorFields {
        DonorFields {
            full_name: name.into(),
            age: 30,
            blood_type: "O+".into(),
            contact_number: "555-0100".into(),
            address: "1 Main St".into(),
            organ_type: organ.into(),
            medical_history: String::new(),
            emergency_contact: String::new(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_and_creates_no_row() {
        let store = EphemeralStorage::new();
        store.create_user(new_user("a@x.com")).await.unwrap();
        let err = store.create_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
        assert_eq!(store.tables.read().await.users.len(), 1);
    }

    #[tokio::test]
    async fn users_are_found_by_email_and_id() {
        let store = EphemeralStorage::new();
        let user = store.create_user(new_user("b@x.com")).await.unwrap();
        let by_email = store.find_user_by_email("b@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(store.find_user_by_id(user.id).await.unwrap().is_some());
        assert!(store.find_user_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn donor_upsert_creates_then_replaces_all_fields() {
        let store = EphemeralStorage::new();
        let user = store.create_user(new_user("d@x.com")).await.unwrap();

        let first = store
            .upsert_donor(user.id, &donor_fields("Ann", "Kidney"))
            .await
            .unwrap();
        let Upserted::Created(id) = first else {
            panic!("expected Created, got {first:?}");
        };

        let mut replacement = donor_fields("Ann Smith", "Liver");
        replacement.age = 31;
        replacement.medical_history = "none".into();
        let second = store.upsert_donor(user.id, &replacement).await.unwrap();
        assert_eq!(second, Upserted::Updated);

        let row = store.find_donor(user.id).await.unwrap().unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.full_name, "Ann Smith");
        assert_eq!(row.organ_type, "Liver");
        assert_eq!(row.age, 31);
        assert_eq!(row.medical_history, "none");
        assert!(row.updated_at >= row.created_at);
        assert_eq!(store.tables.read().await.donors.len(), 1);
    }

    #[tokio::test]
    async fn writes_for_unknown_owner_are_rejected() {
        let store = EphemeralStorage::new();
        let err = store
            .upsert_donor(Uuid::new_v4(), &donor_fields("Ghost", "Heart"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::MissingOwner));

        let err = store
            .create_contact(Uuid::new_v4(), "City General Hospital", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::MissingOwner));
    }

    #[tokio::test]
    async fn contacts_are_listed_newest_first_per_owner() {
        let store = EphemeralStorage::new();
        let me = store.create_user(new_user("me@x.com")).await.unwrap();
        let other = store.create_user(new_user("other@x.com")).await.unwrap();

        for msg in ["first", "second", "third"] {
            store.create_contact(me.id, "City General Hospital", msg).await.unwrap();
        }
        store.create_contact(other.id, "Memorial Medical Center", "not mine").await.unwrap();

        let listed = store.list_contacts(me.id).await.unwrap();
        let messages: Vec<_> = listed.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, ["third", "second", "first"]);
        assert!(listed.iter().all(|c| c.status == STATUS_PENDING));
    }
}
