//! Storage capability shared by every feature.
//!
//! The backend is chosen once at startup (see [`crate::state::AppState::init`]) and never
//! swapped while the process runs. [`EphemeralStorage`] keeps everything in process memory
//! and loses it on restart; responses advertise which backend served them.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    auth::repo_types::{NewUser, User},
    donors::repo_types::{DonorFields, DonorProfile},
    hospitals::repo_types::HospitalContact,
    recipients::repo_types::{RecipientFields, RecipientProfile},
};

mod memory;
mod postgres;

pub use memory::EphemeralStorage;
pub use postgres::PersistentStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A uniqueness constraint rejected the write.
    #[error("record already exists")]
    Conflict,

    /// The owning user row does not exist.
    #[error("owner does not exist")]
    MissingOwner,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StorageError::Conflict;
            }
            if db.is_foreign_key_violation() {
                return StorageError::MissingOwner;
            }
        }
        StorageError::Backend(err.into())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Persistent,
    Ephemeral,
}

impl StorageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKind::Persistent => "persistent",
            StorageKind::Ephemeral => "ephemeral",
        }
    }
}

/// Outcome of an owner-keyed upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Created(Uuid),
    Updated,
}

#[async_trait]
pub trait Storage: Send + Sync {
    fn kind(&self) -> StorageKind;

    /// Fails with [`StorageError::Conflict`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> StorageResult<Option<User>>;

    /// Inserts or fully replaces the donor row owned by `user_id`.
    async fn upsert_donor(&self, user_id: Uuid, fields: &DonorFields) -> StorageResult<Upserted>;
    async fn find_donor(&self, user_id: Uuid) -> StorageResult<Option<DonorProfile>>;

    async fn upsert_recipient(
        &self,
        user_id: Uuid,
        fields: &RecipientFields,
    ) -> StorageResult<Upserted>;
    async fn find_recipient(&self, user_id: Uuid) -> StorageResult<Option<RecipientProfile>>;

    async fn create_contact(
        &self,
        user_id: Uuid,
        hospital_name: &str,
        message: &str,
    ) -> StorageResult<HospitalContact>;
    /// Newest first.
    async fn list_contacts(&self, user_id: Uuid) -> StorageResult<Vec<HospitalContact>>;
}
