use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tracing::{info, warn};
use uuid::Uuid;

use super::{Storage, StorageKind, StorageResult, Upserted};
use crate::{
    auth::repo_types::{NewUser, User},
    config::DatabaseConfig,
    donors::repo_types::{DonorFields, DonorProfile},
    hospitals::repo_types::{HospitalContact, STATUS_PENDING},
    recipients::repo_types::{RecipientFields, RecipientProfile},
};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// Postgres-backed storage over a bounded connection pool.
#[derive(Clone)]
pub struct PersistentStorage {
    db: PgPool,
}

impl PersistentStorage {
    pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        let options = match &cfg.url {
            Some(url) => url.parse::<PgConnectOptions>().context("parse DATABASE_URL")?,
            None => PgConnectOptions::new()
                .host(&cfg.host)
                .port(cfg.port)
                .username(&cfg.user)
                .password(&cfg.password)
                .database(&cfg.name),
        };

        let db = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
            .connect_with(options)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            warn!(error = %e, "migration failed; continuing");
        }

        info!(max_connections = cfg.max_connections, "database pool ready");
        Ok(Self { db })
    }
}

#[async_trait]
impl Storage for PersistentStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Persistent
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn upsert_donor(&self, user_id: Uuid, f: &DonorFields) -> StorageResult<Upserted> {
        // xmax is 0 only for a freshly inserted tuple.
        let (id, inserted) = sqlx::query_as::<_, (Uuid, bool)>(
            r#"
            INSERT INTO donors (
                user_id, full_name, age, blood_type, contact_number, address,
                organ_type, medical_history, emergency_contact
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                age = EXCLUDED.age,
                blood_type = EXCLUDED.blood_type,
                contact_number = EXCLUDED.contact_number,
                address = EXCLUDED.address,
                organ_type = EXCLUDED.organ_type,
                medical_history = EXCLUDED.medical_history,
                emergency_contact = EXCLUDED.emergency_contact,
                updated_at = now()
            RETURNING id, (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(&f.full_name)
        .bind(f.age)
        .bind(&f.blood_type)
        .bind(&f.contact_number)
        .bind(&f.address)
        .bind(&f.organ_type)
        .bind(&f.medical_history)
        .bind(&f.emergency_contact)
        .fetch_one(&self.db)
        .await?;

        Ok(if inserted { Upserted::Created(id) } else { Upserted::Updated })
    }

    async fn find_donor(&self, user_id: Uuid) -> StorageResult<Option<DonorProfile>> {
        let row = sqlx::query_as::<_, DonorProfile>(
            r#"
            SELECT id, user_id, full_name, age, blood_type, contact_number, address,
                   organ_type, medical_history, emergency_contact, created_at, updated_at
            FROM donors
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn upsert_recipient(
        &self,
        user_id: Uuid,
        f: &RecipientFields,
    ) -> StorageResult<Upserted> {
        let (id, inserted) = sqlx::query_as::<_, (Uuid, bool)>(
            r#"
            INSERT INTO recipients (
                user_id, full_name, age, blood_type, contact_number, address,
                organ_needed, medical_condition, urgency_level, hospital_affiliated,
                doctor_name, insurance_info
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                age = EXCLUDED.age,
                blood_type = EXCLUDED.blood_type,
                contact_number = EXCLUDED.contact_number,
                address = EXCLUDED.address,
                organ_needed = EXCLUDED.organ_needed,
                medical_condition = EXCLUDED.medical_condition,
                urgency_level = EXCLUDED.urgency_level,
                hospital_affiliated = EXCLUDED.hospital_affiliated,
                doctor_name = EXCLUDED.doctor_name,
                insurance_info = EXCLUDED.insurance_info,
                updated_at = now()
            RETURNING id, (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(&f.full_name)
        .bind(f.age)
        .bind(&f.blood_type)
        .bind(&f.contact_number)
        .bind(&f.address)
        .bind(&f.organ_needed)
        .bind(&f.medical_condition)
        .bind(&f.urgency_level)
        .bind(&f.hospital_affiliated)
        .bind(&f.doctor_name)
        .bind(&f.insurance_info)
        .fetch_one(&self.db)
        .await?;

        Ok(if inserted { Upserted::Created(id) } else { Upserted::Updated })
    }

    async fn find_recipient(&self, user_id: Uuid) -> StorageResult<Option<RecipientProfile>> {
        let row = sqlx::query_as::<_, RecipientProfile>(
            r#"
            SELECT id, user_id, full_name, age, blood_type, contact_number, address,
                   organ_needed, medical_condition, urgency_level, hospital_affiliated,
                   doctor_name, insurance_info, created_at, updated_at
            FROM recipients
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn create_contact(
        &self,
        user_id: Uuid,
        hospital_name: &str,
        message: &str,
    ) -> StorageResult<HospitalContact> {
        let row = sqlx::query_as::<_, HospitalContact>(
            r#"
            INSERT INTO hospital_contacts (user_id, hospital_name, message, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, hospital_name, message, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(hospital_name)
        .bind(message)
        .bind(STATUS_PENDING)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_contacts(&self, user_id: Uuid) -> StorageResult<Vec<HospitalContact>> {
        let rows = sqlx::query_as::<_, HospitalContact>(
            r#"
            SELECT id, user_id, hospital_name, message, status, created_at
            FROM hospital_contacts
            WHERE user_id = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
