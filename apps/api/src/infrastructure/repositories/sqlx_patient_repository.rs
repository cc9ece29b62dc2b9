use crate::domain::{
    care::entity::RecordCounts,
    patient::{entity::Patient, repository::PatientRepository},
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

const PATIENT_COLUMNS: &str = "id, name, sex, date_of_birth, phone, address, created_at";

pub struct SqlxPatientRepository {
    pool: PgPool,
}

impl SqlxPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxPatientRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for SqlxPatientRepository {
    #[instrument(skip(self, p), fields(patient_id = %p.id))]
    async fn create(&self, p: &Patient) -> Result<Patient, DomainError> {
        sqlx::query_as::<_, Patient>(&format!(
            "INSERT INTO patients (id, name, sex, date_of_birth, phone, address, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(p.id)
        .bind(&p.name)
        .bind(&p.sex)
        .bind(p.date_of_birth)
        .bind(&p.phone)
        .bind(&p.address)
        .bind(p.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create patient {}: {}", p.id, e);
            DomainError::InfrastructureError(format!("Failed to create patient: {}", e))
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, DomainError> {
        sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    #[instrument(skip(self, p), fields(patient_id = %p.id))]
    async fn update(&self, p: &Patient) -> Result<Patient, DomainError> {
        sqlx::query_as::<_, Patient>(&format!(
            "UPDATE patients
             SET name = $2, sex = $3, date_of_birth = $4, phone = $5, address = $6
             WHERE id = $1
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(p.id)
        .bind(&p.name)
        .bind(&p.sex)
        .bind(p.date_of_birth)
        .bind(&p.phone)
        .bind(&p.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update patient {}: {}", p.id, e);
            DomainError::InfrastructureError(format!("Failed to update patient: {}", e))
        })?
        .ok_or_else(|| DomainError::NotFound(format!("Patient id {} doesn't exist.", p.id)))
    }

    /// Records of the patient go with it (`ON DELETE CASCADE`).
    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn record_counts(&self, patient_id: Uuid) -> Result<RecordCounts, DomainError> {
        let (anc, ldr, pnc) = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT
                (SELECT COUNT(*) FROM anc_records WHERE patient_id = $1),
                (SELECT COUNT(*) FROM ldr_notes WHERE patient_id = $1),
                (SELECT COUNT(*) FROM pnc_notes WHERE patient_id = $1)",
        )
        .bind(patient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(RecordCounts { anc, ldr, pnc })
    }
}
