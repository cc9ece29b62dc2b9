use crate::domain::{
    care::{
        entity::{AncRecord, CareNote, NoteKind},
        repository::CareRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

pub(crate) const ANC_COLUMNS: &str = "id, author_id, patient_id, compulsory, created_at, \
    expected_delivery_date, terminate, height, last_menstrual_period, parity, living_children, gravida, \
    medical_surgical_complications, obstetric_other_complications, weight, gestation, blood_pressure, \
    urine_dipstick, fetal_assessment, fetal_heartbeat, symphysiofundal_height, complications, \
    vaccination, folic_acid, mendabazole, hepatitis";

pub(crate) const NOTE_COLUMNS: &str = "id, author_id, patient_id, created_at, category, description";

pub struct SqlxCareRepository {
    pool: PgPool,
}

impl SqlxCareRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxCareRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl CareRepository for SqlxCareRepository {
    #[instrument(skip(self, r), fields(record_id = %r.id, compulsory = r.compulsory))]
    async fn create_anc(&self, r: &AncRecord) -> Result<AncRecord, DomainError> {
        let created = sqlx::query_as::<_, AncRecord>(&format!(
            "INSERT INTO anc_records ({ANC_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                     $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)
             RETURNING {ANC_COLUMNS}"
        ))
        .bind(r.id)
        .bind(r.author_id)
        .bind(r.patient_id)
        .bind(r.compulsory)
        .bind(r.created_at)
        .bind(r.expected_delivery_date)
        .bind(r.terminate)
        .bind(&r.height)
        .bind(r.last_menstrual_period)
        .bind(&r.parity)
        .bind(&r.living_children)
        .bind(&r.gravida)
        .bind(&r.medical_surgical_complications)
        .bind(&r.obstetric_other_complications)
        .bind(&r.weight)
        .bind(&r.gestation)
        .bind(&r.blood_pressure)
        .bind(r.urine_dipstick)
        .bind(&r.fetal_assessment)
        .bind(&r.fetal_heartbeat)
        .bind(&r.symphysiofundal_height)
        .bind(&r.complications)
        .bind(r.vaccination)
        .bind(r.folic_acid)
        .bind(r.mendabazole)
        .bind(r.hepatitis)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create ANC record {}: {}", r.id, e);
            DomainError::InfrastructureError(format!("Failed to create ANC record: {}", e))
        })?;

        debug!("Inserted ANC record");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_anc(&self, id: Uuid) -> Result<Option<AncRecord>, DomainError> {
        sqlx::query_as::<_, AncRecord>(&format!(
            "SELECT {ANC_COLUMNS} FROM anc_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    /// Writes back both field groups; the group that does not apply to the
    /// record is left as it was loaded.
    #[instrument(skip(self, r), fields(record_id = %r.id))]
    async fn update_anc(&self, r: &AncRecord) -> Result<AncRecord, DomainError> {
        sqlx::query_as::<_, AncRecord>(&format!(
            "UPDATE anc_records SET
                expected_delivery_date = $2, terminate = $3, height = $4,
                last_menstrual_period = $5, parity = $6, living_children = $7, gravida = $8,
                medical_surgical_complications = $9, obstetric_other_complications = $10,
                weight = $11, gestation = $12, blood_pressure = $13, urine_dipstick = $14,
                fetal_assessment = $15, fetal_heartbeat = $16, symphysiofundal_height = $17,
                complications = $18, vaccination = $19, folic_acid = $20,
                mendabazole = $21, hepatitis = $22
             WHERE id = $1
             RETURNING {ANC_COLUMNS}"
        ))
        .bind(r.id)
        .bind(r.expected_delivery_date)
        .bind(r.terminate)
        .bind(&r.height)
        .bind(r.last_menstrual_period)
        .bind(&r.parity)
        .bind(&r.living_children)
        .bind(&r.gravida)
        .bind(&r.medical_surgical_complications)
        .bind(&r.obstetric_other_complications)
        .bind(&r.weight)
        .bind(&r.gestation)
        .bind(&r.blood_pressure)
        .bind(r.urine_dipstick)
        .bind(&r.fetal_assessment)
        .bind(&r.fetal_heartbeat)
        .bind(&r.symphysiofundal_height)
        .bind(&r.complications)
        .bind(r.vaccination)
        .bind(r.folic_acid)
        .bind(r.mendabazole)
        .bind(r.hepatitis)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update ANC record {}: {}", r.id, e);
            DomainError::InfrastructureError(format!("Failed to update ANC record: {}", e))
        })?
        .ok_or_else(|| DomainError::NotFound(format!("ANC record {} doesn't exist.", r.id)))
    }

    #[instrument(skip(self))]
    async fn delete_anc(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM anc_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn latest_anc_intake(&self, patient_id: Uuid) -> Result<Option<AncRecord>, DomainError> {
        sqlx::query_as::<_, AncRecord>(&format!(
            "SELECT {ANC_COLUMNS} FROM anc_records
             WHERE patient_id = $1 AND compulsory
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        ))
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    #[instrument(skip(self, note), fields(note_id = %note.id))]
    async fn create_note(&self, kind: NoteKind, note: &CareNote) -> Result<CareNote, DomainError> {
        sqlx::query_as::<_, CareNote>(&format!(
            "INSERT INTO {} ({NOTE_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {NOTE_COLUMNS}",
            kind.table()
        ))
        .bind(note.id)
        .bind(note.author_id)
        .bind(note.patient_id)
        .bind(note.created_at)
        .bind(&note.category)
        .bind(&note.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create {} {}: {}", kind.table(), note.id, e);
            DomainError::InfrastructureError(format!("Failed to create note: {}", e))
        })
    }

    #[instrument(skip(self))]
    async fn find_note(&self, kind: NoteKind, id: Uuid) -> Result<Option<CareNote>, DomainError> {
        sqlx::query_as::<_, CareNote>(&format!(
            "SELECT {NOTE_COLUMNS} FROM {} WHERE id = $1",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }

    #[instrument(skip(self, note), fields(note_id = %note.id))]
    async fn update_note(&self, kind: NoteKind, note: &CareNote) -> Result<CareNote, DomainError> {
        sqlx::query_as::<_, CareNote>(&format!(
            "UPDATE {} SET category = $2, description = $3
             WHERE id = $1
             RETURNING {NOTE_COLUMNS}",
            kind.table()
        ))
        .bind(note.id)
        .bind(&note.category)
        .bind(&note.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?
        .ok_or_else(|| DomainError::NotFound(format!("{} {} doesn't exist.", kind.label(), note.id)))
    }

    #[instrument(skip(self))]
    async fn delete_note(&self, kind: NoteKind, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}
