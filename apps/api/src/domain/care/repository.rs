use super::entity::{AncRecord, CareNote, NoteKind};
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareRepository: Send + Sync {
    async fn create_anc(&self, record: &AncRecord) -> Result<AncRecord, DomainError>;
    async fn find_anc(&self, id: Uuid) -> Result<Option<AncRecord>, DomainError>;
    async fn update_anc(&self, record: &AncRecord) -> Result<AncRecord, DomainError>;
    async fn delete_anc(&self, id: Uuid) -> Result<bool, DomainError>;
    /// Most recent compulsory intake recorded for the patient.
    async fn latest_anc_intake(&self, patient_id: Uuid) -> Result<Option<AncRecord>, DomainError>;

    async fn create_note(&self, kind: NoteKind, note: &CareNote) -> Result<CareNote, DomainError>;
    async fn find_note(&self, kind: NoteKind, id: Uuid) -> Result<Option<CareNote>, DomainError>;
    async fn update_note(&self, kind: NoteKind, note: &CareNote) -> Result<CareNote, DomainError>;
    async fn delete_note(&self, kind: NoteKind, id: Uuid) -> Result<bool, DomainError>;
}
