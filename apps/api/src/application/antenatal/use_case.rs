use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{AncDetail, AncHistory, AncIntakeForm, AncVisitForm};
use crate::domain::{
    care::{entity::AncRecord, repository::CareRepository},
    patient::{entity::Patient, repository::PatientRepository},
    shared::{errors::DomainError, listing::ListingRepository, pagination::Pager},
    user::entity::Actor,
};

pub struct AntenatalUseCase {
    care: Arc<dyn CareRepository>,
    patients: Arc<dyn PatientRepository>,
    listings: Arc<dyn ListingRepository>,
    pager: Pager,
}

impl AntenatalUseCase {
    pub fn new(
        care: Arc<dyn CareRepository>,
        patients: Arc<dyn PatientRepository>,
        listings: Arc<dyn ListingRepository>,
        pager: Pager,
    ) -> Self {
        Self {
            care,
            patients,
            listings,
            pager,
        }
    }

    async fn patient(&self, id: Uuid) -> Result<Patient, DomainError> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Patient id {} doesn't exist.", id)))
    }

    /// Loads a record the actor wrote.
    async fn owned(&self, actor: &Actor, id: Uuid) -> Result<AncRecord, DomainError> {
        let record = self
            .care
            .find_anc(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("ANC record {} doesn't exist.", id)))?;
        actor.require_author(record.author_id)?;
        Ok(record)
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn add_intake(
        &self,
        actor: &Actor,
        patient_id: Uuid,
        form: AncIntakeForm,
    ) -> Result<AncRecord, DomainError> {
        self.patient(patient_id).await?;
        let record = AncRecord::new_intake(actor.user_id, patient_id, form.into_intake()?);
        let created = self.care.create_anc(&record).await?;
        info!(record_id = %created.id, %patient_id, "Added ANC intake");
        Ok(created)
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn add_visit(
        &self,
        actor: &Actor,
        patient_id: Uuid,
        form: AncVisitForm,
    ) -> Result<AncRecord, DomainError> {
        self.patient(patient_id).await?;
        let record = AncRecord::new_visit(actor.user_id, patient_id, form.into_visit()?);
        let created = self.care.create_anc(&record).await?;
        info!(record_id = %created.id, %patient_id, "Added ANC visit");
        Ok(created)
    }

    pub async fn view(&self, actor: &Actor, id: Uuid) -> Result<AncDetail, DomainError> {
        let record = self.owned(actor, id).await?;
        let patient = self.patient(record.patient_id).await?;
        Ok(AncDetail { patient, record })
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn update_intake(
        &self,
        actor: &Actor,
        id: Uuid,
        form: AncIntakeForm,
    ) -> Result<AncRecord, DomainError> {
        let mut record = self.owned(actor, id).await?;
        if !record.compulsory {
            return Err(DomainError::validation(
                "This record is a follow-up visit, not an intake.",
            ));
        }
        record.apply_intake(form.into_intake()?);
        self.care.update_anc(&record).await
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn update_visit(
        &self,
        actor: &Actor,
        id: Uuid,
        form: AncVisitForm,
    ) -> Result<AncRecord, DomainError> {
        let mut record = self.owned(actor, id).await?;
        if record.compulsory {
            return Err(DomainError::validation(
                "This record is an intake, not a follow-up visit.",
            ));
        }
        record.apply_visit(form.into_visit()?);
        self.care.update_anc(&record).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.username))]
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        self.owned(actor, id).await?;
        if !self.care.delete_anc(id).await? {
            return Err(DomainError::NotFound(format!(
                "ANC record {} doesn't exist.",
                id
            )));
        }
        info!(record_id = %id, "Deleted ANC record");
        Ok(())
    }

    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
        requested_page: Option<i64>,
    ) -> Result<AncHistory, DomainError> {
        let patient = self.patient(patient_id).await?;
        let current_info = self.care.latest_anc_intake(patient_id).await?;
        let listing = self.listings.patient_anc(patient_id);
        let records = self.pager.paginate(listing.as_ref(), requested_page).await?;
        Ok(AncHistory {
            patient,
            current_info,
            records,
        })
    }
}
