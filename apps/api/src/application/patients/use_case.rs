use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{PatientForm, PatientOverview};
use crate::domain::{
    patient::{entity::Patient, repository::PatientRepository},
    shared::{
        errors::DomainError,
        listing::ListingRepository,
        pagination::{Page, Pager},
    },
    user::entity::Actor,
};

pub struct PatientsUseCase {
    patients: Arc<dyn PatientRepository>,
    listings: Arc<dyn ListingRepository>,
    pager: Pager,
}

impl PatientsUseCase {
    pub fn new(
        patients: Arc<dyn PatientRepository>,
        listings: Arc<dyn ListingRepository>,
        pager: Pager,
    ) -> Self {
        Self {
            patients,
            listings,
            pager,
        }
    }

    /// Loads a patient or fails with `NotFound`.
    pub async fn get(&self, id: Uuid) -> Result<Patient, DomainError> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Patient id {} doesn't exist.", id)))
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn register(&self, actor: &Actor, form: PatientForm) -> Result<Patient, DomainError> {
        let patient = Patient::register(form.into_details()?);
        let created = self.patients.create(&patient).await?;
        info!(patient_id = %created.id, "Registered patient");
        Ok(created)
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        form: PatientForm,
    ) -> Result<Patient, DomainError> {
        actor.require_admin()?;
        let mut patient = self.get(id).await?;
        patient.apply(form.into_details()?);
        self.patients.update(&patient).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.username))]
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        actor.require_admin()?;
        if !self.patients.delete(id).await? {
            return Err(DomainError::NotFound(format!(
                "Patient with ID {} not found",
                id
            )));
        }
        info!(patient_id = %id, "Deleted patient");
        Ok(())
    }

    pub async fn view(&self, id: Uuid) -> Result<PatientOverview, DomainError> {
        let patient = self.get(id).await?;
        let record_counts = self.patients.record_counts(id).await?;
        Ok(PatientOverview {
            patient,
            record_counts,
        })
    }

    pub async fn list(
        &self,
        requested_page: Option<i64>,
        search: Option<String>,
    ) -> Result<Page<Patient>, DomainError> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let listing = self.listings.patients(search);
        self.pager.paginate(listing.as_ref(), requested_page).await
    }
}
