use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{NoteDetail, NoteForm, NoteHistory};
use crate::domain::{
    care::{
        entity::{CareNote, NoteKind},
        repository::CareRepository,
    },
    patient::{entity::Patient, repository::PatientRepository},
    shared::{errors::DomainError, listing::ListingRepository, pagination::Pager},
    user::entity::Actor,
};

/// Labour/delivery and postnatal notes. Both kinds share every rule and
/// differ only in where they are stored.
pub struct CareNotesUseCase {
    care: Arc<dyn CareRepository>,
    patients: Arc<dyn PatientRepository>,
    listings: Arc<dyn ListingRepository>,
    pager: Pager,
}

impl CareNotesUseCase {
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

    async fn owned(&self, actor: &Actor, kind: NoteKind, id: Uuid) -> Result<CareNote, DomainError> {
        let note = self
            .care
            .find_note(kind, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("{} {} doesn't exist.", kind.label(), id)))?;
        actor.require_author(note.author_id)?;
        Ok(note)
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn add(
        &self,
        actor: &Actor,
        kind: NoteKind,
        patient_id: Uuid,
        form: NoteForm,
    ) -> Result<CareNote, DomainError> {
        self.patient(patient_id).await?;
        let note = CareNote::new(actor.user_id, patient_id, form.into_content()?);
        let created = self.care.create_note(kind, &note).await?;
        info!(note_id = %created.id, %patient_id, ?kind, "Added care note");
        Ok(created)
    }

    pub async fn view(
        &self,
        actor: &Actor,
        kind: NoteKind,
        id: Uuid,
    ) -> Result<NoteDetail, DomainError> {
        let note = self.owned(actor, kind, id).await?;
        let patient = self.patient(note.patient_id).await?;
        Ok(NoteDetail {
            kind,
            patient,
            note,
        })
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn update(
        &self,
        actor: &Actor,
        kind: NoteKind,
        id: Uuid,
        form: NoteForm,
    ) -> Result<CareNote, DomainError> {
        let mut note = self.owned(actor, kind, id).await?;
        note.apply(form.into_content()?);
        self.care.update_note(kind, &note).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.username))]
    pub async fn delete(&self, actor: &Actor, kind: NoteKind, id: Uuid) -> Result<(), DomainError> {
        self.owned(actor, kind, id).await?;
        if !self.care.delete_note(kind, id).await? {
            return Err(DomainError::NotFound(format!(
                "{} {} doesn't exist.",
                kind.label(),
                id
            )));
        }
        info!(note_id = %id, ?kind, "Deleted care note");
        Ok(())
    }

    pub async fn list_for_patient(
        &self,
        kind: NoteKind,
        patient_id: Uuid,
        requested_page: Option<i64>,
    ) -> Result<NoteHistory, DomainError> {
        let patient = self.patient(patient_id).await?;
        let listing = self.listings.patient_notes(kind, patient_id);
        let notes = self.pager.paginate(listing.as_ref(), requested_page).await?;
        Ok(NoteHistory {
            kind,
            patient,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        care::{
            entity::{NoteContent, NoteWithAuthor},
            repository::MockCareRepository,
        },
        patient::repository::MockPatientRepository,
        shared::{listing::MockListingRepository, pagination::Queryable},
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    struct Failing;

    #[async_trait]
    impl Queryable for Failing {
        type Item = NoteWithAuthor;
        type Error = DomainError;

        async fn count(&self) -> Result<u64, DomainError> {
            Err(DomainError::InfrastructureError("connection reset".into()))
        }

        async fn slice(&self, _: u64, _: u64) -> Result<Vec<NoteWithAuthor>, DomainError> {
            Ok(Vec::new())
        }
    }

    fn actor() -> Actor {
        Actor {
            user_id: Uuid::now_v7(),
            username: "obs".into(),
            is_admin: true,
        }
    }

    fn patient() -> Patient {
        Patient {
            id: Uuid::now_v7(),
            name: "Wanjiru".into(),
            sex: "female".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 2, 14).unwrap(),
            phone: "0711 111 111".into(),
            address: "Nakuru".into(),
            created_at: Utc::now(),
        }
    }

    fn note_by(author: &Actor) -> CareNote {
        CareNote::new(
            author.user_id,
            Uuid::now_v7(),
            NoteContent {
                category: "Delivery".into(),
                description: "SVD, live female infant".into(),
            },
        )
    }

    #[tokio::test]
    async fn notes_go_to_the_requested_kind() {
        let me = actor();
        let p = patient();
        let pid = p.id;
        let mut patients = MockPatientRepository::new();
        patients
            .expect_find_by_id()
            .returning(move |_| Ok(Some(p.clone())));
        let mut care = MockCareRepository::new();
        care.expect_create_note()
            .withf(|kind, _| *kind == NoteKind::Pnc)
            .returning(|_, note| Ok(note.clone()));

        let uc = CareNotesUseCase::new(
            Arc::new(care),
            Arc::new(patients),
            Arc::new(MockListingRepository::new()),
            Pager::default(),
        );
        let form = NoteForm {
            category: Some("Breastfeeding".into()),
            description: Some("Latching well".into()),
        };
        let note = uc.add(&me, NoteKind::Pnc, pid, form).await.unwrap();
        assert_eq!(note.author_id, me.user_id);
        assert_eq!(note.patient_id, pid);
    }

    #[tokio::test]
    async fn admins_cannot_edit_other_authors_notes() {
        let note = note_by(&actor());
        let mut care = MockCareRepository::new();
        care.expect_find_note()
            .with(eq(NoteKind::Ldr), mockall::predicate::always())
            .returning(move |_, _| Ok(Some(note.clone())));
        care.expect_update_note().never();

        let uc = CareNotesUseCase::new(
            Arc::new(care),
            Arc::new(MockPatientRepository::new()),
            Arc::new(MockListingRepository::new()),
            Pager::default(),
        );
        let err = uc
            .update(&actor(), NoteKind::Ldr, Uuid::now_v7(), NoteForm::default())
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Forbidden);
    }

    #[tokio::test]
    async fn missing_note_is_not_found() {
        let mut care = MockCareRepository::new();
        care.expect_find_note().returning(|_, _| Ok(None));

        let uc = CareNotesUseCase::new(
            Arc::new(care),
            Arc::new(MockPatientRepository::new()),
            Arc::new(MockListingRepository::new()),
            Pager::default(),
        );
        let err = uc
            .delete(&actor(), NoteKind::Pnc, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(msg) if msg.starts_with("Postnatal note")));
    }

    #[tokio::test]
    async fn listing_failures_surface_unchanged() {
        let p = patient();
        let pid = p.id;
        let mut patients = MockPatientRepository::new();
        patients
            .expect_find_by_id()
            .returning(move |_| Ok(Some(p.clone())));
        let mut listings = MockListingRepository::new();
        listings
            .expect_patient_notes()
            .with(eq(NoteKind::Ldr), eq(pid))
            .returning(|_, _| Box::new(Failing));

        let uc = CareNotesUseCase::new(
            Arc::new(MockCareRepository::new()),
            Arc::new(patients),
            Arc::new(listings),
            Pager::default(),
        );
        let err = uc
            .list_for_patient(NoteKind::Ldr, pid, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InfrastructureError("connection reset".into())
        );
    }
}
