//! Paginated listings used by the list views.
//!
//! Each method returns a fresh [`Queryable`] scoped to one filter; the
//! handler passes it straight to the [`Pager`](super::pagination::Pager).

use super::{errors::DomainError, pagination::Queryable};
use crate::domain::{
    care::entity::{AncWithAuthor, AncWithPatient, NoteKind, NoteWithAuthor, NoteWithPatient},
    patient::entity::Patient,
    user::entity::User,
};
use uuid::Uuid;

pub type Listing<T> = Box<dyn Queryable<Item = T, Error = DomainError>>;

#[cfg_attr(test, mockall::automock)]
pub trait ListingRepository: Send + Sync {
    /// All accounts, by username.
    fn users(&self) -> Listing<User>;
    /// Patients by name, optionally filtered by a case-insensitive substring.
    fn patients(&self, search: Option<String>) -> Listing<Patient>;
    /// A patient's antenatal records, newest first.
    fn patient_anc(&self, patient_id: Uuid) -> Listing<AncWithAuthor>;
    fn patient_notes(&self, kind: NoteKind, patient_id: Uuid) -> Listing<NoteWithAuthor>;
    /// Antenatal records written by one clinician, newest first.
    fn authored_anc(&self, author_id: Uuid) -> Listing<AncWithPatient>;
    fn authored_notes(&self, kind: NoteKind, author_id: Uuid) -> Listing<NoteWithPatient>;
}
