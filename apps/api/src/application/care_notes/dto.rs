use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::application::forms::required;
use crate::domain::{
    care::entity::{CareNote, NoteContent, NoteKind, NoteWithAuthor},
    patient::entity::Patient,
    shared::{errors::DomainError, pagination::Page},
};

#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct NoteForm {
    #[validate(length(max = 32, message = "Category must be 32 characters or less."))]
    pub category: Option<String>,
    pub description: Option<String>,
}

impl NoteForm {
    pub fn into_content(self) -> Result<NoteContent, DomainError> {
        let category = required(&self.category, "Category is required.")?;
        let description = required(&self.description, "Description is required.")?;
        self.validate()?;
        Ok(NoteContent {
            category,
            description,
        })
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct NoteDetail {
    pub kind: NoteKind,
    pub patient: Patient,
    pub note: CareNote,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct NoteHistory {
    pub kind: NoteKind,
    pub patient: Patient,
    pub notes: Page<NoteWithAuthor>,
}
