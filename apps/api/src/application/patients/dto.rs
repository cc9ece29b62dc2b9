use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::application::forms::{filled, required, required_date};
use crate::domain::{
    care::entity::RecordCounts,
    patient::{entity::Patient, entity::PatientDetails, value_objects::PhoneNumber},
    shared::errors::DomainError,
};

/// Registration and edit form for a patient.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct PatientForm {
    #[validate(length(max = 32, message = "Name must be 32 characters or less."))]
    pub name: Option<String>,
    #[validate(length(max = 16, message = "Sex must be 16 characters or less."))]
    pub sex: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 256, message = "Address must be 256 characters or less."))]
    pub address: Option<String>,
}

impl PatientForm {
    pub fn into_details(self) -> Result<PatientDetails, DomainError> {
        let name = required(&self.name, "Name is required.")?;
        let date_of_birth = required_date(
            &self.date_of_birth,
            "Date of Birth is required.",
            "Date of Birth",
        )?;
        let phone = required(&self.phone, "Phone is required.")?;
        let address = required(&self.address, "Address is required.")?;
        self.validate()?;
        let phone = PhoneNumber::new(phone)?;

        Ok(PatientDetails {
            name,
            sex: filled(&self.sex).unwrap_or_default(),
            date_of_birth,
            phone: phone.value,
            address,
        })
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PatientOverview {
    pub patient: Patient,
    pub record_counts: RecordCounts,
}
