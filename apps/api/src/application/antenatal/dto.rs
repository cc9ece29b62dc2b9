use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::application::forms::{filled, required, required_date};
use crate::domain::{
    care::entity::{AncIntake, AncRecord, AncVisit, AncWithAuthor},
    patient::entity::Patient,
    shared::{errors::DomainError, pagination::Page},
};

/// First-visit form: every field except `terminate` is required.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct AncIntakeForm {
    pub expected_delivery_date: Option<String>,
    #[serde(default)]
    pub terminate: bool,
    #[validate(length(max = 8, message = "Height must be 8 characters or less."))]
    pub height: Option<String>,
    pub last_menstrual_period: Option<String>,
    #[validate(length(max = 8, message = "Parity must be 8 characters or less."))]
    pub parity: Option<String>,
    #[validate(length(max = 8, message = "Living children must be 8 characters or less."))]
    pub living_children: Option<String>,
    #[validate(length(max = 8, message = "Gravida must be 8 characters or less."))]
    pub gravida: Option<String>,
}

impl AncIntakeForm {
    pub fn into_intake(self) -> Result<AncIntake, DomainError> {
        let expected_delivery_date = required_date(
            &self.expected_delivery_date,
            "Expected date of delivery is required.",
            "Expected date of delivery",
        )?;
        let height = required(&self.height, "Mother's height is required.")?;
        let last_menstrual_period = required_date(
            &self.last_menstrual_period,
            "Last menstrual period is required.",
            "Last menstrual period",
        )?;
        let parity = required(&self.parity, "Parity is required.")?;
        let living_children = required(
            &self.living_children,
            "Number of living children is required.",
        )?;
        let gravida = required(&self.gravida, "Gravida is required.")?;
        self.validate()?;

        Ok(AncIntake {
            expected_delivery_date,
            terminate: self.terminate,
            height,
            last_menstrual_period,
            parity,
            living_children,
            gravida,
        })
    }
}

/// Follow-up visit form: everything optional, but not all empty.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct AncVisitForm {
    pub medical_surgical_complications: Option<String>,
    pub obstetric_other_complications: Option<String>,
    #[validate(length(max = 8, message = "Weight must be 8 characters or less."))]
    pub weight: Option<String>,
    #[validate(length(max = 8, message = "Gestation must be 8 characters or less."))]
    pub gestation: Option<String>,
    #[validate(length(max = 8, message = "Blood pressure must be 8 characters or less."))]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub urine_dipstick: bool,
    pub fetal_assessment: Option<String>,
    #[validate(length(max = 8, message = "Fetal heartbeat must be 8 characters or less."))]
    pub fetal_heartbeat: Option<String>,
    #[validate(length(
        max = 8,
        message = "Symphysiofundal height must be 8 characters or less."
    ))]
    pub symphysiofundal_height: Option<String>,
    pub complications: Option<String>,
    #[serde(default)]
    pub vaccination: bool,
    #[serde(default)]
    pub folic_acid: bool,
    #[serde(default)]
    pub mendabazole: bool,
    #[serde(default)]
    pub hepatitis: bool,
}

impl AncVisitForm {
    pub fn into_visit(self) -> Result<AncVisit, DomainError> {
        let visit = AncVisit {
            medical_surgical_complications: filled(&self.medical_surgical_complications),
            obstetric_other_complications: filled(&self.obstetric_other_complications),
            weight: filled(&self.weight),
            gestation: filled(&self.gestation),
            blood_pressure: filled(&self.blood_pressure),
            urine_dipstick: self.urine_dipstick,
            fetal_assessment: filled(&self.fetal_assessment),
            fetal_heartbeat: filled(&self.fetal_heartbeat),
            symphysiofundal_height: filled(&self.symphysiofundal_height),
            complications: filled(&self.complications),
            vaccination: self.vaccination,
            folic_acid: self.folic_acid,
            mendabazole: self.mendabazole,
            hepatitis: self.hepatitis,
        };
        if visit.is_empty() {
            return Err(DomainError::validation("Can not submit an empty form."));
        }
        self.validate()?;
        Ok(visit)
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct AncDetail {
    pub patient: Patient,
    pub record: AncRecord,
}

/// A patient's antenatal history, with the latest intake pinned on top.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct AncHistory {
    pub patient: Patient,
    pub current_info: Option<AncRecord>,
    pub records: Page<AncWithAuthor>,
}
