use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::shared::errors::DomainError;

/// The three episodes of maternity care a record can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RecordKind {
    /// Antenatal care
    Anc,
    /// Labour, delivery and recovery
    Ldr,
    /// Postnatal care
    Pnc,
}

impl RecordKind {
    pub fn note_kind(self) -> Option<NoteKind> {
        match self {
            RecordKind::Anc => None,
            RecordKind::Ldr => Some(NoteKind::Ldr),
            RecordKind::Pnc => Some(NoteKind::Pnc),
        }
    }
}

impl FromStr for RecordKind {
    type Err = DomainError;

    /// Accepts the kind name or its legacy numeric code (0, 1, 2).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anc" | "0" => Ok(RecordKind::Anc),
            "ldr" | "1" => Ok(RecordKind::Ldr),
            "pnc" | "2" => Ok(RecordKind::Pnc),
            other => Err(DomainError::NotFound(format!("Unknown record kind '{}'", other))),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Anc => write!(f, "anc"),
            RecordKind::Ldr => write!(f, "ldr"),
            RecordKind::Pnc => write!(f, "pnc"),
        }
    }
}

/// Record kinds stored as free-text category/description notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoteKind {
    Ldr,
    Pnc,
}

impl NoteKind {
    pub fn table(self) -> &'static str {
        match self {
            NoteKind::Ldr => "ldr_notes",
            NoteKind::Pnc => "pnc_notes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NoteKind::Ldr => "Labour and delivery note",
            NoteKind::Pnc => "Postnatal note",
        }
    }
}

impl FromStr for NoteKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RecordKind>()?
            .note_kind()
            .ok_or_else(|| DomainError::NotFound(format!("'{}' is not a note kind", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordCounts {
    pub anc: i64,
    pub ldr: i64,
    pub pnc: i64,
}

/// An antenatal care record.
///
/// The first visit of a pregnancy is captured as a compulsory *intake*
/// (dates, height, obstetric history). Later visits are optional
/// observations. Both live in the same table and are told apart by
/// `compulsory`; the fields of the other group stay empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct AncRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub patient_id: Uuid,
    pub compulsory: bool,
    pub created_at: DateTime<Utc>,

    pub expected_delivery_date: Option<NaiveDate>,
    pub terminate: bool,
    pub height: Option<String>,
    pub last_menstrual_period: Option<NaiveDate>,
    pub parity: Option<String>,
    pub living_children: Option<String>,
    pub gravida: Option<String>,

    pub medical_surgical_complications: Option<String>,
    pub obstetric_other_complications: Option<String>,
    pub weight: Option<String>,
    pub gestation: Option<String>,
    pub blood_pressure: Option<String>,
    pub urine_dipstick: bool,
    pub fetal_assessment: Option<String>,
    pub fetal_heartbeat: Option<String>,
    pub symphysiofundal_height: Option<String>,
    pub complications: Option<String>,
    pub vaccination: bool,
    pub folic_acid: bool,
    pub mendabazole: bool,
    pub hepatitis: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncIntake {
    pub expected_delivery_date: NaiveDate,
    pub terminate: bool,
    pub height: String,
    pub last_menstrual_period: NaiveDate,
    pub parity: String,
    pub living_children: String,
    pub gravida: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncVisit {
    pub medical_surgical_complications: Option<String>,
    pub obstetric_other_complications: Option<String>,
    pub weight: Option<String>,
    pub gestation: Option<String>,
    pub blood_pressure: Option<String>,
    pub urine_dipstick: bool,
    pub fetal_assessment: Option<String>,
    pub fetal_heartbeat: Option<String>,
    pub symphysiofundal_height: Option<String>,
    pub complications: Option<String>,
    pub vaccination: bool,
    pub folic_acid: bool,
    pub mendabazole: bool,
    pub hepatitis: bool,
}

impl AncVisit {
    pub fn is_empty(&self) -> bool {
        let texts = [
            &self.medical_surgical_complications,
            &self.obstetric_other_complications,
            &self.weight,
            &self.gestation,
            &self.blood_pressure,
            &self.fetal_assessment,
            &self.fetal_heartbeat,
            &self.symphysiofundal_height,
            &self.complications,
        ];
        let ticked = self.urine_dipstick
            || self.vaccination
            || self.folic_acid
            || self.mendabazole
            || self.hepatitis;
        !ticked && texts.iter().all(|t| t.is_none())
    }
}

impl AncRecord {
    fn blank(author_id: Uuid, patient_id: Uuid, compulsory: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            author_id,
            patient_id,
            compulsory,
            created_at: Utc::now(),
            expected_delivery_date: None,
            terminate: false,
            height: None,
            last_menstrual_period: None,
            parity: None,
            living_children: None,
            gravida: None,
            medical_surgical_complications: None,
            obstetric_other_complications: None,
            weight: None,
            gestation: None,
            blood_pressure: None,
            urine_dipstick: false,
            fetal_assessment: None,
            fetal_heartbeat: None,
            symphysiofundal_height: None,
            complications: None,
            vaccination: false,
            folic_acid: false,
            mendabazole: false,
            hepatitis: false,
        }
    }

    pub fn new_intake(author_id: Uuid, patient_id: Uuid, intake: AncIntake) -> Self {
        let mut record = Self::blank(author_id, patient_id, true);
        record.apply_intake(intake);
        record
    }

    pub fn new_visit(author_id: Uuid, patient_id: Uuid, visit: AncVisit) -> Self {
        let mut record = Self::blank(author_id, patient_id, false);
        record.apply_visit(visit);
        record
    }

    pub fn apply_intake(&mut self, intake: AncIntake) {
        self.expected_delivery_date = Some(intake.expected_delivery_date);
        self.terminate = intake.terminate;
        self.height = Some(intake.height);
        self.last_menstrual_period = Some(intake.last_menstrual_period);
        self.parity = Some(intake.parity);
        self.living_children = Some(intake.living_children);
        self.gravida = Some(intake.gravida);
    }

    pub fn apply_visit(&mut self, visit: AncVisit) {
        self.medical_surgical_complications = visit.medical_surgical_complications;
        self.obstetric_other_complications = visit.obstetric_other_complications;
        self.weight = visit.weight;
        self.gestation = visit.gestation;
        self.blood_pressure = visit.blood_pressure;
        self.urine_dipstick = visit.urine_dipstick;
        self.fetal_assessment = visit.fetal_assessment;
        self.fetal_heartbeat = visit.fetal_heartbeat;
        self.symphysiofundal_height = visit.symphysiofundal_height;
        self.complications = visit.complications;
        self.vaccination = visit.vaccination;
        self.folic_acid = visit.folic_acid;
        self.mendabazole = visit.mendabazole;
        self.hepatitis = visit.hepatitis;
    }
}

/// A labour/delivery or postnatal note. Which one is decided by the table it
/// is stored in, see [`NoteKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct CareNote {
    pub id: Uuid,
    pub author_id: Uuid,
    pub patient_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent {
    pub category: String,
    pub description: String,
}

impl CareNote {
    pub fn new(author_id: Uuid, patient_id: Uuid, content: NoteContent) -> Self {
        Self {
            id: Uuid::now_v7(),
            author_id,
            patient_id,
            created_at: Utc::now(),
            category: content.category,
            description: content.description,
        }
    }

    pub fn apply(&mut self, content: NoteContent) {
        self.category = content.category;
        self.description = content.description;
    }
}

// Listing rows: a record joined with the name of whoever is on the other side.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct AncWithAuthor {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: AncRecord,
    pub author_username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct NoteWithAuthor {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub note: CareNote,
    pub author_username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct AncWithPatient {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: AncRecord,
    pub patient_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct NoteWithPatient {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub note: CareNote,
    pub patient_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_accepts_names_and_legacy_codes() {
        assert_eq!("anc".parse::<RecordKind>().unwrap(), RecordKind::Anc);
        assert_eq!("LDR".parse::<RecordKind>().unwrap(), RecordKind::Ldr);
        assert_eq!("2".parse::<RecordKind>().unwrap(), RecordKind::Pnc);
        assert!("3".parse::<RecordKind>().is_err());
        assert!("anc".parse::<NoteKind>().is_err());
        assert_eq!("pnc".parse::<NoteKind>().unwrap(), NoteKind::Pnc);
    }

    #[test]
    fn empty_visit_is_detected() {
        assert!(AncVisit::default().is_empty());
        assert!(!AncVisit {
            folic_acid: true,
            ..Default::default()
        }
        .is_empty());
        assert!(!AncVisit {
            weight: Some("64".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn intake_record_only_fills_intake_fields() {
        let intake = AncIntake {
            expected_delivery_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            terminate: false,
            height: "162".into(),
            last_menstrual_period: NaiveDate::from_ymd_opt(2025, 7, 25).unwrap(),
            parity: "1".into(),
            living_children: "1".into(),
            gravida: "2".into(),
        };
        let record = AncRecord::new_intake(Uuid::now_v7(), Uuid::now_v7(), intake);
        assert!(record.compulsory);
        assert_eq!(record.height.as_deref(), Some("162"));
        assert_eq!(record.weight, None);
        assert!(!record.folic_acid);
    }
}
