use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A registered mother.
///
/// Antenatal, labour/delivery and postnatal records all hang off a patient
/// and are removed with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub sex: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Validated demographic fields, shared by registration and edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetails {
    pub name: String,
    pub sex: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: String,
}

impl Patient {
    pub fn register(details: PatientDetails) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: details.name,
            sex: details.sex,
            date_of_birth: details.date_of_birth,
            phone: details.phone,
            address: details.address,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, details: PatientDetails) {
        self.name = details.name;
        self.sex = details.sex;
        self.date_of_birth = details.date_of_birth;
        self.phone = details.phone;
        self.address = details.address;
    }
}
