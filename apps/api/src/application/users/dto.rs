use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::application::forms::{filled, required};
use crate::domain::{
    care::entity::{AncWithPatient, NoteWithPatient, RecordCounts, RecordKind},
    shared::{errors::DomainError, pagination::Page},
    user::entity::User,
};

#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct CreateUserForm {
    #[validate(length(max = 32, message = "Username must be 32 characters or less."))]
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirmation: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// A new account's credentials, checked but not yet hashed.
#[derive(Debug)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

impl CreateUserForm {
    pub fn into_account(self) -> Result<NewAccount, DomainError> {
        let username = required(&self.username, "Username is required.")?;
        let password = self
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DomainError::validation("Password is required."))?;
        if self.confirmation.as_deref() != Some(password.as_str()) {
            return Err(DomainError::validation("Passwords do not match."));
        }
        self.validate()?;
        Ok(NewAccount {
            username,
            password,
            is_admin: self.is_admin,
        })
    }
}

/// Edit form. Absent fields keep their current value; the password only
/// changes when one is supplied together with a matching confirmation.
#[derive(Debug, Clone, Default, Deserialize, Validate, TS)]
#[ts(export)]
pub struct UpdateUserForm {
    #[validate(length(max = 32, message = "Username must be 32 characters or less."))]
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirmation: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Default)]
pub struct AccountChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl UpdateUserForm {
    pub fn into_changes(self) -> Result<AccountChanges, DomainError> {
        self.validate()?;
        let password = self.password.clone().filter(|p| !p.is_empty());
        if let Some(password) = &password {
            if self.confirmation.as_deref() != Some(password.as_str()) {
                return Err(DomainError::validation("Passwords do not match."));
            }
        }
        Ok(AccountChanges {
            username: filled(&self.username),
            password,
            is_admin: self.is_admin,
        })
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct Profile {
    pub user: User,
    pub record_counts: RecordCounts,
}

/// One page of the records a clinician authored, shaped by kind.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "kind", content = "records", rename_all = "lowercase")]
#[ts(export)]
pub enum RecentRecords {
    Anc(Page<AncWithPatient>),
    Ldr(Page<NoteWithPatient>),
    Pnc(Page<NoteWithPatient>),
}

impl RecentRecords {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecentRecords::Anc(_) => RecordKind::Anc,
            RecentRecords::Ldr(_) => RecordKind::Ldr,
            RecentRecords::Pnc(_) => RecordKind::Pnc,
        }
    }
}
