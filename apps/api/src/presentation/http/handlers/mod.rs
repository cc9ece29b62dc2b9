pub mod antenatal;
pub mod auth;
pub mod care_notes;
pub mod health;
pub mod patients;
pub mod profile;
pub mod users;
