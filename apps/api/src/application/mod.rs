pub mod antenatal;
pub mod care_notes;
pub mod forms;
pub mod patients;
pub mod users;
