pub mod care;
pub mod patient;
pub mod shared;
pub mod user;
