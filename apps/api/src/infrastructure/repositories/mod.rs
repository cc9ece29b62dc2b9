pub mod sqlx_care_repository;
pub mod sqlx_listing_repository;
pub mod sqlx_patient_repository;
pub mod sqlx_user_repository;
