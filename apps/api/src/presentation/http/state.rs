use crate::{
    application::{
        antenatal::use_case::AntenatalUseCase, care_notes::use_case::CareNotesUseCase,
        patients::use_case::PatientsUseCase, users::use_case::UsersUseCase,
    },
    config::Config,
    domain::{
        care::repository::CareRepository, patient::repository::PatientRepository,
        shared::{listing::ListingRepository, pagination::PaginationError},
        user::repository::{PasswordHasher, UserRepository},
    },
    infrastructure::{
        repositories::{
            sqlx_care_repository::SqlxCareRepository,
            sqlx_listing_repository::SqlxListingRepository,
            sqlx_patient_repository::SqlxPatientRepository,
            sqlx_user_repository::SqlxUserRepository,
        },
        security::passwords::BcryptHasher,
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub users: Arc<UsersUseCase>,
    pub patients: Arc<PatientsUseCase>,
    pub antenatal: Arc<AntenatalUseCase>,
    pub care_notes: Arc<CareNotesUseCase>,
}

impl AppState {
    /// Wires the Postgres-backed repositories into the use cases.
    pub fn new(db: PgPool, config: Config) -> Result<Self, PaginationError> {
        let pager = config.pager()?;
        let users_repo: Arc<dyn UserRepository> = Arc::new(SqlxUserRepository::new(db.clone()));
        let patients_repo: Arc<dyn PatientRepository> =
            Arc::new(SqlxPatientRepository::new(db.clone()));
        let care_repo: Arc<dyn CareRepository> = Arc::new(SqlxCareRepository::new(db.clone()));
        let listings: Arc<dyn ListingRepository> =
            Arc::new(SqlxListingRepository::new(db.clone()));
        let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::default());

        Ok(Self {
            users: Arc::new(UsersUseCase::new(
                users_repo,
                hasher,
                listings.clone(),
                pager,
            )),
            patients: Arc::new(PatientsUseCase::new(
                patients_repo.clone(),
                listings.clone(),
                pager,
            )),
            antenatal: Arc::new(AntenatalUseCase::new(
                care_repo.clone(),
                patients_repo.clone(),
                listings.clone(),
                pager,
            )),
            care_notes: Arc::new(CareNotesUseCase::new(
                care_repo,
                patients_repo,
                listings,
                pager,
            )),
            db,
            config,
        })
    }
}
