use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{CreateUserForm, Profile, RecentRecords, UpdateUserForm};
use crate::domain::{
    care::entity::{NoteKind, RecordKind},
    shared::{
        errors::DomainError,
        listing::ListingRepository,
        pagination::{Page, Pager},
    },
    user::{
        entity::{Actor, User},
        repository::{PasswordHasher, UserRepository},
    },
};

pub struct UsersUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    listings: Arc<dyn ListingRepository>,
    pager: Pager,
}

impl UsersUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        listings: Arc<dyn ListingRepository>,
        pager: Pager,
    ) -> Self {
        Self {
            users,
            hasher,
            listings,
            pager,
        }
    }

    /// Checks a username/password pair. Unknown users and wrong passwords
    /// are indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let Some(user) = self.users.find_by_username(username.trim()).await? else {
            warn!("Login attempt for unknown user");
            return Err(DomainError::Forbidden);
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            warn!("Login attempt with wrong password");
            return Err(DomainError::Forbidden);
        }
        Ok(user)
    }

    /// Resolves the acting user for a request; a deleted account no longer
    /// authenticates even with an unexpired token.
    pub async fn resolve_actor(&self, user_id: Uuid) -> Result<Actor, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| Actor::from(&user))
            .ok_or(DomainError::Unauthorized)
    }

    /// Creates the configured administrator on first start.
    #[instrument(skip(self, password_hash))]
    pub async fn ensure_bootstrap_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        let admin = User::new(username.to_string(), password_hash.to_string(), true);
        self.users.create(&admin).await?;
        info!("Created bootstrap administrator");
        Ok(true)
    }

    pub async fn list(
        &self,
        actor: &Actor,
        requested_page: Option<i64>,
    ) -> Result<Page<User>, DomainError> {
        actor.require_admin()?;
        let listing = self.listings.users();
        self.pager.paginate(listing.as_ref(), requested_page).await
    }

    pub async fn get(&self, actor: &Actor, id: Uuid) -> Result<User, DomainError> {
        actor.require_admin()?;
        self.find(id).await
    }

    async fn find(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User id {} doesn't exist.", id)))
    }

    async fn ensure_unique(&self, username: &str, except: Option<Uuid>) -> Result<(), DomainError> {
        match self.users.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != except => Err(DomainError::validation(
                format!("User {} is already registered.", username),
            )),
            _ => Ok(()),
        }
    }

    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn create(&self, actor: &Actor, form: CreateUserForm) -> Result<User, DomainError> {
        actor.require_admin()?;
        let account = form.into_account()?;
        self.ensure_unique(&account.username, None).await?;
        let hash = self.hasher.hash(&account.password)?;
        let user = User::new(account.username, hash, account.is_admin);
        let created = self.users.create(&user).await?;
        info!(user_id = %created.id, username = %created.username, "Created user");
        Ok(created)
    }

    /// Every change is validated before anything is written.
    #[instrument(skip(self, actor, form), fields(actor = %actor.username))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        form: UpdateUserForm,
    ) -> Result<User, DomainError> {
        actor.require_admin()?;
        let changes = form.into_changes()?;
        let mut user = self.find(id).await?;

        if let Some(username) = changes.username {
            self.ensure_unique(&username, Some(user.id)).await?;
            user.username = username;
        }
        if let Some(password) = changes.password {
            user.password_hash = self.hasher.hash(&password)?;
        }
        if let Some(is_admin) = changes.is_admin {
            user.is_admin = is_admin;
        }
        self.users.update(&user).await
    }

    #[instrument(skip(self, actor), fields(actor = %actor.username))]
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        actor.require_admin()?;
        if actor.user_id == id {
            return Err(DomainError::validation("You can not delete your own account."));
        }
        if !self.users.delete(id).await? {
            return Err(DomainError::NotFound(format!("User id {} doesn't exist.", id)));
        }
        info!(user_id = %id, "Deleted user");
        Ok(())
    }

    pub async fn profile(&self, actor: &Actor) -> Result<Profile, DomainError> {
        let user = self.find(actor.user_id).await?;
        let record_counts = self.users.authored_counts(actor.user_id).await?;
        Ok(Profile {
            user,
            record_counts,
        })
    }

    pub async fn recent_records(
        &self,
        actor: &Actor,
        kind: RecordKind,
        requested_page: Option<i64>,
    ) -> Result<RecentRecords, DomainError> {
        let author = actor.user_id;
        let records = match kind {
            RecordKind::Anc => {
                let listing = self.listings.authored_anc(author);
                RecentRecords::Anc(self.pager.paginate(listing.as_ref(), requested_page).await?)
            }
            RecordKind::Ldr => {
                let listing = self.listings.authored_notes(NoteKind::Ldr, author);
                RecentRecords::Ldr(self.pager.paginate(listing.as_ref(), requested_page).await?)
            }
            RecordKind::Pnc => {
                let listing = self.listings.authored_notes(NoteKind::Pnc, author);
                RecentRecords::Pnc(self.pager.paginate(listing.as_ref(), requested_page).await?)
            }
        };
        Ok(records)
    }
}
