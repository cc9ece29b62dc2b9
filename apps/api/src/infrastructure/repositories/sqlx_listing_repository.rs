//! SQL-backed [`Queryable`] sources for the paginated list views.
//!
//! A listing is a fixed `FROM` clause, an optional filter and a stable
//! ordering. `count` and `slice` issue two independent statements, so rows
//! written between them can shift a page by a few items.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, postgres::PgRow};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use super::sqlx_care_repository::{ANC_COLUMNS, NOTE_COLUMNS};
use crate::domain::{
    care::entity::{AncWithAuthor, AncWithPatient, NoteKind, NoteWithAuthor, NoteWithPatient},
    patient::entity::Patient,
    shared::{
        errors::DomainError,
        listing::{Listing, ListingRepository},
        pagination::Queryable,
    },
    user::entity::User,
};

#[derive(Debug, Clone)]
enum Filter {
    Equals(&'static str, Uuid),
    Contains(&'static str, String),
}

pub struct SqlListing<T> {
    pool: PgPool,
    columns: String,
    from: String,
    filter: Option<Filter>,
    order_by: &'static str,
    _row: PhantomData<fn() -> T>,
}

impl<T> SqlListing<T> {
    fn new(pool: PgPool, columns: String, from: String, order_by: &'static str) -> Self {
        Self {
            pool,
            columns,
            from,
            filter: None,
            order_by,
            _row: PhantomData,
        }
    }

    fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    fn push_filter(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match &self.filter {
            Some(Filter::Equals(column, id)) => {
                qb.push(" WHERE ").push(*column).push(" = ").push_bind(*id);
            }
            Some(Filter::Contains(column, needle)) => {
                qb.push(" WHERE ")
                    .push(*column)
                    .push(" ILIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)));
            }
            None => {}
        }
    }
}

#[async_trait]
impl<T> Queryable for SqlListing<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    type Item = T;
    type Error = DomainError;

    #[instrument(skip(self), fields(from = %self.from))]
    async fn count(&self) -> Result<u64, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", self.from));
        self.push_filter(&mut qb);
        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Listing count failed: {}", e);
                DomainError::InfrastructureError(format!("Failed to count rows: {}", e))
            })?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    #[instrument(skip(self), fields(from = %self.from))]
    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<T>, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            self.columns, self.from
        ));
        self.push_filter(&mut qb);
        qb.push(" ORDER BY ")
            .push(self.order_by)
            .push(" LIMIT ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rows = qb
            .build_query_as::<T>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Listing slice failed: {}", e);
                DomainError::InfrastructureError(format!("Failed to fetch rows: {}", e))
            })?;
        debug!(rows = rows.len(), "Fetched listing slice");
        Ok(rows)
    }
}

/// Makes `%`, `_` and `\` match literally inside an `ILIKE` pattern.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Prefixes every column of a comma-separated list with a table alias.
fn qualified(alias: &str, columns: &str) -> String {
    columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("{}.{}", alias, c))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct SqlxListingRepository {
    pool: PgPool,
}

impl SqlxListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NEWEST_FIRST: &str = "r.created_at DESC, r.id DESC";

impl ListingRepository for SqlxListingRepository {
    fn users(&self) -> Listing<User> {
        Box::new(SqlListing::<User>::new(
            self.pool.clone(),
            "id, username, password_hash, is_admin, created_at".into(),
            "users".into(),
            "username, id",
        ))
    }

    fn patients(&self, search: Option<String>) -> Listing<Patient> {
        let listing = SqlListing::<Patient>::new(
            self.pool.clone(),
            "id, name, sex, date_of_birth, phone, address, created_at".into(),
            "patients".into(),
            "name, id",
        );
        match search {
            Some(needle) => Box::new(listing.filter(Filter::Contains("name", needle))),
            None => Box::new(listing),
        }
    }

    fn patient_anc(&self, patient_id: Uuid) -> Listing<AncWithAuthor> {
        Box::new(
            SqlListing::<AncWithAuthor>::new(
                self.pool.clone(),
                format!("{}, u.username AS author_username", qualified("r", ANC_COLUMNS)),
                "anc_records r JOIN users u ON u.id = r.author_id".into(),
                NEWEST_FIRST,
            )
            .filter(Filter::Equals("r.patient_id", patient_id)),
        )
    }

    fn patient_notes(&self, kind: NoteKind, patient_id: Uuid) -> Listing<NoteWithAuthor> {
        Box::new(
            SqlListing::<NoteWithAuthor>::new(
                self.pool.clone(),
                format!("{}, u.username AS author_username", qualified("r", NOTE_COLUMNS)),
                format!("{} r JOIN users u ON u.id = r.author_id", kind.table()),
                NEWEST_FIRST,
            )
            .filter(Filter::Equals("r.patient_id", patient_id)),
        )
    }

    fn authored_anc(&self, author_id: Uuid) -> Listing<AncWithPatient> {
        Box::new(
            SqlListing::<AncWithPatient>::new(
                self.pool.clone(),
                format!("{}, p.name AS patient_name", qualified("r", ANC_COLUMNS)),
                "anc_records r JOIN patients p ON p.id = r.patient_id".into(),
                NEWEST_FIRST,
            )
            .filter(Filter::Equals("r.author_id", author_id)),
        )
    }

    fn authored_notes(&self, kind: NoteKind, author_id: Uuid) -> Listing<NoteWithPatient> {
        Box::new(
            SqlListing::<NoteWithPatient>::new(
                self.pool.clone(),
                format!("{}, p.name AS patient_name", qualified("r", NOTE_COLUMNS)),
                format!("{} r JOIN patients p ON p.id = r.patient_id", kind.table()),
                NEWEST_FIRST,
            )
            .filter(Filter::Equals("r.author_id", author_id)),
        )
    }
}
