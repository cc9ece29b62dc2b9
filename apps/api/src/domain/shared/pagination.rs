//! Page-number pagination over any ordered, countable source.
//!
//! A [`Pager`] turns a [`Queryable`] and a caller-supplied page number into a
//! fully populated [`Page`]. Out-of-range and malformed page numbers are
//! clamped to the nearest valid page instead of producing an error, so stale
//! bookmarked URLs keep working.
//!
//! The count and the slice are issued as two separate statements. A row
//! inserted between them can shift the slice window by one; this is a known
//! consistency gap and is not papered over here.

use std::num::IntErrorKind;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Items shown per page when nothing is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Number of page links shown around the current page.
pub const DEFAULT_PAGE_WINDOW: u64 = 5;

/// An ordered, read-only source of items that can be counted and sliced.
///
/// Implementations must return the same ordering from `count` and `slice`
/// for a page computation to be meaningful.
#[async_trait]
pub trait Queryable: Send + Sync {
    type Item: Send;
    type Error: Send;

    async fn count(&self) -> Result<u64, Self::Error>;

    /// Returns at most `limit` items starting at `offset`.
    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<Self::Item>, Self::Error>;
}

#[async_trait]
impl<T> Queryable for Vec<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;
    type Error = std::convert::Infallible;

    async fn count(&self) -> Result<u64, Self::Error> {
        Ok(self.len() as u64)
    }

    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<T>, Self::Error> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(self.len());
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self[start..].iter().take(limit).cloned().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Invalid pagination configuration: {0}")]
    InvalidConfiguration(String),
}

/// `?page=` query parameter.
///
/// Kept as a raw string so that junk such as `?page=abc` falls back to the
/// first page instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Integers too large for `i64` saturate so they still clamp to the
    /// last (or first) page.
    pub fn requested_page(&self) -> Option<i64> {
        let raw = self.page.as_deref()?.trim();
        match raw.parse::<i64>() {
            Ok(page) => Some(page),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        }
    }
}

/// One page of results plus the navigation metadata needed to render links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
    pub page_range: Vec<u64>,
}

/// Page geometry for a given total, computed before any items are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub page_number: u64,
    pub total_pages: u64,
    pub offset: u64,
}

/// Validated page size and link-window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: u64,
    window: u64,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window: DEFAULT_PAGE_WINDOW,
        }
    }
}

impl Pager {
    /// # Errors
    ///
    /// Returns `PaginationError::InvalidConfiguration` if either value is zero.
    pub fn new(page_size: u64, window: u64) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::InvalidConfiguration(
                "page_size must be positive".to_string(),
            ));
        }
        if window == 0 {
            return Err(PaginationError::InvalidConfiguration(
                "page window must be positive".to_string(),
            ));
        }
        Ok(Self { page_size, window })
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.page_size).max(1)
    }

    /// Resolves the requested page against `total_items`, clamping into range.
    pub fn layout(&self, total_items: u64, requested_page: Option<i64>) -> PageLayout {
        let total_pages = self.total_pages(total_items);
        let page_number = match requested_page {
            Some(p) if p >= 1 => (p as u64).min(total_pages),
            _ => 1,
        };

        PageLayout {
            page_number,
            total_pages,
            offset: (page_number - 1).saturating_mul(self.page_size),
        }
    }

    /// Contiguous run of page numbers centred on `current`, clipped to
    /// `[1, total_pages]` and slid inward at the edges.
    pub fn page_range(&self, current: u64, total_pages: u64) -> Vec<u64> {
        let width = self.window.min(total_pages);
        let half = self.window / 2;
        let mut start = current.saturating_sub(half).max(1);
        let end = (start + width - 1).min(total_pages);
        start = (end + 1).saturating_sub(width).max(1);
        (start..=end).collect()
    }

    /// Builds the page for `requested_page`.
    ///
    /// Issues exactly one `count` and one `slice` against `source`. Errors
    /// from either call are returned as-is.
    pub async fn paginate<Q>(
        &self,
        source: &Q,
        requested_page: Option<i64>,
    ) -> Result<Page<Q::Item>, Q::Error>
    where
        Q: Queryable + ?Sized,
    {
        let total_items = source.count().await?;
        let layout = self.layout(total_items, requested_page);
        let items = source.slice(layout.offset, self.page_size).await?;

        Ok(self.assemble(items, total_items, layout))
    }

    fn assemble<T>(&self, items: Vec<T>, total_items: u64, layout: PageLayout) -> Page<T> {
        let PageLayout {
            page_number,
            total_pages,
            ..
        } = layout;
        let has_previous = page_number > 1;
        let has_next = page_number < total_pages;

        Page {
            items,
            page_number,
            page_size: self.page_size,
            total_items,
            total_pages,
            has_previous,
            has_next,
            previous_page_number: has_previous.then(|| page_number - 1),
            next_page_number: has_next.then(|| page_number + 1),
            page_range: self.page_range(page_number, total_pages),
        }
    }
}
