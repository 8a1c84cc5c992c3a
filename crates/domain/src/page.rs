//! Offset-based pagination over records ordered newest-first.

use serde::Serialize;

use crate::error::ValidationError;

/// Page number used when the client omits `page`.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client omits `per_page`.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// A validated request for one page.
///
/// Both `page` and `per_page` are at least 1 and the derived offset fits in
/// an `i64`, so adapters can bind the values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
    offset: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Validate an explicit page number and size.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositivePage`] or
    /// [`ValidationError::NonPositivePerPage`] for values below 1, and
    /// [`ValidationError::PageOutOfRange`] when the offset overflows.
    pub fn new(page: i64, per_page: i64) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::NonPositivePage(page));
        }
        if per_page < 1 {
            return Err(ValidationError::NonPositivePerPage(per_page));
        }
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or(ValidationError::PageOutOfRange { page, per_page })?;
        Ok(Self {
            page,
            per_page,
            offset,
        })
    }

    /// Build from optional query values, falling back to the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`PageRequest::new`].
    pub fn from_parts(page: Option<i64>, per_page: Option<i64>) -> Result<Self, ValidationError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Number of items to skip: `(page - 1) * per_page`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

/// Pagination metadata returned alongside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: u64,
}

impl Pagination {
    /// Compute metadata for `total` items split by `request`.
    #[must_use]
    pub fn new(total: u64, request: PageRequest) -> Self {
        // per_page >= 1 is guaranteed by PageRequest
        let per_page = request.per_page().unsigned_abs();
        Self {
            total,
            page: request.page(),
            per_page: request.per_page(),
            total_pages: total.div_ceil(per_page),
        }
    }
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Assemble a page from the rows read and the total row count.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            pagination: Pagination::new(total, request),
        }
    }
}
