//! Page position and the query parameters derived from it

use crate::request::QueryParams;
use std::fmt;

/// Items per page when the caller does not choose
pub const DEFAULT_PER_PAGE_LIMIT: u32 = 14;

/// Query keys owned by the controller; caller filters never override them
pub const RESERVED_KEYS: [&str; 2] = ["limit", "offset"];

/// Invalid page position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// Pages are 1-based
    InvalidPage(u32),
    /// Page size must be positive
    InvalidPerPage(u32),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPage(page) => write!(f, "Page must be at least 1 (got {})", page),
            Self::InvalidPerPage(n) => write!(f, "Items per page must be positive (got {})", n),
        }
    }
}

impl std::error::Error for PageError {}

/// Current page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    current_page: u32,
    per_page: u32,
}

impl PageQuery {
    /// Start at `initial_page` (default 1) with `per_page` items (default 14)
    pub fn new(initial_page: Option<u32>, per_page: Option<u32>) -> Result<Self, PageError> {
        let current_page = initial_page.unwrap_or(1);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE_LIMIT);

        if current_page == 0 {
            return Err(PageError::InvalidPage(current_page));
        }
        if per_page == 0 {
            return Err(PageError::InvalidPerPage(per_page));
        }

        Ok(Self {
            current_page,
            per_page,
        })
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.per_page)
    }

    /// Move to `page`. Not clamped against the total count.
    pub fn set_page(&mut self, page: u32) -> Result<(), PageError> {
        if page == 0 {
            return Err(PageError::InvalidPage(page));
        }
        self.current_page = page;
        Ok(())
    }

    /// Merge caller filters with `limit`/`offset`
    pub fn query_params(&self, filters: &QueryParams) -> QueryParams {
        let mut params = filters.clone();

        for key in RESERVED_KEYS {
            if filters.contains_key(key) {
                tracing::debug!("Ignoring caller-supplied '{}' filter; pagination owns it", key);
            }
        }

        params.insert("limit", i64::from(self.per_page));
        params.insert("offset", i64::try_from(self.offset()).unwrap_or(i64::MAX));
        params
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            current_page: 1,
            per_page: DEFAULT_PER_PAGE_LIMIT,
        }
    }
}

/// Number of pages needed for `total` items
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
