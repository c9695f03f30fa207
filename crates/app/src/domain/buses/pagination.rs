//! Page arithmetic for bus listings.

use crate::validation::ValidationErrors;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// A requested 1-based page and its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// # Errors
    ///
    /// Rejects a zero page and any limit outside `1..=MAX_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if page < 1 {
            errors.push("page", "Page must be at least 1");
        }

        if !(1..=MAX_LIMIT).contains(&limit) {
            errors.push("limit", format!("Limit must be between 1 and {MAX_LIMIT}"));
        }

        errors.finish(Self { page, limit })
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    #[must_use]
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let limit = u64::from(request.limit());

        Self {
            current_page: request.page(),
            total_pages: total_items.div_ceil(limit),
            total_items,
            has_next: u64::from(request.page()) * limit < total_items,
            has_prev: request.page() > 1,
        }
    }
}
