//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
///
/// Values are signed because they arrive unvalidated from callers; use
/// [`PageRequest::is_valid`] before computing offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed, 0 is read as the first page).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

// Postgres binds LIMIT/OFFSET as signed bigint.
const MAX_SQL_BIGINT: u64 = i64::MAX as u64;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Returns true if neither the page nor the limit is negative.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.page >= 0 && self.limit >= 0
    }

    /// Calculates the offset for database queries, capped at `i64::MAX`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        let page = u64::try_from(self.page).unwrap_or(0).max(1);
        (page - 1).saturating_mul(self.limit()).min(MAX_SQL_BIGINT)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::try_from(self.limit).unwrap_or(0)
    }
}
