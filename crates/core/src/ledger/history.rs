//! Transaction history queries.

use balance_shared::types::{AccountId, PageRequest};

use super::account::parse_account_id;
use super::error::LedgerError;

/// Ordering applied to an account's movement history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Oldest first.
    DateAsc,
    /// Newest first.
    DateDesc,
    /// Smallest amount first.
    MoneyAsc,
    /// Largest amount first.
    MoneyDesc,
    /// Whatever order the store returns.
    #[default]
    Natural,
}

impl SortKey {
    /// Parses a caller-supplied sort key. Unknown keys fall back to
    /// [`SortKey::Natural`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "date_asc" => Self::DateAsc,
            "date_desc" => Self::DateDesc,
            "money_asc" => Self::MoneyAsc,
            "money_desc" => Self::MoneyDesc,
            _ => Self::Natural,
        }
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateAsc => "date_asc",
            Self::DateDesc => "date_desc",
            Self::MoneyAsc => "money_asc",
            Self::MoneyDesc => "money_desc",
            Self::Natural => "natural",
        }
    }
}

/// A validated request for one page of an account's movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Account whose movements are listed, on either side.
    pub account: AccountId,
    /// Requested ordering.
    pub sort: SortKey,
    /// Page window.
    pub page: PageRequest,
}

impl HistoryQuery {
    /// Validates raw history parameters.
    ///
    /// Pagination is checked before the identifier, so a negative limit is
    /// reported as such even when the account id is malformed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidSortParameters` if `limit` or `page` is
    /// negative and `LedgerError::InvalidInput` if the account id is not a UUID.
    pub fn new(
        account_id: &str,
        sort: SortKey,
        limit: i64,
        page: i64,
    ) -> Result<Self, LedgerError> {
        let page = PageRequest::new(page, limit);
        if !page.is_valid() {
            return Err(LedgerError::InvalidSortParameters);
        }

        Ok(Self {
            account: parse_account_id(account_id)?,
            sort,
            page,
        })
    }
}
