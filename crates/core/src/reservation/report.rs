//! Monthly revenue aggregation over recognized reservations.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Reservation, ReservationStatus};
use crate::ledger::error::LedgerError;

/// A calendar month in UTC, as the half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

impl ReportPeriod {
    /// Validates a year and month.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` unless `year` is in `1..=9999`
    /// and `month` in `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=9999).contains(&year) {
            return Err(LedgerError::InvalidInput(format!("year out of range: {year}")));
        }
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidInput(format!("month out of range: {month}")));
        }
        Ok(Self { year, month })
    }

    /// Report year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Report month, 1-based.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        first_instant(self.year, self.month)
    }

    /// First instant of the following month.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        if self.month == 12 {
            first_instant(self.year + 1, 1)
        } else {
            first_instant(self.year, self.month + 1)
        }
    }
}

fn first_instant(year: i32, month: u32) -> DateTime<Utc> {
    // Bounds are checked in `ReportPeriod::new`; year 10000 is still a valid chrono date.
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(DateTime::<Utc>::MAX_UTC, |naive| naive.and_utc())
}

/// Recognized revenue for one service in a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRevenue {
    /// Service identifier.
    pub service_id: String,
    /// Sum of recognized amounts.
    pub total: Decimal,
}

/// Sums recognized amounts per service, ordered by service id.
///
/// Reservations that are not recognized are ignored.
#[must_use]
pub fn summarize_by_service(reservations: &[Reservation]) -> Vec<ServiceRevenue> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for reservation in reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Recognized)
    {
        *totals.entry(reservation.service_id.as_str()).or_default() += reservation.amount;
    }

    totals
        .into_iter()
        .map(|(service_id, total)| ServiceRevenue {
            service_id: service_id.to_string(),
            total,
        })
        .collect()
}
