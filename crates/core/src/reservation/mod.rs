//! Two-phase reservation of funds.
//!
//! # Modules
//!
//! - `types` - Reservation, its business key and lifecycle status
//! - `state` - Reserved → Recognized / DeReserved transition rules
//! - `report` - Monthly revenue aggregation over recognized reservations

pub mod report;
pub mod state;
pub mod types;

#[cfg(test)]
mod state_props;

pub use report::{ReportPeriod, ServiceRevenue, summarize_by_service};
pub use state::{ReservationStateMachine, Transition};
pub use types::{Reservation, ReservationKey, ReservationStatus};
