//! Core business logic for the balance service.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules and transition rules live here.
//!
//! # Modules
//!
//! - `ledger` - Accounts, movements, history queries and the ledger error taxonomy
//! - `reservation` - Two-phase holds and the monthly revenue report

pub mod ledger;
pub mod reservation;
