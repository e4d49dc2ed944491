//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::movements::Entity as Movements;
pub use super::reservations::Entity as Reservations;
