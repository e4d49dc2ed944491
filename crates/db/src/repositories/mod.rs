//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod balance;
pub mod movement;
pub mod reservation;

pub use balance::BalanceRepository;
pub use movement::MovementRepository;
pub use reservation::ReservationRepository;
