//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Reservation: A persisted booking of a room over a date range
//! - ReservationDraft: A reservation candidate that may lack id and status
//! - ReservationSearchFilter: Criteria for listing reservations

mod reservation;

pub use reservation::*;
