//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and domain services.

mod reservation_service;

pub use reservation_service::ReservationService;
