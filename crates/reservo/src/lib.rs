//! Reservo Domain Library
//!
//! Core domain types and interfaces for the Reservo room reservation system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Reservation, ReservationDraft)
//!   - `value_objects/`: Immutable value types (ReservationStatus, DateRange, Page)
//!   - `services/`: Domain services (ConflictDetector)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use reservo::domain::{Reservation, ReservationStatus};
//! use reservo::ports::ReservationRepository;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ConflictDetector, DateRange, DomainError, Page, Reservation, ReservationDraft, ReservationId,
    ReservationSearchFilter, ReservationStatus, RoomId, UserId,
};
pub use ports::ReservationRepository;
