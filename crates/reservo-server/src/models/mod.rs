//! Reservo Data Models
//!
//! Request/response DTOs exposed by the HTTP API.

mod reservation;

pub use reservation::*;
