//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod reservation_repository;

pub use reservation_repository::*;
