//! PostgreSQL Repository Implementations

mod reservation_repository;

pub use reservation_repository::PgReservationRepository;
