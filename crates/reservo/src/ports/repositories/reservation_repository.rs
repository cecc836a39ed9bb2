//! Reservation Repository Port
//!
//! Abstract interface for reservation persistence operations.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    errors::DomainError, Page, Reservation, ReservationDraft, ReservationId, ReservationStatus,
    RoomId, UserId,
};

/// Repository interface for Reservation entities
///
/// Implementations are the final arbiter of concurrent writes:
///
/// - Writes to an existing row (`save` with an id, `set_status`) only apply
///   while the stored status is still `PENDING`; otherwise they fail with
///   `InvalidState`, and with `NotFound` for an unknown id.
/// - A row is never persisted as `APPROVED` while it overlaps another
///   `APPROVED` row of the same room; such writes fail with `Conflict`.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Find a reservation by ID
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// Save a reservation (insert when the draft has no id, update otherwise).
    /// A missing draft status is stored as `PENDING`.
    async fn save(&self, draft: &ReservationDraft) -> Result<Reservation, DomainError>;

    /// Update only the status column of a reservation
    async fn set_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<(), DomainError>;

    /// List reservations matching the optional room/user, ordered by id
    async fn search_by_filter(
        &self,
        room_id: Option<RoomId>,
        user_id: Option<UserId>,
        page: Page,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Ids of reservations in `room_id` with `status` whose period overlaps
    /// `[start_date, end_date)`, excluding `exclude_id`
    async fn find_conflicting(
        &self,
        room_id: RoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: ReservationStatus,
        exclude_id: Option<ReservationId>,
    ) -> Result<Vec<ReservationId>, DomainError>;
}

