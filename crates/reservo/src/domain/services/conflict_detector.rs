//! Conflict Detector
//!
//! Decides whether a room is free over a period by looking for
//! approved reservations that overlap it.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{errors::DomainError, ReservationId, ReservationStatus, RoomId};
use crate::ports::ReservationRepository;

/// Read-only check for overlapping approved reservations
pub struct ConflictDetector<R: ReservationRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ReservationRepository + ?Sized> ConflictDetector<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// True iff an approved reservation in `room_id` other than `exclude_id`
    /// overlaps `[start_date, end_date)`
    pub async fn has_conflict(
        &self,
        room_id: RoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<ReservationId>,
    ) -> Result<bool, DomainError> {
        let conflicting = self
            .repo
            .find_conflicting(
                room_id,
                start_date,
                end_date,
                ReservationStatus::Approved,
                exclude_id,
            )
            .await?;

        if conflicting.is_empty() {
            tracing::debug!(
                room_id,
                %start_date,
                %end_date,
                "No approved reservation overlaps the requested period"
            );
            return Ok(false);
        }

        tracing::warn!(
            room_id,
            %start_date,
            %end_date,
            conflicting_ids = ?conflicting,
            "Room already has approved reservations in the requested period"
        );
        Ok(true)
    }
}

impl<R: ReservationRepository + ?Sized> Clone for ConflictDetector<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}
