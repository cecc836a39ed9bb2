//! Reservation - Booking of a room over a date range
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{DateRange, ReservationStatus};

pub type ReservationId = i64;
pub type UserId = i64;
pub type RoomId = i64;

/// Reservation - persisted booking with lifecycle status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Booked period
    ///
    /// Stored reservations always satisfy `end_date > start_date`.
    pub fn period(&self) -> DateRange {
        DateRange::from_trusted(self.start_date, self.end_date)
    }

    /// Draft carrying this reservation's identity, ready to be saved
    pub fn to_draft(&self) -> ReservationDraft {
        ReservationDraft {
            id: Some(self.id),
            user_id: self.user_id,
            room_id: self.room_id,
            start_date: self.start_date,
            end_date: self.end_date,
            status: Some(self.status),
        }
    }

    /// Fail with `InvalidState` unless the lifecycle allows moving to `next`
    pub fn ensure_transition(&self, next: ReservationStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::invalid_state(format!(
                "reservation {} cannot move from {} to {}",
                self.id, self.status, next
            )))
        }
    }
}

/// Reservation candidate
///
/// Used both as client input and as the unit handed to the repository's
/// `save`: a draft without `id` is inserted, a draft with `id` updates
/// the stored row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationDraft {
    pub id: Option<ReservationId>,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<ReservationStatus>,
}

impl ReservationDraft {
    /// Create a draft without id or status
    pub fn new(user_id: UserId, room_id: RoomId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            room_id,
            start_date,
            end_date,
            status: None,
        }
    }

    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Validated booked period
    pub fn period(&self) -> Result<DateRange, DomainError> {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Criteria for listing reservations
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationSearchFilter {
    pub room_id: Option<RoomId>,
    pub user_id: Option<UserId>,
    pub page_size: Option<i64>,
    pub page_number: Option<i64>,
}

impl ReservationSearchFilter {
    pub fn by_room(room_id: RoomId) -> Self {
        Self {
            room_id: Some(room_id),
            ..Self::default()
        }
    }

    pub fn by_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Whether a reservation satisfies the room/user criteria
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.room_id.map_or(true, |room| reservation.room_id == room)
            && self.user_id.map_or(true, |user| reservation.user_id == user)
    }
}
