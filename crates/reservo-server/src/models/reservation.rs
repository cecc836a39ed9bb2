//! Reservation DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Cancelled,
}

impl From<reservo::ReservationStatus> for ReservationStatus {
    fn from(status: reservo::ReservationStatus) -> Self {
        match status {
            reservo::ReservationStatus::Pending => ReservationStatus::Pending,
            reservo::ReservationStatus::Approved => ReservationStatus::Approved,
            reservo::ReservationStatus::Cancelled => ReservationStatus::Cancelled,
        }
    }
}

impl From<ReservationStatus> for reservo::ReservationStatus {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Pending => reservo::ReservationStatus::Pending,
            ReservationStatus::Approved => reservo::ReservationStatus::Approved,
            ReservationStatus::Cancelled => reservo::ReservationStatus::Cancelled,
        }
    }
}

// ============================================
// Request/Response DTOs
// ============================================

/// Reservation candidate for create and update
///
/// `id` and `status` are accepted so that clients sending them on create
/// get an explicit rejection instead of having them silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub id: Option<i64>,
    pub user_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<ReservationStatus>,
}

impl From<ReservationRequest> for reservo::ReservationDraft {
    fn from(req: ReservationRequest) -> Self {
        Self {
            id: req.id,
            user_id: req.user_id,
            room_id: req.room_id,
            start_date: req.start_date,
            end_date: req.end_date,
            status: req.status.map(Into::into),
        }
    }
}

/// Reservation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
}

impl From<reservo::Reservation> for ReservationResponse {
    fn from(rsvp: reservo::Reservation) -> Self {
        Self {
            id: rsvp.id,
            user_id: rsvp.user_id,
            room_id: rsvp.room_id,
            start_date: rsvp.start_date,
            end_date: rsvp.end_date,
            status: rsvp.status.into(),
        }
    }
}

/// Search query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchReservationsQuery {
    /// Only reservations of this room
    pub room_id: Option<i64>,
    /// Only reservations of this user
    pub user_id: Option<i64>,
    /// Page size (default 10)
    pub page_size: Option<i64>,
    /// Zero-based page number (default 0)
    pub page_number: Option<i64>,
}

impl From<SearchReservationsQuery> for reservo::ReservationSearchFilter {
    fn from(query: SearchReservationsQuery) -> Self {
        Self {
            room_id: query.room_id,
            user_id: query.user_id,
            page_size: query.page_size,
            page_number: query.page_number,
        }
    }
}

/// Error body returned by every failing route
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
