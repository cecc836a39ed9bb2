//! ReservationStatus - Lifecycle state of a reservation

use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
///
/// ```text
/// PENDING ──approve──► APPROVED
///    │
///    └──cancel──► CANCELLED (terminal)
/// ```
///
/// `PENDING` may also be re-entered by an edit. Nothing leaves `APPROVED`
/// or `CANCELLED`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Approved,
    Cancelled,
}

impl ReservationStatus {
    /// Database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Pending)
                | (ReservationStatus::Pending, ReservationStatus::Approved)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == ReservationStatus::Cancelled
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Unknown reservation status: {}", s)),
        }
    }
}
