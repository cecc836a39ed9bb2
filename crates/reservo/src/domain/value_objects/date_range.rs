//! DateRange - Half-open calendar date interval

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::errors::DomainError;

/// Half-open date interval `[start, end)`
///
/// The end date is the check-out day, so `end` must be strictly after `start`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::invalid_argument(format!(
                "end date {} must be after start date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from dates already known to be ordered (persisted rows)
    pub(crate) fn from_trusted(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights covered by the range
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Two ranges overlap iff each starts before the other ends.
    /// Adjacent ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
