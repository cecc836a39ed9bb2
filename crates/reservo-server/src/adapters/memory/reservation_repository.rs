//! In-memory implementation of ReservationRepository
//!
//! Mirrors the guarantees of the PostgreSQL schema: guarded writes on
//! pending rows and no overlapping approved rows per room. Every write
//! checks and mutates under a single lock.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use reservo::{
    DateRange, DomainError, Page, Reservation, ReservationDraft, ReservationId,
    ReservationRepository, ReservationSearchFilter, ReservationStatus, RoomId, UserId,
};

#[derive(Default)]
struct Inner {
    next_id: ReservationId,
    rows: BTreeMap<ReservationId, Reservation>,
}

impl Inner {
    fn ensure_writable(&self, id: ReservationId) -> Result<&Reservation, DomainError> {
        let current = self
            .rows
            .get(&id)
            .ok_or_else(|| DomainError::not_found("Reservation", id))?;
        if current.status != ReservationStatus::Pending {
            return Err(DomainError::invalid_state(format!(
                "reservation {} is {} and can no longer be modified",
                id, current.status
            )));
        }
        Ok(current)
    }

    fn ensure_no_approved_overlap(&self, candidate: &Reservation) -> Result<(), DomainError> {
        if candidate.status != ReservationStatus::Approved {
            return Ok(());
        }
        let period = candidate.period();
        let clash = self.rows.values().any(|other| {
            other.id != candidate.id
                && other.room_id == candidate.room_id
                && other.status == ReservationStatus::Approved
                && other.period().overlaps(&period)
        });
        if clash {
            return Err(DomainError::Conflict(
                "room already has an approved reservation in this period".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mutex-guarded map of reservations keyed by id
#[derive(Default)]
pub struct InMemoryReservationRepository {
    inner: Mutex<Inner>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, DomainError> {
        self.inner
            .lock()
            .map_err(|_| DomainError::Repository("reservation store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DomainError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn save(&self, draft: &ReservationDraft) -> Result<Reservation, DomainError> {
        // Same CHECK as the table definition
        draft.period()?;

        let mut inner = self.lock()?;
        let id = match draft.id {
            Some(id) => {
                inner.ensure_writable(id)?;
                id
            }
            None => inner.next_id + 1,
        };

        let reservation = Reservation {
            id,
            user_id: draft.user_id,
            room_id: draft.room_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status.unwrap_or_default(),
        };
        inner.ensure_no_approved_overlap(&reservation)?;

        if draft.id.is_none() {
            inner.next_id = id;
        }
        inner.rows.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn set_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<(), DomainError> {
        let mut inner = self.lock()?;
        let mut updated = inner.ensure_writable(id)?.clone();
        updated.status = status;
        inner.ensure_no_approved_overlap(&updated)?;
        inner.rows.insert(id, updated);
        Ok(())
    }

    async fn search_by_filter(
        &self,
        room_id: Option<RoomId>,
        user_id: Option<UserId>,
        page: Page,
    ) -> Result<Vec<Reservation>, DomainError> {
        let filter = ReservationSearchFilter {
            room_id,
            user_id,
            ..ReservationSearchFilter::default()
        };
        let inner = self.lock()?;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.size).unwrap_or(0);

        Ok(inner
            .rows
            .values()
            .filter(|r| filter.matches(r))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_conflicting(
        &self,
        room_id: RoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: ReservationStatus,
        exclude_id: Option<ReservationId>,
    ) -> Result<Vec<ReservationId>, DomainError> {
        let wanted = DateRange::new(start_date, end_date)?;
        let inner = self.lock()?;

        Ok(inner
            .rows
            .values()
            .filter(|r| r.room_id == room_id && r.status == status)
            .filter(|r| Some(r.id) != exclude_id)
            .filter(|r| r.period().overlaps(&wanted))
            .map(|r| r.id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn draft(room_id: RoomId, start: &str, end: &str) -> ReservationDraft {
        ReservationDraft::new(1, room_id, date(start), date(end))
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryReservationRepository::new();
        let a = repo.save(&draft(1, "2024-01-01", "2024-01-02")).await.unwrap();
        let b = repo.save(&draft(1, "2024-01-03", "2024-01-04")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn test_guarded_set_status() {
        let repo = InMemoryReservationRepository::new();
        let rsvp = repo.save(&draft(1, "2024-01-01", "2024-01-02")).await.unwrap();
        repo.set_status(rsvp.id, ReservationStatus::Cancelled).await.unwrap();

        let err = repo
            .set_status(rsvp.id, ReservationStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));

        let err = repo.set_status(99, ReservationStatus::Cancelled).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_rejects_overlapping_approved_rows() {
        let repo = InMemoryReservationRepository::new();
        let a = repo.save(&draft(1, "2024-01-01", "2024-01-05")).await.unwrap();
        let b = repo.save(&draft(1, "2024-01-04", "2024-01-08")).await.unwrap();

        repo.save(&a.to_draft().with_status(ReservationStatus::Approved))
            .await
            .unwrap();
        let err = repo
            .save(&b.to_draft().with_status(ReservationStatus::Approved))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(
            repo.find_by_id(b.id).await.unwrap().unwrap().status,
            ReservationStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_search_pages_in_id_order() {
        let repo = InMemoryReservationRepository::new();
        for room in [1, 2, 1, 1] {
            repo.save(&draft(room, "2024-01-01", "2024-01-02")).await.unwrap();
        }

        let page = Page { size: 2, number: 0 };
        let ids: Vec<_> = repo
            .search_by_filter(Some(1), None, page)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let page = Page { size: 2, number: 1 };
        let rest = repo.search_by_filter(Some(1), None, page).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, 4);
    }
}
