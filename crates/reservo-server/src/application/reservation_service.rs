//! Reservation Application Service (Use Case)
//!
//! Drives the reservation lifecycle: validates candidates, enforces the
//! status transitions, and consults the conflict detector before approval.

use std::sync::Arc;

use reservo::{
    ConflictDetector, DomainError, Page, Reservation, ReservationDraft, ReservationId,
    ReservationRepository, ReservationSearchFilter, ReservationStatus,
};

use crate::config::PagingConfig;

/// Application service for Reservation operations
pub struct ReservationService<R: ReservationRepository + ?Sized> {
    repo: Arc<R>,
    conflicts: ConflictDetector<R>,
    paging: PagingConfig,
}

impl<R: ReservationRepository + ?Sized> ReservationService<R> {
    pub fn new(repo: Arc<R>, paging: PagingConfig) -> Self {
        let conflicts = ConflictDetector::new(Arc::clone(&repo));
        Self {
            repo,
            conflicts,
            paging,
        }
    }

    /// Get a Reservation by ID
    pub async fn get(&self, id: ReservationId) -> Result<Reservation, DomainError> {
        self.load(id).await
    }

    /// List Reservations matching the filter, one page at a time
    pub async fn search(
        &self,
        filter: &ReservationSearchFilter,
    ) -> Result<Vec<Reservation>, DomainError> {
        let page = Page::resolve(
            filter.page_size,
            filter.page_number,
            self.paging.default_page_size,
            self.paging.max_page_size,
        )?;

        self.repo
            .search_by_filter(filter.room_id, filter.user_id, page)
            .await
    }

    /// Create a new Reservation in PENDING state
    pub async fn create(&self, candidate: ReservationDraft) -> Result<Reservation, DomainError> {
        if candidate.id.is_some() {
            return Err(DomainError::invalid_argument(
                "id must be empty when creating a reservation",
            ));
        }
        if candidate.status.is_some() {
            return Err(DomainError::invalid_argument(
                "status must be empty when creating a reservation",
            ));
        }
        let period = candidate.period()?;

        let saved = self
            .repo
            .save(&candidate.with_status(ReservationStatus::Pending))
            .await?;

        tracing::info!(
            "Created Reservation {} for room {} ({}, {} nights)",
            saved.id,
            saved.room_id,
            period,
            period.nights()
        );

        Ok(saved)
    }

    /// Update the period of a PENDING Reservation
    pub async fn update(
        &self,
        id: ReservationId,
        candidate: ReservationDraft,
    ) -> Result<Reservation, DomainError> {
        let current = self.load(id).await?;
        current.ensure_transition(ReservationStatus::Pending)?;

        if candidate.id.is_some_and(|candidate_id| candidate_id != id) {
            return Err(DomainError::invalid_argument(format!(
                "id {} in body does not match reservation {}",
                candidate.id.unwrap_or_default(),
                id
            )));
        }
        if candidate.user_id != current.user_id || candidate.room_id != current.room_id {
            return Err(DomainError::invalid_argument(
                "user and room of a reservation cannot be changed",
            ));
        }
        candidate.period()?;

        let updated = ReservationDraft {
            id: Some(current.id),
            status: Some(ReservationStatus::Pending),
            ..candidate
        };

        let saved = self.repo.save(&updated).await?;
        tracing::info!(
            "Updated Reservation {} ({} - {})",
            saved.id,
            saved.start_date,
            saved.end_date
        );

        Ok(saved)
    }

    /// Cancel a PENDING Reservation
    pub async fn cancel(&self, id: ReservationId) -> Result<(), DomainError> {
        let current = self.load(id).await?;
        if current.status.is_terminal() {
            return Err(DomainError::invalid_state(format!(
                "reservation {} is already {}",
                id, current.status
            )));
        }
        if current.status == ReservationStatus::Approved {
            return Err(DomainError::invalid_state(format!(
                "reservation {} is approved, cancellation must go through a manager",
                id
            )));
        }

        self.repo.set_status(id, ReservationStatus::Cancelled).await?;
        tracing::info!("Cancelled Reservation {}", id);

        Ok(())
    }

    /// Approve a PENDING Reservation when its room is free
    pub async fn approve(&self, id: ReservationId) -> Result<Reservation, DomainError> {
        let current = self.load(id).await?;
        current.ensure_transition(ReservationStatus::Approved)?;

        let conflicted = self
            .conflicts
            .has_conflict(
                current.room_id,
                current.start_date,
                current.end_date,
                Some(current.id),
            )
            .await?;
        if conflicted {
            tracing::warn!("Refused to approve Reservation {}: room is taken", id);
            return Err(DomainError::Conflict(format!(
                "reservation {} overlaps an approved reservation of room {}",
                id, current.room_id
            )));
        }

        let approved = self
            .repo
            .save(&current.to_draft().with_status(ReservationStatus::Approved))
            .await?;
        tracing::info!("Approved Reservation {}", approved.id);

        Ok(approved)
    }

    async fn load(&self, id: ReservationId) -> Result<Reservation, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }
}
