//! PostgreSQL implementation of ReservationRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use reservo::{
    DomainError, Page, Reservation, ReservationDraft, ReservationId, ReservationRepository,
    ReservationStatus, RoomId, UserId,
};

/// SQLSTATE raised by the approved-overlap exclusion constraint
const EXCLUSION_VIOLATION: &str = "23P01";
/// SQLSTATE raised by CHECK constraints (period, status)
const CHECK_VIOLATION: &str = "23514";

const COLUMNS: &str = "id, user_id, room_id, start_date, end_date, status";

/// PostgreSQL implementation of ReservationRepository
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Explain why a guarded write touched no row
    async fn rejected_write(&self, id: ReservationId) -> DomainError {
        match self.find_by_id(id).await {
            Ok(Some(current)) => DomainError::invalid_state(format!(
                "reservation {} is {} and can no longer be modified",
                id, current.status
            )),
            Ok(None) => DomainError::not_found("Reservation", id),
            Err(e) => e,
        }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    user_id: i64,
    room_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = DomainError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ReservationStatus>()
            .map_err(DomainError::Repository)?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            start_date: row.start_date,
            end_date: row.end_date,
            status,
        })
    }
}

fn map_sqlx_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        match db.code().as_deref() {
            Some(EXCLUSION_VIOLATION) => {
                return DomainError::Conflict(
                    "room already has an approved reservation in this period".to_string(),
                )
            }
            Some(CHECK_VIOLATION) => return DomainError::InvalidArgument(db.message().to_string()),
            _ => {}
        }
    }
    DomainError::Repository(e.to_string())
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, DomainError> {
        let row = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn save(&self, draft: &ReservationDraft) -> Result<Reservation, DomainError> {
        let status = draft.status.unwrap_or_default();

        let row = match draft.id {
            // Update, only while the stored row is still pending
            Some(id) => sqlx::query_as::<_, ReservationRow>(&format!(
                r#"
                UPDATE reservations
                SET user_id = $2, room_id = $3, start_date = $4, end_date = $5,
                    status = $6, updated_at = NOW()
                WHERE id = $1 AND status = 'pending'
                RETURNING {COLUMNS}
                "#
            ))
            .bind(id)
            .bind(draft.user_id)
            .bind(draft.room_id)
            .bind(draft.start_date)
            .bind(draft.end_date)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?,
            // Insert
            None => Some(
                sqlx::query_as::<_, ReservationRow>(&format!(
                    r#"
                    INSERT INTO reservations (user_id, room_id, start_date, end_date, status)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING {COLUMNS}
                    "#
                ))
                .bind(draft.user_id)
                .bind(draft.room_id)
                .bind(draft.start_date)
                .bind(draft.end_date)
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?,
            ),
        };

        match (row, draft.id) {
            (Some(row), _) => row.try_into(),
            (None, Some(id)) => Err(self.rejected_write(id).await),
            (None, None) => Err(DomainError::Repository("insert returned no row".to_string())),
        }
    }

    async fn set_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(self.rejected_write(id).await);
        }
        Ok(())
    }

    async fn search_by_filter(
        &self,
        room_id: Option<RoomId>,
        user_id: Option<UserId>,
        page: Page,
    ) -> Result<Vec<Reservation>, DomainError> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            r#"
            SELECT {COLUMNS} FROM reservations
            WHERE ($1::BIGINT IS NULL OR room_id = $1)
              AND ($2::BIGINT IS NULL OR user_id = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(room_id)
        .bind(user_id)
        .bind(page.size)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_conflicting(
        &self,
        room_id: RoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: ReservationStatus,
        exclude_id: Option<ReservationId>,
    ) -> Result<Vec<ReservationId>, DomainError> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM reservations
            WHERE room_id = $1
              AND status = $2
              AND start_date < $4
              AND $3 < end_date
              AND ($5::BIGINT IS NULL OR id <> $5)
            ORDER BY id
            "#,
        )
        .bind(room_id)
        .bind(status.as_str())
        .bind(start_date)
        .bind(end_date)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(ids)
    }
}
