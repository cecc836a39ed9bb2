//! Reservation Routes - Room Reservation Lifecycle
//!
//! HTTP handlers that delegate to ReservationService for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use reservo::{DomainError, ReservationDraft, ReservationSearchFilter};

use crate::models::{
    ErrorResponse, ReservationRequest, ReservationResponse, SearchReservationsQuery,
};
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a domain error to an HTTP status and JSON body
pub fn error_response(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidState(_) | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) => {
            tracing::error!("Repository failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: e.kind().to_string(),
            message: e.to_string(),
        }),
    )
}

/// Search reservations
#[utoipa::path(
    get,
    path = "/reservations",
    params(SearchReservationsQuery),
    responses(
        (status = 200, description = "Page of reservations", body = Vec<ReservationResponse>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn search_reservations(
    State(state): State<AppState>,
    Query(query): Query<SearchReservationsQuery>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let filter = ReservationSearchFilter::from(query);
    let reservations = state
        .reservation_service
        .search(&filter)
        .await
        .map_err(error_response)?;

    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// Create new reservation
#[utoipa::path(
    post,
    path = "/reservations",
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation created (PENDING)", body = ReservationResponse),
        (status = 400, description = "Invalid reservation", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<ReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let rsvp = state
        .reservation_service
        .create(ReservationDraft::from(payload))
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(rsvp.into())))
}

/// Get reservation by ID
#[utoipa::path(
    get,
    path = "/reservations/{id}",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation found", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let rsvp = state
        .reservation_service
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(rsvp.into()))
}

/// Update a pending reservation
#[utoipa::path(
    put,
    path = "/reservations/{id}",
    params(("id" = i64, Path, description = "Reservation ID")),
    request_body = ReservationRequest,
    responses(
        (status = 200, description = "Reservation updated", body = ReservationResponse),
        (status = 400, description = "Invalid reservation", body = ErrorResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 409, description = "Reservation is no longer pending", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let rsvp = state
        .reservation_service
        .update(id, ReservationDraft::from(payload))
        .await
        .map_err(error_response)?;

    Ok(Json(rsvp.into()))
}

/// Approve a pending reservation
#[utoipa::path(
    post,
    path = "/reservations/{id}/approve",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation approved", body = ReservationResponse),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 409, description = "Not pending, or overlaps an approved reservation", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn approve_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let rsvp = state
        .reservation_service
        .approve(id)
        .await
        .map_err(error_response)?;

    Ok(Json(rsvp.into()))
}

/// Cancel a pending reservation
#[utoipa::path(
    delete,
    path = "/reservations/{id}/cancel",
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 204, description = "Reservation cancelled"),
        (status = 404, description = "Reservation not found", body = ErrorResponse),
        (status = 409, description = "Reservation is approved or already cancelled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .reservation_service
        .cancel(id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            get(search_reservations).post(create_reservation),
        )
        .route(
            "/reservations/:id",
            get(get_reservation).put(update_reservation),
        )
        .route("/reservations/:id/approve", post(approve_reservation))
        .route("/reservations/:id/cancel", delete(cancel_reservation))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use reservo::ReservationRepository;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryReservationRepository;
    use crate::application::ReservationService;
    use crate::config::PagingConfig;
    use crate::routes::app;
    use crate::AppState;

    use super::*;

    fn state(api_key: Option<&str>) -> AppState {
        let repo: Arc<dyn ReservationRepository> = Arc::new(InMemoryReservationRepository::new());
        AppState {
            reservation_service: Arc::new(ReservationService::new(repo, PagingConfig::default())),
            api_key: api_key.map(Arc::from),
        }
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn booking(start: &str, end: &str) -> Value {
        json!({ "userId": 1, "roomId": 10, "startDate": start, "endDate": end })
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let router = app(state(None));

        let (status, created) = send(router.clone(), "POST", "/reservations", Some(booking("2024-01-01", "2024-01-05"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "PENDING");
        assert_eq!(created["startDate"], "2024-01-01");

        let uri = format!("/reservations/{}", created["id"]);
        let (status, fetched) = send(router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_with_status_is_bad_request() {
        let router = app(state(None));
        let mut body = booking("2024-01-01", "2024-01-05");
        body["status"] = json!("APPROVED");

        let (status, error) = send(router, "POST", "/reservations", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "invalid_argument");
    }

    #[tokio::test]
    async fn test_unknown_reservation_is_not_found() {
        let router = app(state(None));
        let (status, error) = send(router, "POST", "/reservations/77/approve", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"], "not_found");
    }

    #[tokio::test]
    async fn test_approve_conflict_and_cancel_flow() {
        let router = app(state(None));

        let (_, a) = send(router.clone(), "POST", "/reservations", Some(booking("2024-01-01", "2024-01-05"))).await;
        let (_, b) = send(router.clone(), "POST", "/reservations", Some(booking("2024-01-04", "2024-01-08"))).await;

        let (status, approved) = send(router.clone(), "POST", &format!("/reservations/{}/approve", a["id"]), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(approved["status"], "APPROVED");

        let (status, error) = send(router.clone(), "POST", &format!("/reservations/{}/approve", b["id"]), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["error"], "conflict");

        let (status, _) = send(router.clone(), "DELETE", &format!("/reservations/{}/cancel", b["id"]), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, error) = send(router, "DELETE", &format!("/reservations/{}/cancel", a["id"]), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["error"], "invalid_state");
    }

    #[tokio::test]
    async fn test_search_with_query() {
        let router = app(state(None));
        send(router.clone(), "POST", "/reservations", Some(booking("2024-01-01", "2024-01-02"))).await;
        send(router.clone(), "POST", "/reservations", Some(booking("2024-01-03", "2024-01-04"))).await;

        let (status, page) = send(router.clone(), "GET", "/reservations?roomId=10&pageSize=1&pageNumber=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page.as_array().map(Vec::len), Some(1));
        assert_eq!(page[0]["startDate"], "2024-01-03");

        let (status, _) = send(router, "GET", "/reservations?pageNumber=-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_key_required_when_configured() {
        let router = app(state(Some("s3cret")));

        let (status, _) = send(router.clone(), "GET", "/reservations", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/reservations")
            .header(header::AUTHORIZATION, "Bearer s3cret")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, _) = send(router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
