//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    ErrorResponse, ReservationRequest, ReservationResponse, ReservationStatus,
    SearchReservationsQuery,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::reservation::search_reservations,
        super::reservation::create_reservation,
        super::reservation::get_reservation,
        super::reservation::update_reservation,
        super::reservation::approve_reservation,
        super::reservation::cancel_reservation,
    ),
    components(schemas(
        ReservationStatus,
        ReservationRequest,
        ReservationResponse,
        SearchReservationsQuery,
        ErrorResponse,
    )),
    tags(
        (name = "Reservation", description = "Room reservation lifecycle")
    ),
    info(
        title = "Reservo API",
        description = "Room reservations with approval and conflict detection"
    )
)]
pub struct ApiDoc;
