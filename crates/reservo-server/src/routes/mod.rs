//! Reservo API Routes
//!
//! - /health - Liveness probe (public)
//! - /reservations - Reservation lifecycle (Bearer API key)
//! - /swagger-ui - OpenAPI documentation

pub mod reservation;
pub mod swagger;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth, AppState};

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(reservation::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    // OpenAPI documentation
    let openapi = swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
