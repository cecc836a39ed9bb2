use sqlx::PgPool;
use std::sync::Arc;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

use adapters::PgReservationRepository;
use application::ReservationService;
use config::ServiceConfig;
use reservo::ReservationRepository;

/// Application service over whichever repository the server was started with
pub type AppReservationService = ReservationService<dyn ReservationRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub reservation_service: Arc<AppReservationService>,
    /// Bearer token for protected routes (None = auth disabled)
    pub api_key: Option<Arc<str>>,
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Reservo API initializing...");

    // Secrets first, then the local environment (.env is optional)
    let _ = dotenvy::dotenv();
    let config = ServiceConfig::from_lookup(|key| {
        secrets.get(key).or_else(|| std::env::var(key).ok())
    });

    if config.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("No {} set - authentication disabled", config::API_KEY);
    }
    tracing::info!(
        default_page_size = config.paging.default_page_size,
        max_page_size = config.paging.max_page_size,
        "Search paging configured"
    );

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::Error::new(e).context("Failed to run database migrations"))?;

    tracing::info!("Database migrations completed");

    // Initialize application services
    let reservation_repo: Arc<dyn ReservationRepository> =
        Arc::new(PgReservationRepository::new(pool));
    let reservation_service = Arc::new(ReservationService::new(reservation_repo, config.paging));

    // Create application state
    let state = AppState {
        reservation_service,
        api_key: config.api_key.map(Arc::from),
    };

    let router = routes::app(state);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Reservo API ready");

    Ok(router.into())
}
