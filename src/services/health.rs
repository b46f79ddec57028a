use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use crate::database::connection::DatabaseManager;

/// State shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store pinged by `/health/ready`.
    pub db: Arc<DatabaseManager>,
}

/// Tiny HTTP surface so the hosting platform sees an open port.
pub struct HealthService {
    /// Router served by `axum::serve`.
    pub router: Router,
}

impl HealthService {
    /// Builds `/`, `/healthz` and `/health/ready` with request tracing.
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        let state = AppState { db };

        let router = Router::new()
            .route("/", get(root))
            .route("/healthz", get(healthz))
            .route("/health/ready", get(readiness_check))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state);

        Self { router }
    }
}

async fn root() -> &'static str {
    "Bot is running 🚀"
}

async fn healthz() -> &'static str {
    tracing::info!("health ping @ {}", Utc::now().to_rfc3339());
    "ok"
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    match state.db.ping().await {
        Ok(_) => Ok(Json("ready")),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
