use std::sync::Arc;

use axum::{routing::get, Router};

use clinic_cell::router::clinic_routes;
use clinic_cell::AppState;
use webhook_cell::router::webhook_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Bridge API is running!" }))
        .nest("/api/clinic", clinic_routes(state.clone()))
        .nest("/webhook", webhook_routes(state))
}
