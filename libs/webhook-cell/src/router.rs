use std::sync::Arc;

use axum::{routing::post, Router};

use clinic_cell::AppState;

use crate::handlers::dispatch;

pub fn webhook_routes(state: Arc<AppState>) -> Router {
    Router::new().route("/n8n", post(dispatch)).with_state(state)
}
