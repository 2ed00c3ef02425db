use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers::*;
use crate::AppState;

pub fn clinic_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/exists", get(check_patient))
        .route("/patients/{id}", get(get_patient))
        .route("/doctors", get(list_doctors))
        .route("/doctors/{id}", get(get_doctor))
        .route("/insurances", get(list_insurances))
        .route("/slots", get(get_free_slots))
        .route("/bookings", get(patient_bookings).post(book_slot))
        .route("/bookings/{id}", delete(cancel_booking))
        .with_state(state)
}
