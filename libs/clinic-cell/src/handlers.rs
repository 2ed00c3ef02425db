use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use shared_models::response::ApiResponse;

use crate::facade;
use crate::models::{
    BookingConfirmation, DoctorDetail, DoctorSummary, InsuranceProvider, PatientMatch,
    PatientRecord,
};
use crate::AppState;

/// Dashboard-facing routes. Every handler answers 200 with the uniform
/// envelope; the `success` field is the contract, not the status code.

#[derive(Debug, Deserialize)]
pub struct PatientListQuery {
    pub nin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckPatientQuery {
    pub nin: Option<String>,
    pub birthday: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlotsQuery {
    pub doctor_id: Option<String>,
    pub address_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub address_id: String,
    #[serde(default)]
    pub slot_start: String,
    #[serde(default)]
    pub booking_data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingQuery {
    pub doctor_id: Option<String>,
    pub address_id: Option<String>,
    pub external_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientBookingsQuery {
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub address_id: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PatientListQuery>,
) -> Json<ApiResponse<Vec<PatientRecord>>> {
    Json(facade::fetch_patients(&state.clinic, query.nin.as_deref()).await)
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<DoctorSummary>>> {
    Json(facade::fetch_doctors(&state.clinic).await)
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Json<ApiResponse<DoctorDetail>> {
    Json(facade::fetch_single_doctor(&state.clinic, &doctor_id).await)
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Json<ApiResponse<PatientRecord>> {
    Json(facade::fetch_single_patient(&state.clinic, &patient_id).await)
}

#[axum::debug_handler]
pub async fn check_patient(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckPatientQuery>,
) -> Json<ApiResponse<PatientMatch>> {
    Json(
        facade::check_patient_exists(
            &state.clinic,
            query.nin.as_deref().unwrap_or(""),
            query.birthday.as_deref().unwrap_or(""),
        )
        .await,
    )
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Json<ApiResponse<Value>> {
    Json(facade::create_patient(&state.clinic, payload).await)
}

#[axum::debug_handler]
pub async fn list_insurances(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<InsuranceProvider>>> {
    Json(facade::fetch_insurance_providers(&state.clinic).await)
}

#[axum::debug_handler]
pub async fn get_free_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FreeSlotsQuery>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(
        facade::fetch_free_slots(
            &state.clinic,
            query.doctor_id.as_deref().unwrap_or(""),
            query.address_id.as_deref().unwrap_or(""),
            query.start_date.as_deref().unwrap_or(""),
            query.end_date.as_deref().unwrap_or(""),
        )
        .await,
    )
}

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookSlotRequest>,
) -> Json<ApiResponse<BookingConfirmation>> {
    Json(
        facade::book_slot(
            &state.clinic,
            &request.doctor_id,
            &request.address_id,
            &request.slot_start,
            request.booking_data,
        )
        .await,
    )
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(query): Query<CancelBookingQuery>,
) -> Json<ApiResponse<String>> {
    Json(
        facade::cancel_booking(
            &state.clinic,
            query.doctor_id.as_deref().unwrap_or(""),
            query.address_id.as_deref().unwrap_or(""),
            &booking_id,
            query.external_id.as_deref(),
        )
        .await,
    )
}

#[axum::debug_handler]
pub async fn patient_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PatientBookingsQuery>,
) -> Json<ApiResponse<Value>> {
    Json(
        facade::fetch_patient_bookings(
            &state.clinic,
            &query.doctor_id,
            &query.address_id,
            &query.patient_id,
            &query.start_date,
            &query.end_date,
        )
        .await,
    )
}
