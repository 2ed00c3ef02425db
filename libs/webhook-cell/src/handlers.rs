use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ring::constant_time::verify_slices_are_equal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info};

use clinic_cell::{facade, AppState};
use shared_models::response::ApiResponse;

use crate::models::{
    BookSlotParams, CancelBookingParams, CheckPatientParams, GetDoctorParams, GetSlotsParams,
};

pub const WEBHOOK_SECRET_HEADER: &str = "x-n8n-webhook-secret";

/// Only the automation tool holding the shared secret may call this route.
fn verify_webhook_secret(headers: &HeaderMap, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }

    match headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some(provided) => verify_slices_are_equal(provided.as_bytes(), secret.as_bytes()).is_ok(),
        None => false,
    }
}

fn decode_params<T: DeserializeOwned>(action: &str, payload: Value) -> Result<T, Response> {
    serde_json::from_value(payload).map_err(|e| {
        error!("Invalid webhook payload for {}: {}", action, e);
        Json(ApiResponse::<()>::failure(format!(
            "Invalid payload for action '{}'.",
            action
        )))
        .into_response()
    })
}

/// Dispatches `{action, payload}` onto the facade. Dispatched actions answer
/// 200 with the facade's envelope even when the action itself failed; the
/// status code reflects only the webhook's own auth/dispatch layer.
#[axum::debug_handler]
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !verify_webhook_secret(&headers, &state.config.webhook_secret) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::failure(
                "Unauthorized. Invalid Webhook Secret.",
            )),
        )
            .into_response();
    }

    let action = body
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let payload = body.get("payload").cloned().unwrap_or(Value::Null);

    info!("Webhook request, action: {}", action);

    let service = &state.clinic;

    match action.as_str() {
        "CHECK_PATIENT" => {
            let params = match decode_params::<CheckPatientParams>(&action, payload)
            {
                Ok(params) => params,
                Err(response) => return response,
            };
            Json(facade::check_patient_exists(service, &params.nin, &params.birthday).await)
                .into_response()
        }
        "CREATE_PATIENT" => Json(facade::create_patient(service, payload).await).into_response(),
        "GET_SLOTS" => {
            let params = match decode_params::<GetSlotsParams>(&action, payload) {
                Ok(params) => params,
                Err(response) => return response,
            };
            Json(
                facade::fetch_free_slots(
                    service,
                    &params.doctor_id,
                    &params.address_id,
                    &params.start_date,
                    &params.end_date,
                )
                .await,
            )
            .into_response()
        }
        "BOOK_SLOT" => {
            let params = match decode_params::<BookSlotParams>(&action, payload) {
                Ok(params) => params,
                Err(response) => return response,
            };
            Json(
                facade::book_slot(
                    service,
                    &params.doctor_id,
                    &params.address_id,
                    &params.slot_start,
                    params.booking_data,
                )
                .await,
            )
            .into_response()
        }
        "CANCEL_BOOKING" => {
            let params =
                match decode_params::<CancelBookingParams>(&action, payload) {
                    Ok(params) => params,
                    Err(response) => return response,
                };
            Json(
                facade::cancel_booking(
                    service,
                    &params.doctor_id,
                    &params.address_id,
                    &params.booking_id,
                    params.external_id.as_deref(),
                )
                .await,
            )
            .into_response()
        }
        "GET_INSURANCES" => Json(facade::fetch_insurance_providers(service).await).into_response(),
        "GET_DOCTOR" => {
            let params = match decode_params::<GetDoctorParams>(&action, payload) {
                Ok(params) => params,
                Err(response) => return response,
            };
            Json(facade::fetch_single_doctor(service, &params.doctor_id).await).into_response()
        }
        other => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::failure(format!(
                "Action '{}' not supported.",
                other
            ))),
        )
            .into_response(),
    }
}
