use serde_json::Value;
use tracing::error;

use shared_models::error::ClinicError;
use shared_models::response::ApiResponse;

use crate::models::{
    BookingConfirmation, DoctorDetail, DoctorSummary, InsuranceProvider, PatientMatch,
    PatientRecord,
};
use crate::services::ClinicService;

/// One function per domain operation, exposed to the dashboard routes and
/// the webhook dispatcher alike. Required inputs are checked before any
/// network call; every failure funnels into `ApiResponse::failure` with a
/// fixed user-facing message while the technical error is only logged.

const MSG_FETCH_PATIENTS: &str = "Failed to fetch patients from the clinic API.";
const MSG_FETCH_DOCTORS: &str = "Failed to fetch doctors from the clinic API.";
const MSG_FETCH_INSURANCES: &str = "Failed to fetch insurance providers from the clinic API.";
const MSG_FETCH_DOCTOR: &str = "Failed to fetch doctor.";
const MSG_FETCH_PATIENT: &str = "Failed to fetch patient.";
const MSG_CHECK_PATIENT: &str = "Failed to check patient existence.";
const MSG_CREATE_PATIENT: &str = "Failed to create or update patient.";
const MSG_FETCH_SLOTS: &str = "Failed to fetch free slots.";
const MSG_BOOK_SLOT: &str = "Failed to book the slot.";
const MSG_CANCEL_BOOKING: &str = "Failed to cancel the booking.";
const MSG_FETCH_BOOKINGS: &str = "Failed to fetch patient bookings.";

const MSG_CANCELLED: &str = "Booking cancelled successfully (204 No Content).";

fn missing(input: &str) -> bool {
    input.trim().is_empty()
}

fn require(value: &str, what: &str) -> Result<(), ClinicError> {
    if missing(value) {
        Err(ClinicError::Validation(format!("{} is required", what)))
    } else {
        Ok(())
    }
}

pub async fn fetch_patients(
    service: &ClinicService,
    nin: Option<&str>,
) -> ApiResponse<Vec<PatientRecord>> {
    match service.list_patients(nin).await {
        Ok(patients) => ApiResponse::success(patients),
        Err(e) => {
            error!("fetch_patients failed: {}", e);
            ApiResponse::failure(MSG_FETCH_PATIENTS)
        }
    }
}

pub async fn fetch_doctors(service: &ClinicService) -> ApiResponse<Vec<DoctorSummary>> {
    match service.list_doctors().await {
        Ok(doctors) => ApiResponse::success(doctors),
        Err(e) => {
            error!("fetch_doctors failed: {}", e);
            ApiResponse::failure(MSG_FETCH_DOCTORS)
        }
    }
}

pub async fn fetch_insurance_providers(
    service: &ClinicService,
) -> ApiResponse<Vec<InsuranceProvider>> {
    match service.list_insurance_providers().await {
        Ok(providers) => ApiResponse::success(providers),
        Err(e) => {
            error!("fetch_insurance_providers failed: {}", e);
            ApiResponse::failure(MSG_FETCH_INSURANCES)
        }
    }
}

pub async fn fetch_single_doctor(
    service: &ClinicService,
    doctor_id: &str,
) -> ApiResponse<DoctorDetail> {
    if let Err(e) = require(doctor_id, "doctor id") {
        error!("fetch_single_doctor rejected: {}", e);
        return ApiResponse::failure("Doctor id is required.");
    }

    match service.get_doctor(doctor_id).await {
        Ok(doctor) => ApiResponse::success(doctor),
        Err(e) => {
            error!("fetch_single_doctor failed for {}: {}", doctor_id, e);
            ApiResponse::failure(MSG_FETCH_DOCTOR)
        }
    }
}

pub async fn fetch_single_patient(
    service: &ClinicService,
    patient_id: &str,
) -> ApiResponse<PatientRecord> {
    if let Err(e) = require(patient_id, "patient id") {
        error!("fetch_single_patient rejected: {}", e);
        return ApiResponse::failure("Patient id is required.");
    }

    match service.get_patient(patient_id).await {
        Ok(patient) => ApiResponse::success(patient),
        Err(e) => {
            error!("fetch_single_patient failed for {}: {}", patient_id, e);
            ApiResponse::failure(MSG_FETCH_PATIENT)
        }
    }
}

pub async fn check_patient_exists(
    service: &ClinicService,
    nin: &str,
    birthday: &str,
) -> ApiResponse<PatientMatch> {
    if let Err(e) = require(nin, "nin").and(require(birthday, "birthday")) {
        error!("check_patient_exists rejected: {}", e);
        return ApiResponse::failure("National id and birthdate are required.");
    }

    match service.check_patient_exists(nin, birthday).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => {
            error!("check_patient_exists failed: {}", e);
            ApiResponse::failure(MSG_CHECK_PATIENT)
        }
    }
}

pub async fn create_patient(service: &ClinicService, payload: Value) -> ApiResponse<Value> {
    match service.create_or_update_patient(payload).await {
        Ok(response) => ApiResponse::success(response),
        Err(e) => {
            error!("create_patient failed: {}", e);
            ApiResponse::failure(MSG_CREATE_PATIENT)
        }
    }
}

pub async fn fetch_free_slots(
    service: &ClinicService,
    doctor_id: &str,
    address_id: &str,
    start_date: &str,
    end_date: &str,
) -> ApiResponse<Vec<String>> {
    if let Err(e) = require(doctor_id, "doctor id")
        .and(require(address_id, "address id"))
        .and(require(start_date, "start date"))
        .and(require(end_date, "end date"))
    {
        error!("fetch_free_slots rejected: {}", e);
        return ApiResponse::failure("Missing required slot parameters.");
    }

    match service
        .get_free_slots(doctor_id, address_id, start_date, end_date)
        .await
    {
        Ok(slots) => ApiResponse::success(slots),
        Err(e) => {
            error!("fetch_free_slots failed for doctor {}: {}", doctor_id, e);
            ApiResponse::failure(MSG_FETCH_SLOTS)
        }
    }
}

pub async fn book_slot(
    service: &ClinicService,
    doctor_id: &str,
    address_id: &str,
    slot_start: &str,
    booking_data: Value,
) -> ApiResponse<BookingConfirmation> {
    match service
        .book_slot(doctor_id, address_id, slot_start, booking_data)
        .await
    {
        Ok(confirmation) => ApiResponse::success(confirmation),
        Err(e) => {
            error!("book_slot failed for doctor {}: {}", doctor_id, e);
            ApiResponse::failure(MSG_BOOK_SLOT)
        }
    }
}

pub async fn cancel_booking(
    service: &ClinicService,
    doctor_id: &str,
    address_id: &str,
    booking_id: &str,
    external_id: Option<&str>,
) -> ApiResponse<String> {
    if let Err(e) = require(doctor_id, "doctor id")
        .and(require(address_id, "address id"))
        .and(require(booking_id, "booking id"))
    {
        error!("cancel_booking rejected: {}", e);
        return ApiResponse::failure("Missing required booking parameters.");
    }

    let external_id = external_id.filter(|id| !missing(id)).unwrap_or("1");

    match service
        .cancel_booking(doctor_id, address_id, booking_id, external_id)
        .await
    {
        Ok(()) => ApiResponse::success(MSG_CANCELLED.to_string()),
        Err(e) => {
            error!("cancel_booking failed for booking {}: {}", booking_id, e);
            ApiResponse::failure(MSG_CANCEL_BOOKING)
        }
    }
}

pub async fn fetch_patient_bookings(
    service: &ClinicService,
    doctor_id: &str,
    address_id: &str,
    patient_id: &str,
    start_date: &str,
    end_date: &str,
) -> ApiResponse<Value> {
    match service
        .get_patient_bookings(doctor_id, address_id, patient_id, start_date, end_date)
        .await
    {
        Ok(bookings) => ApiResponse::success(bookings),
        Err(e) => {
            error!("fetch_patient_bookings failed for patient {}: {}", patient_id, e);
            ApiResponse::failure(MSG_FETCH_BOOKINGS)
        }
    }
}
