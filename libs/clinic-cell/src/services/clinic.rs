use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use shared_gateway::ClinicGateway;
use shared_models::error::ClinicError;

use crate::models::{
    BookingConfirmation, DoctorDetail, DoctorSummary, InsuranceProvider, ItemsPage, PatientMatch,
    PatientRecord, ResultEnvelope, SlotList,
};

/// Typed access to the upstream clinic resources: one method per call,
/// composing the gateway with the matching response schema. Paths and query
/// parameter casing follow the upstream integration contract and live only
/// here.
#[derive(Clone)]
pub struct ClinicService {
    gateway: Arc<ClinicGateway>,
}

impl ClinicService {
    pub fn new(gateway: Arc<ClinicGateway>) -> Self {
        Self { gateway }
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClinicError> {
        serde_json::from_value(value).map_err(|e| ClinicError::Schema(e.to_string()))
    }

    pub async fn list_patients(&self, nin: Option<&str>) -> Result<Vec<PatientRecord>, ClinicError> {
        let mut path = self.gateway.facility_path("/patients?page=1&pageSize=100");
        if let Some(nin) = nin {
            path.push_str(&format!("&nin={}", urlencoding::encode(nin)));
        }

        debug!("Listing patients (nin filter: {})", nin.is_some());

        let body = self.gateway.get(&path).await?;
        let envelope: ResultEnvelope<ItemsPage<PatientRecord>> = Self::decode(body)?;

        Ok(envelope.result.items.unwrap_or_default())
    }

    pub async fn list_doctors(&self) -> Result<Vec<DoctorSummary>, ClinicError> {
        let path = self.gateway.facility_path("/doctors?filter_web_disabled=0");

        let body = self.gateway.get(&path).await?;
        let envelope: ResultEnvelope<ItemsPage<DoctorSummary>> = Self::decode(body)?;

        Ok(envelope.result.items.unwrap_or_default())
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<DoctorDetail, ClinicError> {
        let path = self
            .gateway
            .facility_path(&format!("/doctors/{}", urlencoding::encode(doctor_id)));

        let body = self.gateway.get(&path).await?;
        let envelope: ResultEnvelope<DoctorDetail> = Self::decode(body)?;

        Ok(envelope.result)
    }

    pub async fn get_patient(&self, patient_id: &str) -> Result<PatientRecord, ClinicError> {
        // include=attended_by expands the doctors who have seen this patient
        let path = self.gateway.facility_path(&format!(
            "/patients/{}?include=attended_by",
            urlencoding::encode(patient_id)
        ));

        let body = self.gateway.get(&path).await?;
        let envelope: ResultEnvelope<PatientRecord> = Self::decode(body)?;

        Ok(envelope.result)
    }

    pub async fn check_patient_exists(
        &self,
        nin: &str,
        birthday: &str,
    ) -> Result<PatientMatch, ClinicError> {
        let path = self.gateway.facility_path(&format!(
            "/patients/exists?nin={}&birthday={}",
            urlencoding::encode(nin),
            urlencoding::encode(birthday)
        ));

        let body = self.gateway.get(&path).await?;
        let envelope: ResultEnvelope<PatientMatch> = Self::decode(body)?;

        Ok(envelope.result)
    }

    /// Pass-through: the upstream decides create-vs-update by the payload's
    /// national id, and the raw response body is echoed back to the caller.
    pub async fn create_or_update_patient(&self, payload: Value) -> Result<Value, ClinicError> {
        let path = self.gateway.facility_path("/patients");
        self.gateway.post(&path, payload).await
    }

    pub async fn list_insurance_providers(&self) -> Result<Vec<InsuranceProvider>, ClinicError> {
        let path = self.gateway.facility_path("/health-insurances");

        let body = self.gateway.get(&path).await?;
        let envelope: ResultEnvelope<ItemsPage<InsuranceProvider>> = Self::decode(body)?;

        Ok(envelope.result.items.unwrap_or_default())
    }

    pub async fn get_free_slots(
        &self,
        doctor_id: &str,
        address_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<String>, ClinicError> {
        let path = self.gateway.facility_path(&format!(
            "/doctors/{}/addresses/{}/free-slots?startDate={}&endDate={}",
            urlencoding::encode(doctor_id),
            urlencoding::encode(address_id),
            urlencoding::encode(start_date),
            urlencoding::encode(end_date)
        ));

        debug!("Fetching free slots for doctor {}", doctor_id);

        let body = self.gateway.get(&path).await?;
        let envelope: ResultEnvelope<SlotList> = Self::decode(body)?;

        Ok(envelope.result.items.unwrap_or_default())
    }

    pub async fn book_slot(
        &self,
        doctor_id: &str,
        address_id: &str,
        slot_start: &str,
        payload: Value,
    ) -> Result<BookingConfirmation, ClinicError> {
        // the ISO slot timestamp is path-embedded, so it must be
        // percent-encoded ("+03:00" offsets and colons would break the path)
        let path = self.gateway.facility_path(&format!(
            "/doctors/{}/addresses/{}/slots/{}/book",
            urlencoding::encode(doctor_id),
            urlencoding::encode(address_id),
            urlencoding::encode(slot_start)
        ));

        let body = self.gateway.post(&path, payload).await?;
        let envelope: ResultEnvelope<BookingConfirmation> = Self::decode(body)?;

        Ok(envelope.result)
    }

    /// Upstream answers 204 No Content on success; there is nothing to parse.
    pub async fn cancel_booking(
        &self,
        doctor_id: &str,
        address_id: &str,
        booking_id: &str,
        external_id: &str,
    ) -> Result<(), ClinicError> {
        let path = self.gateway.facility_path(&format!(
            "/doctors/{}/addresses/{}/bookings/{}?externalId={}",
            urlencoding::encode(doctor_id),
            urlencoding::encode(address_id),
            urlencoding::encode(booking_id),
            urlencoding::encode(external_id)
        ));

        self.gateway.delete(&path).await
    }

    /// Returns the raw body: the dashboard renders whatever booking fields
    /// the upstream includes.
    pub async fn get_patient_bookings(
        &self,
        doctor_id: &str,
        address_id: &str,
        patient_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Value, ClinicError> {
        let path = self.gateway.facility_path(&format!(
            "/doctors/{}/addresses/{}/bookings?patientId={}&startDate={}&endDate={}",
            urlencoding::encode(doctor_id),
            urlencoding::encode(address_id),
            urlencoding::encode(patient_id),
            urlencoding::encode(start_date),
            urlencoding::encode(end_date)
        ));

        self.gateway.get(&path).await
    }
}
