use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The upstream contract is loosely specified: records may omit fields, set
/// them to null, or carry attributes we never asked for. Every shape here is
/// "open" - unknown fields land in the flattened `extra` map and are echoed
/// back on serialization, and known-inconsistent fields are `Option`.

/// Fields the upstream returns as either a string or a number (national ids,
/// booking statuses).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Number(i64),
}

/// `{result: ...}` envelope wrapping every upstream response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub result: T,
}

/// `{items: [...]}` page inside a list envelope. `items` may be missing or
/// null entirely when the facility has no records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsPage<T> {
    pub items: Option<Vec<T>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A patient record; incomplete registrations routinely lack name, contact
/// details, or even a national id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i64,
    pub name: Option<String>,
    // the record field is `cpf`; `nin` is only the lookup query parameter
    pub cpf: Option<StringOrNumber>,
    pub mobile: Option<String>,
    // not validated as an address: upstream stores placeholders like "-"
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: i64,
    pub name: String,
    pub crm: Option<i64>,
    pub specialty: Option<String>,
    #[serde(rename = "medicalAppointmentWEB")]
    pub medical_appointment_web: Option<String>,
    pub council: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInsuranceCode {
    #[serde(rename = "codeHealthInsurance")]
    pub code_health_insurance: Option<i64>,
    #[serde(rename = "healthInsurance")]
    pub health_insurance: Option<String>,
    #[serde(rename = "dailyScheduleLimit")]
    pub daily_schedule_limit: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Single-doctor detail, richer than the list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDetail {
    pub id: i64,
    pub enabled: Option<bool>,
    pub crm: Option<i64>,
    pub name: Option<String>,
    pub nin: Option<String>,
    pub specialty: Option<String>,
    #[serde(rename = "codeHealthInsurance")]
    pub code_health_insurance: Option<Vec<HealthInsuranceCode>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceProvider {
    pub id: i64,
    pub name: Option<String>,
    pub status: Option<bool>,
    pub ans: Option<String>,
    #[serde(rename = "requireRegistration")]
    pub require_registration: Option<bool>,
    #[serde(rename = "requireCardValidity")]
    pub require_card_validity: Option<bool>,
    #[serde(rename = "requirePlan")]
    pub require_plan: Option<bool>,
    #[serde(rename = "acceptWeb")]
    pub accept_web: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of the patient-exists lookup; all fields null when there is no
/// match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientMatch {
    pub patient_id: Option<i64>,
    pub patient_name: Option<String>,
    pub patient_mobile: Option<String>,
    pub patient_email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Free-slot availability: a list of ISO-8601 start timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotList {
    pub items: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub id: i64,
    pub status: Option<StringOrNumber>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patient_tolerates_nulls_and_preserves_unknown_fields() {
        let raw = json!({ "id": 1, "name": null, "extra_field": "x" });

        let patient: PatientRecord = serde_json::from_value(raw).unwrap();

        assert_eq!(patient.id, 1);
        assert!(patient.name.is_none());
        assert_eq!(patient.extra.get("extra_field"), Some(&json!("x")));

        // passthrough on the way back out
        let echoed = serde_json::to_value(&patient).unwrap();
        assert_eq!(echoed["extra_field"], json!("x"));
    }

    #[test]
    fn patient_cpf_accepts_string_or_number() {
        let as_string: PatientRecord =
            serde_json::from_value(json!({ "id": 1, "cpf": "12345678900" })).unwrap();
        let as_number: PatientRecord =
            serde_json::from_value(json!({ "id": 2, "cpf": 12345678900i64 })).unwrap();

        assert!(matches!(as_string.cpf, Some(StringOrNumber::String(_))));
        assert!(matches!(as_number.cpf, Some(StringOrNumber::Number(_))));
    }

    #[test]
    fn patient_cpf_binds_the_typed_field_not_the_extra_map() {
        let raw = json!({ "id": 1, "name": "Jo", "cpf": "12345678900" });

        let patient: PatientRecord = serde_json::from_value(raw).unwrap();

        assert!(matches!(patient.cpf, Some(StringOrNumber::String(_))));
        assert!(patient.extra.get("cpf").is_none());

        // no spurious null keys invented on the way back out
        let echoed = serde_json::to_value(&patient).unwrap();
        assert_eq!(echoed["cpf"], json!("12345678900"));
        assert!(echoed.get("nin").is_none());
    }

    #[test]
    fn patient_without_id_is_a_schema_mismatch() {
        let raw = json!({ "name": "No Id" });
        assert!(serde_json::from_value::<PatientRecord>(raw).is_err());
    }

    #[test]
    fn list_envelope_tolerates_missing_items() {
        let raw = json!({ "result": { "id": 42 } });

        let envelope: ResultEnvelope<ItemsPage<PatientRecord>> =
            serde_json::from_value(raw).unwrap();

        assert!(envelope.result.items.is_none());
        assert_eq!(envelope.result.extra.get("id"), Some(&json!(42)));
    }

    #[test]
    fn booking_status_accepts_text_or_code() {
        let textual: BookingConfirmation =
            serde_json::from_value(json!({ "id": 9, "status": "booked" })).unwrap();
        let numeric: BookingConfirmation =
            serde_json::from_value(json!({ "id": 9, "status": 1 })).unwrap();

        assert!(matches!(textual.status, Some(StringOrNumber::String(_))));
        assert!(matches!(numeric.status, Some(StringOrNumber::Number(_))));
    }

    #[test]
    fn doctor_detail_parses_insurance_codes() {
        let raw = json!({
            "result": {
                "id": 8,
                "enabled": true,
                "name": "Dr. Example",
                "codeHealthInsurance": [
                    { "codeHealthInsurance": 3, "healthInsurance": "Acme Health", "dailyScheduleLimit": null }
                ]
            }
        });

        let envelope: ResultEnvelope<DoctorDetail> = serde_json::from_value(raw).unwrap();
        let codes = envelope.result.code_health_insurance.unwrap();

        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code_health_insurance, Some(3));
        assert!(codes[0].daily_schedule_limit.is_none());
    }
}
