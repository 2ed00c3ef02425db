use serde::Deserialize;
use serde_json::Value;

/// `{action, payload}` envelope posted by the automation tool. Fields the
/// payload omits deserialize to empty strings so the facade's required-input
/// checks decide what is actually mandatory.

#[derive(Debug, Deserialize)]
pub struct CheckPatientParams {
    #[serde(default)]
    pub nin: String,
    #[serde(default)]
    pub birthday: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSlotsParams {
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub address_id: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotParams {
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
pub struct CancelBookingParams {
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub address_id: String,
    #[serde(default)]
    pub booking_id: String,
    pub external_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDoctorParams {
    #[serde(default)]
    pub doctor_id: String,
}
