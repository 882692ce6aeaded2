//! Transfusion requests

use chrono::{DateTime, Utc};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::dates::timestamp;
use crate::error::Result;
use crate::record::{FieldCheck, Record};

/// Clinical urgency of a request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Lifecycle of a request. Any status may be set to any other.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Display, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Pending,
    Fulfilled,
    Cancelled,
}

/// A request for blood on behalf of a patient
#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option, into)]
pub struct BloodRequest {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub patient_name: String,
    pub blood_type: String,
    pub units_needed: u32,
    pub priority: Priority,
    pub hospital: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(with = "timestamp")]
    pub request_date: DateTime<Utc>,
}

impl Record for BloodRequest {
    const COLLECTION: &'static str = "requests";
    const ORDER_FIELD: &'static str = "requestDate";
    const NAME: &'static str = "Request";

    fn document_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_id(self, id: String) -> Self {
        Self { id: Some(id), ..self }
    }

    fn ordered_at(&self) -> DateTime<Utc> {
        self.request_date
    }
}

impl BloodRequest {
    /// Check the text fields of a complete record
    pub fn validate(&self) -> Result<()> {
        let mut check = FieldCheck::new(Self::NAME);
        check.not_blank("patientName", &self.patient_name);
        check.not_blank("bloodType", &self.blood_type);
        check.not_blank("hospital", &self.hospital);
        check.finish()
    }
}

/// Body of a request creation call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBloodRequest {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub units_needed: Option<u32>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

impl NewBloodRequest {
    /// Check required fields and build the request to persist. The status
    /// is `Pending` unless the caller supplied one.
    pub fn into_request(self, request_date: DateTime<Utc>) -> Result<BloodRequest> {
        let mut check = FieldCheck::new(BloodRequest::NAME);
        let patient_name = check.text("patientName", self.patient_name);
        let blood_type = check.text("bloodType", self.blood_type);
        let units_needed = check.present("unitsNeeded", self.units_needed);
        let priority = check.present("priority", self.priority);
        let hospital = check.text("hospital", self.hospital);

        let (Some(patient_name), Some(blood_type), Some(units_needed), Some(priority), Some(hospital)) =
            (patient_name, blood_type, units_needed, priority, hospital)
        else {
            return Err(check.into_error());
        };

        Ok(BloodRequest {
            id: None,
            patient_name,
            blood_type,
            units_needed,
            priority,
            hospital,
            status: self.status.unwrap_or_default(),
            request_date,
        })
    }
}

/// Partial update of a request. Omitted (or null) fields keep their current
/// value; identity and request date cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPatch {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub units_needed: Option<u32>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

impl RequestPatch {
    /// Merge the patch onto `current` and validate the result
    pub fn apply(self, current: BloodRequest) -> Result<BloodRequest> {
        let merged = BloodRequest {
            patient_name: self.patient_name.unwrap_or(current.patient_name),
            blood_type: self.blood_type.unwrap_or(current.blood_type),
            units_needed: self.units_needed.unwrap_or(current.units_needed),
            priority: self.priority.unwrap_or(current.priority),
            hospital: self.hospital.unwrap_or(current.hospital),
            status: self.status.unwrap_or(current.status),
            ..current
        };
        merged.validate()?;
        Ok(merged)
    }
}
