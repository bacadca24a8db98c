//! Request and response bodies of the time-tracking API.

use crate::models::location::Coordinates;
use crate::models::user::UserProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub cpf: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Body of every clock action. Clock-in identifies the employee, the other
/// actions the open record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl<'a> ClockRequest<'a> {
    pub fn for_employee(employee_id: &'a str, coords: Option<Coordinates>) -> Self {
        Self {
            employee_id: Some(employee_id),
            record_id: None,
            latitude: coords.map(|c| c.latitude),
            longitude: coords.map(|c| c.longitude),
        }
    }

    pub fn for_record(record_id: &'a str, coords: Option<Coordinates>) -> Self {
        Self {
            employee_id: None,
            record_id: Some(record_id),
            latitude: coords.map(|c| c.latitude),
            longitude: coords.map(|c| c.longitude),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClockResponse {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
}

/// Error body the server sends with non-2xx answers.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Option<String> {
        let eb: ErrorBody = serde_json::from_str(body).ok()?;
        eb.error
            .or(eb.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Best-effort client telemetry sent to `/log-event`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub company_id: Option<String>,
    pub company_name: Option<String>,
    pub route: String,
    pub method: String,
    pub action: String,
    pub status: String,
    pub message: String,
    pub device: String,
}
