//! Blocking HTTP client for the time-tracking API.
//!
//! One agent with a fixed global timeout, bearer token injected on every
//! call except login, no retries. Status codes are turned into `AppError`s
//! here so the commands only ever see domain errors.

use super::types::{
    ClockRequest, ClockResponse, ErrorBody, LogEvent, LoginRequest, LoginResponse,
};
use crate::config::Config;
use crate::core::calendar::{DateRange, Period, range_for};
use crate::errors::{AppError, AppResult};
use crate::models::location::Coordinates;
use crate::models::record::AttendanceRecord;
use crate::models::report::TimeReport;
use crate::models::user::Session;
use crate::models::workday::ClockAction;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("rtimeclock/", env!("CARGO_PKG_VERSION"));

/// Status and body of a finished exchange.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_str(&self.body).map_err(|e| AppError::BadResponse(e.to_string()))
    }

    fn server_message(&self, fallback: &str) -> String {
        ErrorBody::parse(&self.body).unwrap_or_else(|| fallback.to_string())
    }
}

pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.api_base_url, cfg.timeout())
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    pub fn post<B: Serialize>(&self, path: &str, body: &B) -> AppResult<RawResponse> {
        let mut req = self
            .agent
            .post(self.url(path))
            .header("User-Agent", USER_AGENT);
        if let Some(auth) = self.auth_header() {
            req = req.header("Authorization", auth);
        }
        let resp = req.send_json(body).map_err(transport_error)?;
        read_response(resp)
    }

    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> AppResult<RawResponse> {
        let mut req = self
            .agent
            .get(self.url(path))
            .header("User-Agent", USER_AGENT);
        for (k, v) in query {
            req = req.query(*k, *v);
        }
        if let Some(auth) = self.auth_header() {
            req = req.header("Authorization", auth);
        }
        let resp = req.call().map_err(transport_error)?;
        read_response(resp)
    }

    // ---------------------------
    // Authentication
    // ---------------------------

    /// Exchange CPF and password for a session. Only employees are accepted.
    pub fn login(&self, cpf: &str, password: &str) -> AppResult<Session> {
        let resp = self.post("/login", &LoginRequest { cpf, password })?;

        match resp.status {
            _ if resp.is_success() => {}
            401 => {
                return Err(AppError::InvalidCredentials(
                    "Invalid password. Try again.".into(),
                ));
            }
            403 => {
                return Err(AppError::Forbidden(
                    "Employee deactivated. Contact your administrator.".into(),
                ));
            }
            404 => {
                return Err(AppError::InvalidCredentials(
                    "Employee not found. Check your CPF.".into(),
                ));
            }
            status => {
                return Err(AppError::Api {
                    status,
                    message: resp.server_message("Login failed."),
                });
            }
        }

        let body: LoginResponse = resp.json()?;
        let (Some(token), Some(user)) = (body.token, body.user) else {
            return Err(AppError::InvalidCredentials("Invalid credentials.".into()));
        };
        if !user.is_employee() {
            return Err(AppError::Forbidden(
                "This app is for employees only.".into(),
            ));
        }
        Ok(Session { token, user })
    }

    // ---------------------------
    // Clock actions
    // ---------------------------

    fn clock(&self, action: ClockAction, body: &ClockRequest<'_>) -> AppResult<RawResponse> {
        let resp = self.post(action.path(), body)?;
        check_status(&resp, &format!("Could not register {}.", action))?;
        Ok(resp)
    }

    /// Open today's record; returns its id.
    pub fn clock_in(&self, employee_id: &str, coords: Option<Coordinates>) -> AppResult<String> {
        let resp = self.clock(
            ClockAction::ClockIn,
            &ClockRequest::for_employee(employee_id, coords),
        )?;
        let body: ClockResponse = resp.json()?;
        body.id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadResponse("clock-in answer has no record id".into()))
    }

    pub fn lunch_start(&self, record_id: &str, coords: Option<Coordinates>) -> AppResult<()> {
        self.clock(
            ClockAction::LunchStart,
            &ClockRequest::for_record(record_id, coords),
        )
        .map(|_| ())
    }

    pub fn lunch_end(&self, record_id: &str, coords: Option<Coordinates>) -> AppResult<()> {
        self.clock(
            ClockAction::LunchEnd,
            &ClockRequest::for_record(record_id, coords),
        )
        .map(|_| ())
    }

    pub fn clock_out(&self, record_id: &str, coords: Option<Coordinates>) -> AppResult<()> {
        self.clock(
            ClockAction::ClockOut,
            &ClockRequest::for_record(record_id, coords),
        )
        .map(|_| ())
    }

    // ---------------------------
    // Reports
    // ---------------------------

    /// Records for a range. A 404 means "nothing recorded yet".
    pub fn time_records(&self, period: Period, range: DateRange) -> AppResult<TimeReport> {
        let start = range.start_str();
        let end = range.end_str();
        let resp = self.get(
            "/time-records",
            &[
                ("period", period.as_str()),
                ("startDate", &start),
                ("endDate", &end),
            ],
        )?;

        if resp.status == 404 {
            return Ok(TimeReport::default());
        }
        check_status(&resp, "Could not load records.")?;
        if resp.body.trim().is_empty() {
            return Ok(TimeReport::default());
        }
        resp.json()
    }

    /// The record of `today`, if the employee has one.
    pub fn today_record(&self, today: NaiveDate) -> AppResult<Option<AttendanceRecord>> {
        let report = self.time_records(Period::Day, range_for(Period::Day, today))?;
        Ok(report.records().into_iter().next())
    }

    // ---------------------------
    // Telemetry
    // ---------------------------

    pub fn log_event(&self, event: &LogEvent) -> AppResult<()> {
        let resp = self.post("/log-event", event)?;
        check_status(&resp, "Could not send log event.")
    }
}

/// Map a non-2xx answer to the error taxonomy.
pub fn check_status(resp: &RawResponse, fallback: &str) -> AppResult<()> {
    match resp.status {
        _ if resp.is_success() => Ok(()),
        401 => Err(AppError::Unauthorized(resp.server_message("invalid or expired token"))),
        status => Err(AppError::Api {
            status,
            message: resp.server_message(fallback),
        }),
    }
}

fn read_response(mut resp: ureq::http::Response<ureq::Body>) -> AppResult<RawResponse> {
    let status = resp.status().as_u16();
    let body = resp
        .body_mut()
        .read_to_string()
        .map_err(transport_error)?;
    Ok(RawResponse { status, body })
}

fn transport_error(e: ureq::Error) -> AppError {
    match e {
        ureq::Error::Timeout(_) => AppError::Transport("the server did not answer in time".into()),
        other => AppError::Transport(other.to_string()),
    }
}
