//! Best-effort telemetry: every action outcome goes to the internal log
//! table and, when enabled, to the server's `/log-event` route.
//! Nothing here can fail the caller.

use crate::api::ApiClient;
use crate::api::types::LogEvent;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::models::user::UserProfile;

pub struct Telemetry<'a> {
    pool: &'a DbPool,
    api: Option<&'a ApiClient>,
    device: &'a str,
}

/// Outcome of the action being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "error",
        }
    }
}

impl<'a> Telemetry<'a> {
    pub fn new(pool: &'a DbPool, api: Option<&'a ApiClient>, device: &'a str) -> Self {
        Self { pool, api, device }
    }

    pub fn build_event(
        &self,
        user: Option<&UserProfile>,
        route: &str,
        method: &str,
        action: &str,
        outcome: Outcome,
        message: &str,
    ) -> LogEvent {
        LogEvent {
            user_id: user.map(|u| u.id.clone()),
            user_name: user.map(|u| u.name.clone()),
            company_id: user.and_then(|u| u.company_id.clone()),
            company_name: user.and_then(|u| u.company_name.clone()),
            route: route.to_string(),
            method: method.to_string(),
            action: action.to_string(),
            status: outcome.as_str().to_string(),
            message: message.to_string(),
            device: self.device.to_string(),
        }
    }

    pub fn emit(
        &self,
        user: Option<&UserProfile>,
        route: &str,
        method: &str,
        action: &str,
        outcome: Outcome,
        message: &str,
    ) {
        let target = user.map(|u| u.id.as_str()).unwrap_or("");
        if let Err(e) = ttlog(&self.pool.conn, action, target, message) {
            log::warn!("failed to write internal log: {}", e);
        }

        if let Some(api) = self.api {
            let event = self.build_event(user, route, method, action, outcome, message);
            if let Err(e) = api.log_event(&event) {
                log::warn!("telemetry for '{}' not delivered: {}", action, e);
            }
        }
    }
}
