use super::session_state::Phase;
use super::workday::WorkDay;
use crate::errors::AppResult;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status the server uses for days off; those rows are hidden in reports.
pub const DAY_OFF_STATUS: &str = "Folga";

/// One employee work day as returned by the time-records API.
/// The client only holds a read-only (possibly stale) copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub clock_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lunch_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lunch_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub worked_hours: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl AttendanceRecord {
    /// Phase from the presence of the four timestamps.
    /// A clock-out wins over everything else.
    pub fn phase(&self) -> Phase {
        if self.clock_out.is_some() {
            return Phase::Finished;
        }
        if self.clock_in.is_none() {
            return Phase::NotStarted;
        }
        match (self.lunch_start, self.lunch_end) {
            (Some(_), None) => Phase::OnLunch,
            (Some(_), Some(_)) => Phase::LunchDoneWorking,
            _ => Phase::Working,
        }
    }

    pub fn is_day_off(&self) -> bool {
        self.status.as_deref() == Some(DAY_OFF_STATUS)
    }

    /// No timestamp at all (placeholder rows in period reports).
    pub fn is_empty(&self) -> bool {
        self.clock_in.is_none()
            && self.lunch_start.is_none()
            && self.lunch_end.is_none()
            && self.clock_out.is_none()
    }

    /// Calendar day of the record; accepts `YYYY-MM-DD` or a full ISO date-time.
    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    /// Turn the raw server data into the explicit work-day state machine,
    /// rejecting impossible timestamp combinations.
    pub fn validate(&self) -> AppResult<WorkDay> {
        WorkDay::from_record(self)
    }
}
