use super::record::AttendanceRecord;
use serde::{Deserialize, Serialize};

/// Placeholder shown when the server omits an hour total.
pub const EMPTY_HOURS: &str = "00:00";

/// Body of `GET /time-records`.
///
/// Day/week/month queries answer with `records` and period totals; year
/// queries (and some older server builds) group rows under `results`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeReport {
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub results: Vec<PeriodResult>,
    #[serde(default)]
    pub total_positive_hours: Option<String>,
    #[serde(default)]
    pub total_negative_hours: Option<String>,
    #[serde(default)]
    pub final_balance: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodResult {
    #[serde(rename = "_id", default)]
    pub key: Option<serde_json::Value>,
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub total_worked_hours: Option<String>,
    #[serde(default)]
    pub final_balance: Option<String>,
    #[serde(default)]
    pub total_positive_hours: Option<String>,
    #[serde(default)]
    pub total_negative_hours: Option<String>,
}

impl PeriodResult {
    /// Month number (1-12) of a year-report group, if the key carries one.
    pub fn month(&self) -> Option<u32> {
        let m = self.key.as_ref()?.get("month")?.as_u64()?;
        u32::try_from(m).ok().filter(|m| (1..=12).contains(m))
    }
}

impl TimeReport {
    /// Flat list of records, whichever shape the server used.
    pub fn records(&self) -> Vec<AttendanceRecord> {
        if !self.records.is_empty() {
            return self.records.clone();
        }
        self.results
            .iter()
            .flat_map(|r| r.records.iter().cloned())
            .collect()
    }

    /// Records worth listing: days off and empty placeholders are dropped.
    pub fn worked_records(&self) -> Vec<AttendanceRecord> {
        self.records()
            .into_iter()
            .filter(|r| !r.is_day_off() && !r.is_empty())
            .collect()
    }

    pub fn positive_hours(&self) -> &str {
        or_empty(&self.total_positive_hours)
    }

    pub fn negative_hours(&self) -> &str {
        or_empty(&self.total_negative_hours)
    }

    pub fn balance(&self) -> &str {
        or_empty(&self.final_balance)
    }
}

pub fn or_empty(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => EMPTY_HOURS,
    }
}
