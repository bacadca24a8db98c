//! Elapsed worked time for the current day, rebuilt from the record timestamps.
//!
//! Every screen that shows the running stopwatch goes through `reconstruct`;
//! nothing else computes worked seconds on the client.

use crate::models::record::AttendanceRecord;
use crate::models::session_state::{Phase, SessionState};
use chrono::{DateTime, Duration, Utc};

/// Worked seconds and stopwatch state of `record` as of `now`.
pub fn reconstruct(record: &AttendanceRecord, now: DateTime<Utc>) -> SessionState {
    let phase = record.phase();

    match (phase, record.clock_in) {
        (Phase::Working, Some(clock_in)) => SessionState {
            elapsed_seconds: whole_seconds(now - clock_in, record),
            timer_running: true,
            phase,
        },
        (Phase::OnLunch, Some(clock_in)) => {
            let lunch_start = record.lunch_start.unwrap_or(clock_in);
            SessionState {
                elapsed_seconds: whole_seconds(lunch_start - clock_in, record),
                timer_running: false,
                phase,
            }
        }
        (Phase::LunchDoneWorking, Some(clock_in)) => {
            let lunch = match (record.lunch_start, record.lunch_end) {
                (Some(start), Some(end)) => end - start,
                _ => Duration::zero(),
            };
            SessionState {
                elapsed_seconds: whole_seconds((now - clock_in) - lunch, record),
                timer_running: true,
                phase,
            }
        }
        // closed day: the final duration is not re-displayed
        (Phase::Finished, _) => SessionState::idle(Phase::Finished),
        _ => SessionState::idle(Phase::NotStarted),
    }
}

/// Floor to whole seconds; negative spans (clock skew, out-of-order
/// timestamps) become zero.
fn whole_seconds(span: Duration, record: &AttendanceRecord) -> u64 {
    let secs = span.num_milliseconds().div_euclid(1000);
    if secs < 0 {
        log::warn!(
            "negative worked time ({}s) for record '{}', showing 00:00:00",
            secs,
            record.id
        );
        return 0;
    }
    secs as u64
}

/// One-second display model for the running counter.
///
/// Holds the last fetched record and recomputes on each tick, so the shown
/// value never drifts from the timestamps.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    record: AttendanceRecord,
    state: SessionState,
}

impl Stopwatch {
    pub fn new(record: AttendanceRecord, now: DateTime<Utc>) -> Self {
        let state = reconstruct(&record, now);
        Self { record, state }
    }

    /// Swap in a refetched record.
    pub fn reload(&mut self, record: AttendanceRecord, now: DateTime<Utc>) {
        self.state = reconstruct(&record, now);
        self.record = record;
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> SessionState {
        if self.state.timer_running {
            self.state = reconstruct(&self.record, now);
        }
        self.state
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.timer_running
    }
}
