//! Explicit work-day state machine.
//!
//! The API reports a day as four optional timestamps. Here the legal
//! combinations become variants and every clock action is a transition
//! between them, so impossible rows (a lunch end without a lunch start, a
//! clock-out without a clock-in) are refused as soon as they are read.

use super::record::AttendanceRecord;
use super::session_state::Phase;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use std::fmt;

type Ts = DateTime<Utc>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    ClockIn,
    LunchStart,
    LunchEnd,
    ClockOut,
}

impl ClockAction {
    pub const ALL: [ClockAction; 4] = [
        ClockAction::ClockIn,
        ClockAction::LunchStart,
        ClockAction::LunchEnd,
        ClockAction::ClockOut,
    ];

    /// API route of the action.
    pub fn path(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "/clock-in",
            ClockAction::LunchStart => "/lunch-start",
            ClockAction::LunchEnd => "/lunch-end",
            ClockAction::ClockOut => "/clock-out",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "clock-in",
            ClockAction::LunchStart => "lunch-start",
            ClockAction::LunchEnd => "lunch-end",
            ClockAction::ClockOut => "clock-out",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ClockAction::ClockIn => "Work day started!",
            ClockAction::LunchStart => "Lunch break registered!",
            ClockAction::LunchEnd => "Back from lunch registered!",
            ClockAction::ClockOut => "Work day finished!",
        }
    }
}

impl fmt::Display for ClockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkDay {
    NotStarted,
    Working {
        clock_in: Ts,
    },
    OnLunch {
        clock_in: Ts,
        lunch_start: Ts,
    },
    BackFromLunch {
        clock_in: Ts,
        lunch_start: Ts,
        lunch_end: Ts,
    },
    Finished {
        clock_in: Ts,
        lunch_start: Option<Ts>,
        lunch_end: Option<Ts>,
        clock_out: Ts,
    },
}

impl WorkDay {
    pub fn from_record(rec: &AttendanceRecord) -> AppResult<Self> {
        let invalid = |what: &str| -> AppResult<WorkDay> {
            Err(AppError::InvalidRecord(format!(
                "record '{}' has {}",
                rec.id, what
            )))
        };

        match (rec.clock_in, rec.lunch_start, rec.lunch_end, rec.clock_out) {
            (None, None, None, None) => Ok(WorkDay::NotStarted),
            (None, Some(_), _, _) => invalid("a lunch start without a clock-in"),
            (None, _, _, Some(_)) => invalid("a clock-out without a clock-in"),
            (_, None, Some(_), _) => invalid("a lunch end without a lunch start"),
            (Some(clock_in), lunch_start, lunch_end, Some(clock_out)) => Ok(WorkDay::Finished {
                clock_in,
                lunch_start,
                lunch_end,
                clock_out,
            }),
            (Some(clock_in), None, None, None) => Ok(WorkDay::Working { clock_in }),
            (Some(clock_in), Some(lunch_start), None, None) => Ok(WorkDay::OnLunch {
                clock_in,
                lunch_start,
            }),
            (Some(clock_in), Some(lunch_start), Some(lunch_end), None) => {
                Ok(WorkDay::BackFromLunch {
                    clock_in,
                    lunch_start,
                    lunch_end,
                })
            }
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            WorkDay::NotStarted => Phase::NotStarted,
            WorkDay::Working { .. } => Phase::Working,
            WorkDay::OnLunch { .. } => Phase::OnLunch,
            WorkDay::BackFromLunch { .. } => Phase::LunchDoneWorking,
            WorkDay::Finished { .. } => Phase::Finished,
        }
    }

    pub fn allows(&self, action: ClockAction) -> bool {
        self.apply(action, Utc::now()).is_ok()
    }

    pub fn next_actions(&self) -> Vec<ClockAction> {
        ClockAction::ALL
            .into_iter()
            .filter(|a| self.allows(*a))
            .collect()
    }

    /// Apply one clock action at instant `at`.
    pub fn apply(&self, action: ClockAction, at: Ts) -> AppResult<WorkDay> {
        use ClockAction::*;

        match (*self, action) {
            (WorkDay::NotStarted, ClockIn) => Ok(WorkDay::Working { clock_in: at }),
            (WorkDay::Working { clock_in }, LunchStart) => Ok(WorkDay::OnLunch {
                clock_in,
                lunch_start: at,
            }),
            (
                WorkDay::OnLunch {
                    clock_in,
                    lunch_start,
                },
                LunchEnd,
            ) => Ok(WorkDay::BackFromLunch {
                clock_in,
                lunch_start,
                lunch_end: at,
            }),
            (WorkDay::Working { clock_in }, ClockOut) => Ok(WorkDay::Finished {
                clock_in,
                lunch_start: None,
                lunch_end: None,
                clock_out: at,
            }),
            (
                WorkDay::BackFromLunch {
                    clock_in,
                    lunch_start,
                    lunch_end,
                },
                ClockOut,
            ) => Ok(WorkDay::Finished {
                clock_in,
                lunch_start: Some(lunch_start),
                lunch_end: Some(lunch_end),
                clock_out: at,
            }),
            (WorkDay::Finished { .. }, _) => Err(AppError::InvalidTransition(
                "You have already finished your work day today.".into(),
            )),
            (WorkDay::NotStarted, _) => Err(AppError::InvalidTransition(
                "Your work day has not started yet.".into(),
            )),
            (WorkDay::OnLunch { .. }, ClockOut) => Err(AppError::InvalidTransition(
                "End your lunch break before finishing the day.".into(),
            )),
            (state, action) => Err(AppError::InvalidTransition(format!(
                "Cannot register {} while {}.",
                action,
                state.phase()
            ))),
        }
    }
}
