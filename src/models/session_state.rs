use serde::Serialize;
use std::fmt;

/// Where the employee is in the work-day workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    NotStarted,
    Working,
    OnLunch,
    LunchDoneWorking,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not started",
            Phase::Working => "working",
            Phase::OnLunch => "on lunch",
            Phase::LunchDoneWorking => "back from lunch",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived stopwatch state for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub elapsed_seconds: u64,
    pub timer_running: bool,
    pub phase: Phase,
}

impl SessionState {
    pub fn idle(phase: Phase) -> Self {
        Self {
            elapsed_seconds: 0,
            timer_running: false,
            phase,
        }
    }
}
