use crate::cli::parser::Commands;
use crate::core::clock::{ClockLogic, DayStatus};
use crate::core::context::AppContext;
use crate::core::timer::Stopwatch;
use crate::errors::AppResult;
use crate::models::session_state::SessionState;
use crate::models::workday::ClockAction;
use crate::ui::messages::{hint, info};
use crate::utils::colors::{colorize_balance, colorize_optional};
use crate::utils::time::{format_clock, format_seconds};
use chrono::Utc;
use chrono_tz::Tz;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

fn timer_line(state: &SessionState) -> String {
    let marker = if state.timer_running { "▶" } else { "⏸" };
    format!(
        "⏱  {} {}  [{}]",
        marker,
        format_seconds(state.elapsed_seconds),
        state.phase
    )
}

fn print_day(status: &DayStatus, tz: Tz) {
    println!("👤 Hello, {}!", status.session.user.first_name());

    match &status.record {
        None => info("No record for today yet."),
        Some(rec) => {
            println!(
                "   In {}   Lunch {} - {}   Out {}",
                colorize_optional(&format_clock(rec.clock_in, tz)),
                colorize_optional(&format_clock(rec.lunch_start, tz)),
                colorize_optional(&format_clock(rec.lunch_end, tz)),
                colorize_optional(&format_clock(rec.clock_out, tz)),
            );
            if let Some(worked) = rec.worked_hours.as_deref() {
                let balance = rec.balance.as_deref().unwrap_or("00:00");
                println!(
                    "   Worked {}   Balance {}",
                    colorize_optional(worked),
                    colorize_balance(balance)
                );
            }
        }
    }

    println!("{}", timer_line(&status.state));

    let next: Vec<&str> = status
        .day
        .next_actions()
        .into_iter()
        .map(command_name)
        .collect();
    if next.is_empty() {
        hint("Work day finished.");
    } else {
        hint(format!("Next: rtimeclock {}", next.join(" | ")));
    }
}

fn command_name(action: ClockAction) -> &'static str {
    match action {
        ClockAction::ClockIn => "in",
        ClockAction::LunchStart => "lunch-start",
        ClockAction::LunchEnd => "lunch-end",
        ClockAction::ClockOut => "out",
    }
}

/// Redraw the counter every second, refetching the record every `refresh`
/// seconds. Returns once the timer stops.
fn watch(ctx: &AppContext, status: DayStatus, refresh: u64) -> AppResult<()> {
    let refresh = Duration::from_secs(refresh);
    let mut stopwatch = Stopwatch::new(status.record.unwrap_or_default(), Utc::now());
    let mut last_fetch = Instant::now();
    let mut out = std::io::stdout();

    while stopwatch.is_running() {
        thread::sleep(Duration::from_secs(1));

        if last_fetch.elapsed() >= refresh {
            let fresh = ClockLogic::status(ctx, Utc::now())?;
            stopwatch.reload(fresh.record.unwrap_or_default(), Utc::now());
            last_fetch = Instant::now();
        }

        let state = stopwatch.tick(Utc::now());
        write!(out, "\r{}   ", timer_line(&state))?;
        out.flush()?;
    }
    println!();
    Ok(())
}

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Status { watch: keep, refresh } = cmd {
        let status = ClockLogic::status(ctx, Utc::now())?;
        print_day(&status, ctx.cfg.tz()?);

        if *keep {
            if status.state.timer_running {
                watch(ctx, status, *refresh)?;
            } else {
                hint("Timer is not running.");
            }
        }
    }
    Ok(())
}
