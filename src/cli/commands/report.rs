use crate::cli::parser::Commands;
use crate::core::calendar::Period;
use crate::core::context::AppContext;
use crate::core::report::{ReportLogic, ReportView};
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;
use crate::models::report::or_empty;
use crate::ui::messages::{header, hint, info};
use crate::utils::colors::{colorize_balance, colorize_optional};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_clock;
use chrono::{Month, NaiveDate};
use chrono_tz::Tz;

fn record_date(rec: &AttendanceRecord, tz: Tz) -> String {
    rec.day()
        .or_else(|| rec.clock_in.map(|t| t.with_timezone(&tz).date_naive()))
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn records_table(records: &[AttendanceRecord], tz: Tz) -> Table {
    let mut table = Table::new(vec![
        Column::left("Date"),
        Column::left("In"),
        Column::left("Lunch"),
        Column::left("Back"),
        Column::left("Out"),
        Column::right("Worked"),
        Column::right("Balance"),
    ]);
    for rec in records {
        table.add_row(vec![
            record_date(rec, tz),
            colorize_optional(&format_clock(rec.clock_in, tz)),
            colorize_optional(&format_clock(rec.lunch_start, tz)),
            colorize_optional(&format_clock(rec.lunch_end, tz)),
            colorize_optional(&format_clock(rec.clock_out, tz)),
            colorize_optional(or_empty(&rec.worked_hours)),
            colorize_balance(or_empty(&rec.balance)),
        ]);
    }
    table
}

/// Year reports are grouped by month.
fn months_table(view: &ReportView) -> Table {
    let mut table = Table::new(vec![
        Column::left("Month"),
        Column::right("Days"),
        Column::right("Worked"),
        Column::right("Balance"),
    ]);
    for group in &view.report.results {
        let month = group
            .month()
            .and_then(|m| Month::try_from(u8::try_from(m).ok()?).ok())
            .map(|m| m.name().to_string())
            .unwrap_or_else(|| "?".to_string());
        let days = group
            .records
            .iter()
            .filter(|r| !r.is_day_off() && !r.is_empty())
            .count();
        table.add_row(vec![
            month,
            days.to_string(),
            colorize_optional(or_empty(&group.total_worked_hours)),
            colorize_balance(or_empty(&group.final_balance)),
        ]);
    }
    table
}

fn print_view(view: &ReportView, tz: Tz) {
    header(format!("{} ({})", view.label, view.period));

    let records = view.report.worked_records();
    if records.is_empty() {
        info("No records for this period.");
    } else if view.period == Period::Year && !view.report.results.is_empty() {
        print!("{}", months_table(view).render());
    } else {
        print!("{}", records_table(&records, tz).render());
    }

    println!();
    println!(
        "Positive {}   Negative {}   Balance {}",
        colorize_optional(view.report.positive_hours()),
        colorize_optional(view.report.negative_hours()),
        colorize_balance(view.report.balance())
    );
    if !view.can_go_next {
        hint("This is the current period.");
    }
}

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Report {
        period,
        date,
        next,
        prev,
    } = cmd
    {
        let today: NaiveDate = ctx.today()?;
        let reference = ReportLogic::resolve_reference(*period, *date, *next, *prev, today);
        let view = ReportLogic::fetch(ctx, *period, reference)?;
        print_view(&view, ctx.cfg.tz()?);
    }
    Ok(())
}
