use crate::core::calendar::{self, DateRange, Period};
use crate::core::context::AppContext;
use crate::errors::{AppError, AppResult};
use crate::models::report::TimeReport;
use chrono::NaiveDate;

/// Everything a report screen shows for one period window.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub period: Period,
    pub reference: NaiveDate,
    pub range: DateRange,
    pub label: String,
    pub can_go_next: bool,
    pub report: TimeReport,
}

pub struct ReportLogic;

impl ReportLogic {
    /// Resolve the reference date a report command should show.
    /// `next` is silently ignored when it would cross into the future.
    pub fn resolve_reference(
        period: Period,
        date: Option<NaiveDate>,
        next: bool,
        prev: bool,
        today: NaiveDate,
    ) -> NaiveDate {
        let base = date.unwrap_or(today);
        if next {
            calendar::next(period, base, today)
        } else if prev {
            calendar::prev(period, base)
        } else {
            base
        }
    }

    /// Query window for `reference`, refusing windows that start after today.
    pub fn window(period: Period, reference: NaiveDate, today: NaiveDate) -> AppResult<DateRange> {
        let range = calendar::range_for(period, reference);
        if range.start > today {
            return Err(AppError::FutureRange(range.start_str()));
        }
        Ok(range)
    }

    pub fn fetch(ctx: &AppContext, period: Period, reference: NaiveDate) -> AppResult<ReportView> {
        let session = ctx.session.require()?;
        let today = ctx.today()?;
        let range = Self::window(period, reference, today)?;

        let api = ctx.authed_api(&session);
        let report = ctx.guard(api.time_records(period, range))?;

        Ok(ReportView {
            period,
            reference,
            range,
            label: calendar::label(period, reference),
            can_go_next: calendar::can_go_next(period, reference, today),
            report,
        })
    }
}
