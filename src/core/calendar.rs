//! Calendar period windows for the report screens and next/prev navigation.
//!
//! All dates are `NaiveDate`s already expressed in the configured timezone;
//! `today_in` is the only place that looks at the wall clock.

use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Value of the `period` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start_str(), self.end_str())
    }
}

/// Today in the given zone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Query window containing `reference`.
/// Weeks run Sunday to Saturday.
pub fn range_for(period: Period, reference: NaiveDate) -> DateRange {
    match period {
        Period::Day => DateRange {
            start: reference,
            end: reference,
        },
        Period::Week => {
            let back = reference.weekday().num_days_from_sunday() as u64;
            let start = reference - Days::new(back);
            DateRange {
                start,
                end: start + Days::new(6),
            }
        }
        Period::Month => {
            let start = reference.with_day(1).unwrap_or(reference);
            let end = start
                .checked_add_months(Months::new(1))
                .and_then(|d| d.pred_opt())
                .unwrap_or(reference);
            DateRange { start, end }
        }
        Period::Year => {
            let start = NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference);
            let end = NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap_or(reference);
            DateRange { start, end }
        }
    }
}

fn step_forward(period: Period, d: NaiveDate) -> Option<NaiveDate> {
    match period {
        Period::Day => d.checked_add_days(Days::new(1)),
        Period::Week => d.checked_add_days(Days::new(7)),
        Period::Month => d.checked_add_months(Months::new(1)),
        Period::Year => d.checked_add_months(Months::new(12)),
    }
}

fn step_back(period: Period, d: NaiveDate) -> Option<NaiveDate> {
    match period {
        Period::Day => d.checked_sub_days(Days::new(1)),
        Period::Week => d.checked_sub_days(Days::new(7)),
        Period::Month => d.checked_sub_months(Months::new(1)),
        Period::Year => d.checked_sub_months(Months::new(12)),
    }
}

/// Whether moving forward stays out of the future.
pub fn can_go_next(period: Period, reference: NaiveDate, today: NaiveDate) -> bool {
    step_forward(period, reference)
        .map(|next| range_for(period, next).start <= today)
        .unwrap_or(false)
}

/// One unit forward; returns `reference` unchanged when the next period
/// would start after `today`.
pub fn next(period: Period, reference: NaiveDate, today: NaiveDate) -> NaiveDate {
    match step_forward(period, reference) {
        Some(next) if range_for(period, next).start <= today => next,
        _ => reference,
    }
}

/// One unit back. There is no lower bound.
pub fn prev(period: Period, reference: NaiveDate) -> NaiveDate {
    step_back(period, reference).unwrap_or(reference)
}

/// Header text of the report screen.
pub fn label(period: Period, reference: NaiveDate) -> String {
    let range = range_for(period, reference);
    match period {
        Period::Day => reference.format("%d/%m/%Y").to_string(),
        Period::Week => format!(
            "{} - {}",
            range.start.format("%d/%m/%Y"),
            range.end.format("%d/%m/%Y")
        ),
        Period::Month => reference.format("%B %Y").to_string(),
        Period::Year => reference.format("%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_range_is_single_day() {
        let r = range_for(Period::Day, d(2025, 4, 22));
        assert_eq!(r.start, r.end);
        assert_eq!(r.start_str(), "2025-04-22");
    }

    #[test]
    fn week_is_sunday_to_saturday() {
        // every Wednesday of 2025
        let mut wed = d(2025, 1, 1);
        assert_eq!(wed.weekday(), Weekday::Wed);
        while wed.year() == 2025 {
            let r = range_for(Period::Week, wed);
            assert_eq!(r.start.weekday(), Weekday::Sun);
            assert_eq!(r.end.weekday(), Weekday::Sat);
            assert_eq!((r.end - r.start).num_days(), 6);
            assert!(r.contains(wed));
            wed = wed + Days::new(7);
        }
    }

    #[test]
    fn week_of_a_sunday_starts_that_day() {
        let r = range_for(Period::Week, d(2025, 4, 20));
        assert_eq!(r.start, d(2025, 4, 20));
        assert_eq!(r.end, d(2025, 4, 26));
    }

    #[test]
    fn month_range_handles_lengths() {
        assert_eq!(
            range_for(Period::Month, d(2024, 2, 14)),
            DateRange {
                start: d(2024, 2, 1),
                end: d(2024, 2, 29)
            }
        );
        assert_eq!(range_for(Period::Month, d(2025, 12, 31)).end, d(2025, 12, 31));
    }

    #[test]
    fn year_range() {
        let r = range_for(Period::Year, d(2025, 6, 1));
        assert_eq!((r.start, r.end), (d(2025, 1, 1), d(2025, 12, 31)));
    }

    #[test]
    fn next_month_from_today_is_refused() {
        let today = d(2025, 4, 22);
        assert_eq!(next(Period::Month, today, today), today);
        assert!(!can_go_next(Period::Month, today, today));
    }

    #[test]
    fn next_is_allowed_up_to_today() {
        let today = d(2025, 4, 22);
        assert_eq!(next(Period::Day, d(2025, 4, 21), today), today);
        assert_eq!(next(Period::Day, today, today), today);
        // next week starts 2025-04-27, after today
        assert_eq!(next(Period::Week, d(2025, 4, 20), today), d(2025, 4, 20));
        assert_eq!(next(Period::Week, d(2025, 4, 13), today), d(2025, 4, 20));
        assert_eq!(next(Period::Month, d(2025, 3, 10), today), d(2025, 4, 10));
        assert_eq!(next(Period::Year, d(2025, 1, 1), today), d(2025, 1, 1));
    }

    #[test]
    fn month_step_clamps_day() {
        let today = d(2025, 12, 31);
        assert_eq!(next(Period::Month, d(2025, 1, 31), today), d(2025, 2, 28));
        assert_eq!(prev(Period::Month, d(2025, 3, 31)), d(2025, 2, 28));
    }

    #[test]
    fn prev_has_no_lower_bound() {
        let mut r = d(2025, 1, 1);
        for _ in 0..100 {
            r = prev(Period::Year, r);
        }
        assert_eq!(r, d(1925, 1, 1));
        assert_eq!(prev(Period::Week, d(2025, 4, 22)), d(2025, 4, 15));
    }

    #[test]
    fn labels() {
        assert_eq!(label(Period::Day, d(2025, 4, 22)), "22/04/2025");
        assert_eq!(
            label(Period::Week, d(2025, 4, 23)),
            "20/04/2025 - 26/04/2025"
        );
        assert_eq!(label(Period::Month, d(2025, 4, 23)), "April 2025");
        assert_eq!(label(Period::Year, d(2025, 4, 23)), "2025");
    }

    #[test]
    fn sao_paulo_today_is_a_valid_date() {
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let today = today_in(tz);
        let utc_today = Utc::now().date_naive();
        // UTC-3: same day or the day before
        assert!(today == utc_today || today.succ_opt() == Some(utc_today));
    }
}
