//! Time utilities: stopwatch display, record timestamps in the configured
//! zone, and `--date` parsing.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Shown for a timestamp the record does not have yet.
pub const NO_TIME: &str = "--:--";

/// `HH:MM:SS`; hours keep growing past 99.
pub fn format_seconds(total: u64) -> String {
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Wall-clock `HH:MM` of a record timestamp in `tz`.
pub fn format_clock(ts: Option<DateTime<Utc>>, tz: Tz) -> String {
    match ts {
        Some(t) => t.with_timezone(&tz).format("%H:%M").to_string(),
        None => NO_TIME.to_string(),
    }
}

/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// clap value parser for `--date`.
pub fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn seconds_are_split_into_clock_fields() {
        assert_eq!(format_seconds(0), "00:00:00");
        assert_eq!(format_seconds(3723), "01:02:03");
        assert_eq!(format_seconds(100 * 3600), "100:00:00");
    }

    #[test]
    fn timestamps_are_shown_in_local_zone() {
        let t = Utc.with_ymd_and_hms(2025, 4, 22, 12, 5, 0).unwrap();
        assert_eq!(format_clock(Some(t), chrono_tz::America::Sao_Paulo), "09:05");
        assert_eq!(format_clock(None, chrono_tz::UTC), NO_TIME);
    }

    #[test]
    fn both_date_styles_parse() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 22).unwrap();
        assert_eq!(parse_date("2025-04-22").unwrap(), d);
        assert_eq!(parse_date("22/04/2025").unwrap(), d);
        assert!(parse_date("2025-13-01").is_err());
    }
}
