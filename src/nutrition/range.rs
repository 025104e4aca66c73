use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, Time,
};

use super::dto::LogQuery;

const DATE_FMT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("startDate and endDate must be supplied together")]
    HalfOpenRange,
}

/// Inclusive UTC instant window scoping a log query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogWindow {
    pub from: OffsetDateTime,
    pub to: OffsetDateTime,
}

impl LogWindow {
    /// One calendar day, first instant to last instant, UTC.
    pub fn day(date: Date) -> Self {
        Self {
            from: PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc(),
            to: PrimitiveDateTime::new(date, Time::MAX).assume_utc(),
        }
    }

    /// Inclusive span of calendar days. An inverted span is allowed and
    /// simply matches nothing.
    pub fn span(start: Date, end: Date) -> Self {
        Self {
            from: PrimitiveDateTime::new(start, Time::MIDNIGHT).assume_utc(),
            to: PrimitiveDateTime::new(end, Time::MAX).assume_utc(),
        }
    }

    /// Resolves the raw query parameters into a window. `date` wins over a
    /// start/end pair; a lone start or end is rejected rather than silently
    /// falling back to today; no parameters means the day containing `now`.
    pub fn resolve(query: &LogQuery, now: OffsetDateTime) -> Result<Self, WindowError> {
        match (&query.date, &query.start_date, &query.end_date) {
            (Some(date), _, _) => Ok(Self::day(parse_date(date)?)),
            (None, Some(start), Some(end)) => Ok(Self::span(parse_date(start)?, parse_date(end)?)),
            (None, Some(_), None) | (None, None, Some(_)) => Err(WindowError::HalfOpenRange),
            (None, None, None) => Ok(Self::day(now.date())),
        }
    }
}

fn parse_date(s: &str) -> Result<Date, WindowError> {
    Date::parse(s, DATE_FMT).map_err(|_| WindowError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn query(date: Option<&str>, start: Option<&str>, end: Option<&str>) -> LogQuery {
        LogQuery {
            date: date.map(String::from),
            start_date: start.map(String::from),
            end_date: end.map(String::from),
        }
    }

    const NOW: OffsetDateTime = datetime!(2024-03-10 15:30:00 UTC);

    #[test]
    fn single_date_covers_the_whole_day() {
        let window = LogWindow::resolve(&query(Some("2024-03-08"), None, None), NOW).unwrap();
        assert_eq!(window.from, datetime!(2024-03-08 00:00:00 UTC));
        assert_eq!(window.to, datetime!(2024-03-08 23:59:59.999999999 UTC));
    }

    #[test]
    fn no_parameters_defaults_to_today() {
        let window = LogWindow::resolve(&query(None, None, None), NOW).unwrap();
        assert_eq!(window.from, datetime!(2024-03-10 00:00:00 UTC));
        assert_eq!(window.to, datetime!(2024-03-10 23:59:59.999999999 UTC));
    }

    #[test]
    fn start_and_end_span_inclusive_days() {
        let window =
            LogWindow::resolve(&query(None, Some("2024-03-01"), Some("2024-03-07")), NOW).unwrap();
        assert_eq!(window.from, datetime!(2024-03-01 00:00:00 UTC));
        assert_eq!(window.to, datetime!(2024-03-07 23:59:59.999999999 UTC));
    }

    #[test]
    fn date_takes_precedence_over_span() {
        let window = LogWindow::resolve(
            &query(Some("2024-03-08"), Some("2024-01-01"), Some("2024-12-31")),
            NOW,
        )
        .unwrap();
        assert_eq!(window.from, datetime!(2024-03-08 00:00:00 UTC));
    }

    #[test]
    fn lone_bound_is_rejected() {
        let err = LogWindow::resolve(&query(None, Some("2024-03-01"), None), NOW).unwrap_err();
        assert_eq!(err, WindowError::HalfOpenRange);
        let err = LogWindow::resolve(&query(None, None, Some("2024-03-07")), NOW).unwrap_err();
        assert_eq!(err, WindowError::HalfOpenRange);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let err = LogWindow::resolve(&query(Some("03/08/2024"), None, None), NOW).unwrap_err();
        assert_eq!(err, WindowError::InvalidDate("03/08/2024".into()));
        let err =
            LogWindow::resolve(&query(None, Some("2024-03-01"), Some("not-a-date")), NOW)
                .unwrap_err();
        assert_eq!(err, WindowError::InvalidDate("not-a-date".into()));
    }

    #[test]
    fn inverted_span_is_allowed() {
        let window =
            LogWindow::resolve(&query(None, Some("2024-03-07"), Some("2024-03-01")), NOW).unwrap();
        assert!(window.from > window.to);
    }
}
