//! Relative and absolute time expressions.
//!
//! Date-like filters accept either a count followed by a unit, counted back
//! from the current local time, or an absolute calendar date:
//!
//! | Form         | Meaning                   |
//! |--------------|---------------------------|
//! | `3d`         | three days ago            |
//! | `2w`         | two weeks ago             |
//! | `1mo`        | one calendar month ago    |
//! | `1y`         | one calendar year ago     |
//! | `2026-01-15` | that date, midnight UTC   |
//!
//! Month and year arithmetic is calendar aware. When the target month is
//! shorter than the starting day, the result clamps to the last day of that
//! month, so `1mo` from March 31st lands on the last day of February.
//!
//! # Example
//!
//! ```
//! use feedfactory_api::time_expr;
//!
//! let point = time_expr::parse("2026-01-15").unwrap();
//! assert_eq!(point.to_date_string(), "2026-01-15");
//! assert_eq!(point.to_timestamp(), "2026-01-15T00:00:00Z");
//!
//! assert!(time_expr::parse("3x").is_err());
//! ```

use std::fmt;

use chrono::{DateTime, Days, FixedOffset, Local, Months, NaiveDate, SecondsFormat};

use crate::query::{QueryError, QueryResult};

/// Unit of a relative time expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// `d`
    Day,
    /// `w`
    Week,
    /// `mo`
    Month,
    /// `y`
    Year,
}

impl TimeUnit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "d" => Some(TimeUnit::Day),
            "w" => Some(TimeUnit::Week),
            "mo" => Some(TimeUnit::Month),
            "y" => Some(TimeUnit::Year),
            _ => None,
        }
    }
}

/// A parsed, not yet evaluated, time expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeExpression {
    /// `amount` units before the evaluation time.
    Relative { amount: u32, unit: TimeUnit },
    /// A fixed calendar date.
    Absolute(NaiveDate),
}

impl TimeExpression {
    /// Parses `<digits><d|w|mo|y>` or `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidTimeExpression`] if the input matches
    /// neither form.
    pub fn parse(input: &str) -> QueryResult<Self> {
        if let Some(relative) = parse_relative(input) {
            return Ok(relative);
        }

        parse_absolute(input)
            .map(TimeExpression::Absolute)
            .ok_or_else(|| QueryError::invalid_time_expression(input))
    }

    /// Evaluates the expression against the current local time.
    pub fn resolve(&self) -> Option<TimePoint> {
        self.resolve_at(Local::now().fixed_offset())
    }

    /// Evaluates the expression against `now`.
    ///
    /// Returns `None` when the subtraction leaves chrono's representable range.
    pub fn resolve_at(&self, now: DateTime<FixedOffset>) -> Option<TimePoint> {
        let point = match *self {
            TimeExpression::Absolute(date) => date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset(),
            TimeExpression::Relative { amount, unit } => match unit {
                TimeUnit::Day => now.checked_sub_days(Days::new(u64::from(amount)))?,
                TimeUnit::Week => now.checked_sub_days(Days::new(u64::from(amount) * 7))?,
                TimeUnit::Month => now.checked_sub_months(Months::new(amount))?,
                TimeUnit::Year => now.checked_sub_months(Months::new(amount.checked_mul(12)?))?,
            },
        };
        Some(TimePoint(point))
    }
}

/// Strict `YYYY-MM-DD`: zero-padded, no sign, no surrounding whitespace.
fn parse_absolute(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

fn parse_relative(input: &str) -> Option<TimeExpression> {
    let digits_end = input
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)?;
    if digits_end == 0 {
        return None;
    }

    let unit = TimeUnit::from_suffix(&input[digits_end..])?;
    let amount = input[..digits_end].parse::<u32>().ok()?;
    Some(TimeExpression::Relative { amount, unit })
}

/// A concrete point in time produced from a [`TimeExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint(DateTime<FixedOffset>);

impl TimePoint {
    /// Returns the underlying timestamp.
    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Returns the calendar date in the point's own offset.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Encodes the point as `YYYY-MM-DD`.
    pub fn to_date_string(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }

    /// Encodes the point as an RFC 3339 timestamp with second precision.
    pub fn to_timestamp(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl From<DateTime<FixedOffset>> for TimePoint {
    fn from(value: DateTime<FixedOffset>) -> Self {
        TimePoint(value)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_timestamp())
    }
}

/// Parses and evaluates an expression against the current local time.
///
/// Every call reads the clock again.
///
/// # Errors
///
/// Returns [`QueryError::InvalidTimeExpression`] for unrecognized input or
/// for amounts too large to subtract.
pub fn parse(expression: &str) -> QueryResult<TimePoint> {
    parse_at(expression, Local::now().fixed_offset())
}

/// Parses and evaluates an expression against a fixed `now`.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_at(expression: &str, now: DateTime<FixedOffset>) -> QueryResult<TimePoint> {
    TimeExpression::parse(expression)?
        .resolve_at(now)
        .ok_or_else(|| QueryError::invalid_time_expression(expression))
}

/// Parses an expression into a calendar date, as used by date range bounds.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_date(expression: &str) -> QueryResult<NaiveDate> {
    parse(expression).map(|point| point.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_relative_units() {
        assert_eq!(
            TimeExpression::parse("3d").unwrap(),
            TimeExpression::Relative {
                amount: 3,
                unit: TimeUnit::Day
            }
        );
        assert_eq!(
            TimeExpression::parse("2w").unwrap(),
            TimeExpression::Relative {
                amount: 2,
                unit: TimeUnit::Week
            }
        );
        assert_eq!(
            TimeExpression::parse("1mo").unwrap(),
            TimeExpression::Relative {
                amount: 1,
                unit: TimeUnit::Month
            }
        );
        assert_eq!(
            TimeExpression::parse("10y").unwrap(),
            TimeExpression::Relative {
                amount: 10,
                unit: TimeUnit::Year
            }
        );
    }

    #[test]
    fn test_days_and_weeks_subtract_calendar_days() {
        let now = at("2026-03-10T14:30:00+01:00");
        assert_eq!(parse_at("3d", now).unwrap().as_datetime(), at("2026-03-07T14:30:00+01:00"));
        assert_eq!(parse_at("2w", now).unwrap().as_datetime(), at("2026-02-24T14:30:00+01:00"));
        assert_eq!(parse_at("0d", now).unwrap().as_datetime(), now);
    }

    #[test]
    fn test_month_subtraction_clamps_to_month_end() {
        let now = at("2026-03-31T09:00:00+02:00");
        assert_eq!(parse_at("1mo", now).unwrap().date(), date("2026-02-28"));
        assert_eq!(parse_at("2mo", now).unwrap().date(), date("2026-01-31"));
        assert_eq!(parse_at("1mo", at("2024-03-31T09:00:00Z")).unwrap().date(), date("2024-02-29"));
    }

    #[test]
    fn test_month_subtraction_crosses_year_boundary() {
        let now = at("2026-01-15T12:00:00Z");
        assert_eq!(parse_at("1mo", now).unwrap().date(), date("2025-12-15"));
        assert_eq!(parse_at("13mo", now).unwrap().date(), date("2024-12-15"));
    }

    #[test]
    fn test_year_subtraction_clamps_leap_day() {
        let now = at("2028-02-29T08:00:00Z");
        assert_eq!(parse_at("1y", now).unwrap().date(), date("2027-02-28"));
        assert_eq!(parse_at("4y", now).unwrap().date(), date("2024-02-29"));
    }

    #[test]
    fn test_relative_keeps_time_of_day() {
        let now = at("2026-05-20T23:59:59+02:00");
        let point = parse_at("1y", now).unwrap();
        assert_eq!(point.to_timestamp(), "2025-05-20T23:59:59+02:00");
    }

    #[test]
    fn test_absolute_date_ignores_now() {
        let a = parse_at("2026-01-15", at("2030-06-01T00:00:00Z")).unwrap();
        let b = parse_at("2026-01-15", at("1999-01-01T00:00:00Z")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_date_string(), "2026-01-15");
        assert_eq!(a.to_timestamp(), "2026-01-15T00:00:00Z");
    }

    #[test]
    fn test_parse_uses_wall_clock() {
        let before = Local::now().fixed_offset();
        let point = parse("1d").unwrap();
        let after = Local::now().fixed_offset();
        assert!(point.as_datetime() <= after - chrono::Duration::days(1));
        assert!(point.as_datetime() >= before - chrono::Duration::days(1));
    }

    #[test]
    fn test_invalid_expressions() {
        for input in [
            "abc",
            "3x",
            "",
            "d",
            "-3d",
            "3 d",
            "3D",
            "1m",
            "2026-13-01",
            "3dd",
            "2026-1-5",
            "2026-01-5",
            " 2026-01-15",
            "2026-01-15 ",
            "+2026-01-15",
            "2026-02-30",
        ] {
            let err = parse(input).unwrap_err();
            assert_eq!(err, QueryError::invalid_time_expression(input), "input: {input:?}");
            assert_eq!(err.code(), "DATE_FORMAT_ERROR");
        }
    }

    #[test]
    fn test_overflowing_amount_is_rejected() {
        assert!(parse("99999999999d").is_err());
        assert!(parse("4294967295y").is_err());
    }

    #[test]
    fn test_parse_date_encoding() {
        assert_eq!(parse_date("2026-01-15").unwrap(), date("2026-01-15"));
        let today = Local::now().date_naive();
        let week_ago = parse_date("1w").unwrap();
        assert!(today - week_ago >= chrono::Duration::days(6));
        assert!(today - week_ago <= chrono::Duration::days(8));
    }
}
