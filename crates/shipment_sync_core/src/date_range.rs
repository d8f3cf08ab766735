use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Date format used on the wire for `revisedAfter` / `revisedBefore`.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("invalid date `{value}`: expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// Inclusive revision window for the shipment query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn revised_after(&self) -> String {
        self.start.format(WIRE_DATE_FORMAT).to_string()
    }

    pub fn revised_before(&self) -> String {
        self.end.format(WIRE_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.revised_after(), self.revised_before())
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(value.trim(), WIRE_DATE_FORMAT).map_err(|_| {
        DateRangeError::InvalidDate {
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_wire_dates() {
        let range = DateRange::parse("2024-02-01", "2024-04-30").expect("range should parse");
        assert_eq!(range.revised_after(), "2024-02-01");
        assert_eq!(range.revised_before(), "2024-04-30");
        assert_eq!(range.to_string(), "2024-02-01..2024-04-30");
    }

    #[test]
    fn single_day_range_is_allowed() {
        assert!(DateRange::parse("2024-03-15", "2024-03-15").is_ok());
    }

    #[test]
    fn rejects_inverted_range() {
        let error = DateRange::parse("2024-05-01", "2024-04-30").expect_err("range is inverted");
        assert!(matches!(error, DateRangeError::Inverted { .. }));
    }

    #[test]
    fn rejects_malformed_date() {
        let error = DateRange::parse("02/01/2024", "2024-04-30").expect_err("date is malformed");
        assert_eq!(
            error,
            DateRangeError::InvalidDate {
                value: "02/01/2024".to_string()
            }
        );
    }
}
