//! Date and time value types (RFC 5545 §3.3.4, §3.3.5, §3.3.12, §3.3.14).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// A DATE value: calendar date with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// Converts to a chrono date. Returns `None` for impossible calendar
    /// dates that passed the lexical check (e.g. February 30th).
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))
    }

    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: u16::try_from(date.year()).unwrap_or(0),
            month: u8::try_from(date.month()).unwrap_or(1),
            day: u8::try_from(date.day()).unwrap_or(1),
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// A TIME value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Whether the value carried the `Z` (UTC) suffix.
    pub is_utc: bool,
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.is_utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// Which reference frame a DATE-TIME value is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Trailing `Z`: the instant is UTC.
    Utc,
    /// No zone information: a floating wall-clock time.
    Floating,
    /// Local time in the zone named by a `TZID` parameter.
    Zoned { tzid: String },
}

/// A DATE-TIME value with its reference frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub form: DateTimeForm,
}

impl DateTime {
    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.form == DateTimeForm::Utc
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.form == DateTimeForm::Floating
    }

    /// Returns the zone id for zoned values.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            DateTimeForm::Utc | DateTimeForm::Floating => None,
        }
    }

    /// Converts to a chrono wall-clock value, ignoring the reference frame.
    /// Returns `None` for impossible calendar dates or times.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )?;
        let time = NaiveTime::from_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )?;
        Some(date.and_time(time))
    }

    /// Converts a UTC-form value to a chrono instant. Returns `None` when the
    /// value is not UTC or names an impossible date.
    #[must_use]
    pub fn to_utc(&self) -> Option<chrono::DateTime<Utc>> {
        if !self.is_utc() {
            return None;
        }
        self.to_naive().map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Builds a UTC-form wire value from a chrono instant.
    #[must_use]
    pub fn from_utc(instant: chrono::DateTime<Utc>) -> Self {
        use chrono::{Datelike, Timelike};
        Self {
            year: u16::try_from(instant.year()).unwrap_or(0),
            month: u8::try_from(instant.month()).unwrap_or(1),
            day: u8::try_from(instant.day()).unwrap_or(1),
            hour: u8::try_from(instant.hour()).unwrap_or(0),
            minute: u8::try_from(instant.minute()).unwrap_or(0),
            second: u8::try_from(instant.second()).unwrap_or(0),
            form: DateTimeForm::Utc,
        }
    }

    /// Builds a floating wire value from a chrono wall-clock value.
    #[must_use]
    pub fn from_naive(naive: NaiveDateTime) -> Self {
        use chrono::{Datelike, Timelike};
        Self {
            year: u16::try_from(naive.year()).unwrap_or(0),
            month: u8::try_from(naive.month()).unwrap_or(1),
            day: u8::try_from(naive.day()).unwrap_or(1),
            hour: u8::try_from(naive.hour()).unwrap_or(0),
            minute: u8::try_from(naive.minute()).unwrap_or(0),
            second: u8::try_from(naive.second()).unwrap_or(0),
            form: DateTimeForm::Floating,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.is_utc() {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

/// A UTC-OFFSET value, stored as signed seconds east of UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    #[must_use]
    pub const fn as_seconds(self) -> i32 {
        self.seconds
    }

    /// Signed whole hours of the offset.
    #[must_use]
    pub const fn hours(self) -> i32 {
        self.seconds / 3600
    }

    /// Minutes past the hour (always non-negative).
    #[must_use]
    pub const fn minutes(self) -> i32 {
        (self.seconds.abs() % 3600) / 60
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let abs = self.seconds.abs();
        write!(f, "{sign}{:02}{:02}", abs / 3600, (abs % 3600) / 60)?;
        if abs % 60 != 0 {
            write!(f, "{:02}", abs % 60)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_display() {
        let date = Date {
            year: 2024,
            month: 1,
            day: 5,
        };
        assert_eq!(date.to_string(), "20240105");
    }

    #[test]
    fn impossible_date_has_no_naive_form() {
        let date = Date {
            year: 2023,
            month: 2,
            day: 30,
        };
        assert!(date.to_naive().is_none());
    }

    #[test]
    fn datetime_display_utc() {
        let dt = DateTime {
            year: 2024,
            month: 1,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
            form: DateTimeForm::Utc,
        };
        assert_eq!(dt.to_string(), "20240101T120000Z");
        assert!(dt.to_utc().is_some());
    }

    #[test]
    fn datetime_utc_round_trips_through_chrono() {
        let dt = DateTime {
            year: 2024,
            month: 6,
            day: 15,
            hour: 8,
            minute: 30,
            second: 5,
            form: DateTimeForm::Utc,
        };
        let instant = dt.to_utc().unwrap();
        assert_eq!(DateTime::from_utc(instant), dt);
    }

    #[test]
    fn offset_display() {
        assert_eq!(UtcOffset::from_seconds(5 * 3600 + 30 * 60).to_string(), "+0530");
        assert_eq!(UtcOffset::from_seconds(-8 * 3600).to_string(), "-0800");
        assert_eq!(UtcOffset::from_seconds(3661).to_string(), "+010101");
    }
}
