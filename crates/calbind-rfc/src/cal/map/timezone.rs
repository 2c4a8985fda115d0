//! Time zone resolution for the mapping layer.
//!
//! Wire date-times come in three reference frames (UTC, zoned, floating);
//! the domain model wants either a UTC instant or an honest floating value.
//! Every unresolvable case degrades to a warning, never an error.

use std::str::FromStr;

use calbind_core::TimeZonePolicy;
use calbind_core::model::EventTime;
use chrono::offset::LocalResult;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

use crate::cal::core::{Date, DateTime, DateTimeForm};
use crate::cal::warning::ConversionWarning;

/// Resolves a wire date-time to a UTC instant, for attributes (such as an
/// absolute alarm trigger) that cannot stay floating.
///
/// A floating value is interpreted per the policy; under the default
/// floating policy the wall clock is read as UTC and a warning records the
/// guess. Returns `None` (with a warning) when the calendar date is
/// impossible or the zone cannot be resolved.
pub fn resolve_instant(
    value: &DateTime,
    property: &str,
    policy: &TimeZonePolicy,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<chrono::DateTime<Utc>> {
    let Some(naive) = value.to_naive() else {
        warnings.push(ConversionWarning::new(
            property,
            format!("impossible calendar date-time {value}"),
        ));
        return None;
    };

    match &value.form {
        DateTimeForm::Utc => Some(Utc.from_utc_datetime(&naive)),
        DateTimeForm::Zoned { tzid } => zone_instant(tzid, naive, property, warnings),
        DateTimeForm::Floating => match policy {
            TimeZonePolicy::AssumeUtc => Some(Utc.from_utc_datetime(&naive)),
            TimeZonePolicy::AssumeZone(zone) => zone_instant(zone, naive, property, warnings),
            TimeZonePolicy::Floating => {
                warnings.push(ConversionWarning::new(
                    property,
                    "floating date-time read as UTC; set a time zone policy to pin it",
                ));
                Some(Utc.from_utc_datetime(&naive))
            }
        },
    }
}

/// Resolves a wire date-time to an event time, preserving floating values
/// under the floating policy.
pub fn resolve_event_time(
    value: &DateTime,
    property: &str,
    policy: &TimeZonePolicy,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<EventTime> {
    let Some(naive) = value.to_naive() else {
        warnings.push(ConversionWarning::new(
            property,
            format!("impossible calendar date-time {value}"),
        ));
        return None;
    };

    match &value.form {
        DateTimeForm::Utc => Some(EventTime::Utc(Utc.from_utc_datetime(&naive))),
        DateTimeForm::Zoned { tzid } => {
            zone_instant(tzid, naive, property, warnings).map(EventTime::Utc)
        }
        DateTimeForm::Floating => match policy {
            TimeZonePolicy::Floating => Some(EventTime::Floating(naive)),
            TimeZonePolicy::AssumeUtc => Some(EventTime::Utc(Utc.from_utc_datetime(&naive))),
            TimeZonePolicy::AssumeZone(zone) => {
                zone_instant(zone, naive, property, warnings).map(EventTime::Utc)
            }
        },
    }
}

/// Resolves a wire date to an all-day event time.
pub fn resolve_event_date(
    value: Date,
    property: &str,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<EventTime> {
    match value.to_naive() {
        Some(date) => Some(EventTime::Date(date)),
        None => {
            warnings.push(ConversionWarning::new(
                property,
                format!("impossible calendar date {value}"),
            ));
            None
        }
    }
}

fn zone_instant(
    zone_name: &str,
    naive: chrono::NaiveDateTime,
    property: &str,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<chrono::DateTime<Utc>> {
    let Ok(zone) = Tz::from_str(zone_name) else {
        warnings.push(ConversionWarning::new(
            property,
            format!("unknown time zone {zone_name}"),
        ));
        return None;
    };

    match zone.from_local_datetime(&naive) {
        LocalResult::Single(local) => Some(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => {
            warnings.push(ConversionWarning::new(
                property,
                format!("ambiguous local time in {zone_name}; using the earlier offset"),
            ));
            Some(earliest.with_timezone(&Utc))
        }
        LocalResult::None => {
            warnings.push(ConversionWarning::new(
                property,
                format!("nonexistent local time in {zone_name}"),
            ));
            None
        }
    }
}
