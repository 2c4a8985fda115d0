//! Decoders for the primitive wire value types (RFC 5545 §3.3).
//!
//! Every function is total: out-of-grammar tokens produce a typed
//! [`DecodeFailure`], never a panic or a clamped guess.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::DecodeFailure;
use crate::cal::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, Period, Recur, RecurEnd, Time, UtcOffset,
    Weekday, WeekdayNum,
};

type DecodeResult<T> = Result<T, DecodeFailure>;

/// Decodes a DATE value (`YYYYMMDD`).
///
/// ## Errors
/// Returns an error if the token is not an 8-digit date in range.
pub fn decode_date(s: &str) -> DecodeResult<Date> {
    let fail = || DecodeFailure::InvalidDate(s.to_string());

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail());
    }

    let year = s[0..4].parse::<u16>().map_err(|_| fail())?;
    let month = s[4..6].parse::<u8>().map_err(|_| fail())?;
    let day = s[6..8].parse::<u8>().map_err(|_| fail())?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(fail());
    }

    Ok(Date { year, month, day })
}

/// Decodes a TIME value (`HHMMSS[Z]`).
///
/// ## Errors
/// Returns an error if the token is not a 6-digit time in range.
pub fn decode_time(s: &str) -> DecodeResult<Time> {
    let fail = || DecodeFailure::InvalidTime(s.to_string());

    let (time_str, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time_str.len() != 6 || !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail());
    }

    let hour = time_str[0..2].parse::<u8>().map_err(|_| fail())?;
    let minute = time_str[2..4].parse::<u8>().map_err(|_| fail())?;
    let second = time_str[4..6].parse::<u8>().map_err(|_| fail())?;

    // 60 allowed for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(fail());
    }

    Ok(Time {
        hour,
        minute,
        second,
        is_utc,
    })
}

/// Decodes a DATE-TIME value (`YYYYMMDD"T"HHMMSS[Z]`).
///
/// The reference frame comes from the trailing `Z` or from the `TZID`
/// parameter supplied by the caller; with neither, the value is floating.
///
/// ## Errors
/// Returns an error if either half is out of grammar.
pub fn decode_datetime(s: &str, tzid: Option<&str>) -> DecodeResult<DateTime> {
    let t_pos = s
        .find('T')
        .ok_or_else(|| DecodeFailure::InvalidDateTime(s.to_string()))?;

    let date = decode_date(&s[..t_pos]).map_err(|_| DecodeFailure::InvalidDateTime(s.to_string()))?;
    let time = decode_time(&s[t_pos + 1..])
        .map_err(|_| DecodeFailure::InvalidDateTime(s.to_string()))?;

    let form = if time.is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        form,
    })
}

/// Decodes a UTC-OFFSET value (`(+|-)HHMM[SS]`).
///
/// ## Errors
/// Returns an error if the token is not a signed 4- or 6-digit offset.
pub fn decode_utc_offset(s: &str) -> DecodeResult<UtcOffset> {
    let fail = || DecodeFailure::InvalidUtcOffset(s.to_string());

    let sign = match s.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(fail()),
    };

    let digits = &s[1..];
    if (digits.len() != 4 && digits.len() != 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail());
    }

    let hours = digits[0..2].parse::<i32>().map_err(|_| fail())?;
    let minutes = digits[2..4].parse::<i32>().map_err(|_| fail())?;
    let seconds = if digits.len() == 6 {
        digits[4..6].parse::<i32>().map_err(|_| fail())?
    } else {
        0
    };

    if minutes > 59 || seconds > 59 {
        return Err(fail());
    }

    Ok(UtcOffset::from_seconds(
        sign * (hours * 3600 + minutes * 60 + seconds),
    ))
}

/// Decodes a DURATION value (`[+|-]PnW` or `[+|-]P[nD][T[nH][nM][nS]]`).
///
/// ## Errors
/// Returns an error if the token is not a valid duration.
pub fn decode_duration(s: &str) -> DecodeResult<Duration> {
    let fail = || DecodeFailure::InvalidDuration(s.to_string());
    let mut chars = s.chars().peekable();
    let mut dur = Duration::zero();

    match chars.peek() {
        Some('-') => {
            dur.negative = true;
            chars.next();
        }
        Some('+') => {
            chars.next();
        }
        _ => {}
    }

    if chars.next() != Some('P') {
        return Err(fail());
    }

    let mut in_time = false;
    let mut number: Option<u32> = None;
    let mut saw_component = false;

    for c in chars {
        if let Some(digit) = c.to_digit(10) {
            let current = number.unwrap_or(0);
            number = Some(
                current
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or_else(fail)?,
            );
            continue;
        }

        match (c, number.take()) {
            ('T', None) if !in_time => in_time = true,
            ('W', Some(n)) if !in_time && !saw_component => {
                dur.weeks = n;
                saw_component = true;
            }
            ('D', Some(n)) if !in_time => {
                dur.days = n;
                saw_component = true;
            }
            ('H', Some(n)) if in_time => {
                dur.hours = n;
                saw_component = true;
            }
            ('M', Some(n)) if in_time => {
                dur.minutes = n;
                saw_component = true;
            }
            ('S', Some(n)) if in_time => {
                dur.seconds = n;
                saw_component = true;
            }
            _ => return Err(fail()),
        }
    }

    // A trailing bare number ("P3") or no component at all is out of grammar.
    if number.is_some() || !saw_component {
        return Err(fail());
    }

    Ok(dur)
}

/// Decodes a duration that must not be negative (e.g. the alarm snooze gap).
///
/// ## Errors
/// Returns an error for invalid tokens, or [`DecodeFailure::NegativeDuration`]
/// when the token carries a leading `-`.
pub fn decode_positive_duration(s: &str) -> DecodeResult<Duration> {
    let dur = decode_duration(s)?;
    if dur.negative {
        return Err(DecodeFailure::NegativeDuration(s.to_string()));
    }
    Ok(dur)
}

/// Decodes a PERIOD value (`start"/"end` or `start"/"duration`).
///
/// ## Errors
/// Returns an error if either half is out of grammar.
pub fn decode_period(s: &str, tzid: Option<&str>) -> DecodeResult<Period> {
    let slash_pos = s
        .find('/')
        .ok_or_else(|| DecodeFailure::InvalidPeriod(s.to_string()))?;

    let start = decode_datetime(&s[..slash_pos], tzid)?;
    let end_str = &s[slash_pos + 1..];

    if end_str.starts_with(['P', '+', '-']) {
        let duration = decode_duration(end_str)?;
        Ok(Period::Duration { start, duration })
    } else {
        let end = decode_datetime(end_str, tzid)?;
        Ok(Period::Explicit { start, end })
    }
}

/// Decodes a GEO value: two `;`-separated floats (latitude, longitude).
///
/// ## Errors
/// Returns an error unless the token is exactly two floats.
pub fn decode_geo(s: &str) -> DecodeResult<(f64, f64)> {
    let fail = || DecodeFailure::InvalidGeo(s.to_string());

    let (lat_str, lon_str) = s.split_once(';').ok_or_else(fail)?;
    if lon_str.contains(';') {
        return Err(fail());
    }

    let latitude = lat_str.trim().parse::<f64>().map_err(|_| fail())?;
    let longitude = lon_str.trim().parse::<f64>().map_err(|_| fail())?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(fail());
    }
    Ok((latitude, longitude))
}

/// Decodes a BOOLEAN value (`TRUE`/`FALSE`, case-insensitive).
///
/// ## Errors
/// Returns an error for any other token.
pub fn decode_boolean(s: &str) -> DecodeResult<bool> {
    match s.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(DecodeFailure::InvalidBoolean(s.to_string())),
    }
}

/// Decodes an INTEGER value.
///
/// ## Errors
/// Returns an error if the token is not a valid signed 32-bit integer.
pub fn decode_integer(s: &str) -> DecodeResult<i32> {
    s.parse()
        .map_err(|_| DecodeFailure::InvalidInteger(s.to_string()))
}

/// Decodes a FLOAT value.
///
/// ## Errors
/// Returns an error if the token is not a finite float.
pub fn decode_float(s: &str) -> DecodeResult<f64> {
    let value: f64 = s
        .parse()
        .map_err(|_| DecodeFailure::InvalidFloat(s.to_string()))?;
    if !value.is_finite() {
        return Err(DecodeFailure::InvalidFloat(s.to_string()));
    }
    Ok(value)
}

/// Decodes a base64 binary payload.
///
/// ## Errors
/// Returns an error if the token is not valid base64.
pub fn decode_base64(s: &str) -> DecodeResult<Vec<u8>> {
    STANDARD.decode(s).map_err(|_| DecodeFailure::InvalidBase64)
}

/// Decodes a quoted-printable payload (legacy vCalendar 1.0 encoding).
///
/// A lone trailing `=` (soft line break remnant) is tolerated.
///
/// ## Errors
/// Returns an error on a malformed escape.
pub fn decode_quoted_printable(s: &str) -> DecodeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes().peekable();

    while let Some(b) = bytes.next() {
        if b != b'=' {
            out.push(b);
            continue;
        }
        let Some(hi) = bytes.next() else {
            break; // soft break at end of value
        };
        let lo = bytes.next().ok_or(DecodeFailure::InvalidQuotedPrintable)?;
        let hex = [hi, lo];
        let hex_str =
            std::str::from_utf8(&hex).map_err(|_| DecodeFailure::InvalidQuotedPrintable)?;
        let byte = u8::from_str_radix(hex_str, 16)
            .map_err(|_| DecodeFailure::InvalidQuotedPrintable)?;
        out.push(byte);
    }

    Ok(out)
}

/// Decodes a RECUR value (RFC 5545 §3.3.10). `FREQ` is required; unknown rule
/// parts are ignored.
///
/// ## Errors
/// Returns an error for malformed parts, a missing `FREQ`, or a rule carrying
/// both `COUNT` and `UNTIL`.
pub fn decode_recur(s: &str) -> DecodeResult<Recur> {
    let mut recur = Recur::new();

    for part in s.split(';') {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| DecodeFailure::InvalidRecur(s.to_string()))?;
        decode_recur_part(&mut recur, key, value)?;
    }

    if recur.freq.is_none() {
        return Err(DecodeFailure::InvalidRecur(s.to_string()));
    }

    Ok(recur)
}

fn decode_recur_part(recur: &mut Recur, key: &str, value: &str) -> DecodeResult<()> {
    let fail = || DecodeFailure::InvalidRecur(format!("{key}={value}"));

    match key.to_ascii_uppercase().as_str() {
        "FREQ" => recur.freq = Some(Frequency::parse(value).ok_or_else(fail)?),
        "INTERVAL" => recur.interval = Some(value.parse().map_err(|_| fail())?),
        "COUNT" => {
            if recur.until.is_some() {
                return Err(DecodeFailure::RecurCountUntilConflict);
            }
            recur.count = Some(value.parse().map_err(|_| fail())?);
        }
        "UNTIL" => {
            if recur.count.is_some() {
                return Err(DecodeFailure::RecurCountUntilConflict);
            }
            recur.until = Some(if value.contains('T') {
                RecurEnd::DateTime(decode_datetime(value, None)?)
            } else {
                RecurEnd::Date(decode_date(value)?)
            });
        }
        "WKST" => recur.wkst = Some(Weekday::parse(value).ok_or_else(fail)?),
        "BYSECOND" => recur.by_second = decode_number_list(value)?,
        "BYMINUTE" => recur.by_minute = decode_number_list(value)?,
        "BYHOUR" => recur.by_hour = decode_number_list(value)?,
        "BYDAY" => recur.by_day = decode_byday(value)?,
        "BYMONTHDAY" => recur.by_monthday = decode_number_list(value)?,
        "BYYEARDAY" => recur.by_yearday = decode_number_list(value)?,
        "BYWEEKNO" => recur.by_weekno = decode_number_list(value)?,
        "BYMONTH" => recur.by_month = decode_number_list(value)?,
        "BYSETPOS" => recur.by_setpos = decode_number_list(value)?,
        _ => {} // Unknown rule part - ignore
    }
    Ok(())
}

fn decode_number_list<T: std::str::FromStr>(s: &str) -> DecodeResult<Vec<T>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| DecodeFailure::InvalidRecur(s.to_string()))
        })
        .collect()
}

fn decode_byday(s: &str) -> DecodeResult<Vec<WeekdayNum>> {
    s.split(',').map(|v| decode_weekday_num(v.trim())).collect()
}

fn decode_weekday_num(s: &str) -> DecodeResult<WeekdayNum> {
    let fail = || DecodeFailure::InvalidRecur(s.to_string());

    if s.len() < 2 {
        return Err(fail());
    }

    // The two-letter day code is ASCII; a non-boundary split means the
    // token is not one.
    let split = s.len() - 2;
    if !s.is_char_boundary(split) {
        return Err(fail());
    }
    let weekday = Weekday::parse(&s[split..]).ok_or_else(fail)?;
    let ordinal_str = &s[..split];

    let ordinal = if ordinal_str.is_empty() {
        None
    } else {
        Some(ordinal_str.parse().map_err(|_| fail())?)
    };

    Ok(WeekdayNum { ordinal, weekday })
}

/// Decodes a URI value.
///
/// Validation is deliberately shallow: the token must be non-empty and carry
/// a scheme separator. Full URI grammar checking is left to consumers that
/// actually dereference the value.
///
/// ## Errors
/// Returns an error for an empty token or one without a `:`.
pub fn decode_uri(s: &str) -> DecodeResult<String> {
    if s.is_empty() || !s.contains(':') {
        return Err(DecodeFailure::InvalidUri(s.to_string()));
    }
    Ok(s.to_string())
}

/// Decodes a CAL-ADDRESS value (a URI, almost always `mailto:`).
///
/// ## Errors
/// Returns an error for a token that is not URI-shaped.
pub fn decode_cal_address(s: &str) -> DecodeResult<String> {
    if s.is_empty() || !s.contains(':') {
        return Err(DecodeFailure::InvalidCalAddress(s.to_string()));
    }
    Ok(s.to_string())
}

/// Unescapes TEXT values (RFC 5545 §3.3.11): `\\`, `\,`, `\;`, `\n`/`\N`.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                // Invalid escape, preserve as-is
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}

/// Splits a list value on unescaped commas.
#[must_use]
pub fn split_list_items(s: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            items.push(&s[start..i]);
            start = i + 1;
        }
    }
    items.push(&s[start..]);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_basic() {
        let date = decode_date("20240105").unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 1, 5));
    }

    #[test]
    fn date_rejects_out_of_grammar() {
        assert!(decode_date("2024010").is_err()); // too short
        assert!(decode_date("20241301").is_err()); // month 13
        assert!(decode_date("2024010a").is_err()); // non-digit
    }

    #[test]
    fn time_utc_and_local() {
        let utc = decode_time("120000Z").unwrap();
        assert!(utc.is_utc);
        assert_eq!(utc.hour, 12);

        let local = decode_time("133045").unwrap();
        assert!(!local.is_utc);
        assert_eq!((local.hour, local.minute, local.second), (13, 30, 45));

        assert!(decode_time("250000").is_err());
    }

    #[test]
    fn datetime_forms() {
        assert!(decode_datetime("20240101T120000Z", None).unwrap().is_utc());
        assert!(
            decode_datetime("20240101T120000", None)
                .unwrap()
                .is_floating()
        );
        assert_eq!(
            decode_datetime("20240101T120000", Some("Europe/Paris"))
                .unwrap()
                .tzid(),
            Some("Europe/Paris")
        );
        assert!(decode_datetime("20240101", None).is_err());
    }

    #[test]
    fn duration_weeks() {
        let dur = decode_duration("P2W").unwrap();
        assert_eq!(dur.weeks, 2);
    }

    #[test]
    fn duration_days_time() {
        let dur = decode_duration("P1DT2H30M").unwrap();
        assert_eq!((dur.days, dur.hours, dur.minutes), (1, 2, 30));
    }

    #[test]
    fn duration_negative() {
        let dur = decode_duration("-PT15M").unwrap();
        assert!(dur.negative);
        assert_eq!(dur.minutes, 15);
    }

    #[test]
    fn duration_rejects_out_of_grammar() {
        assert!(decode_duration("PT").is_err()); // no components
        assert!(decode_duration("P3").is_err()); // dangling number
        assert!(decode_duration("15M").is_err()); // missing P
        assert!(decode_duration("P1H").is_err()); // hours outside T section
    }

    #[test]
    fn positive_duration_rejects_sign() {
        assert!(decode_positive_duration("PT5M").is_ok());
        assert_eq!(
            decode_positive_duration("-PT5M"),
            Err(DecodeFailure::NegativeDuration("-PT5M".to_string()))
        );
    }

    #[test]
    fn utc_offset_forms() {
        assert_eq!(decode_utc_offset("+0530").unwrap().hours(), 5);
        assert_eq!(decode_utc_offset("-0800").unwrap().hours(), -8);
        assert_eq!(decode_utc_offset("+010203").unwrap().as_seconds(), 3723);
        assert!(decode_utc_offset("0530").is_err());
        assert!(decode_utc_offset("+05301").is_err());
    }

    #[test]
    fn period_explicit_and_duration() {
        let explicit = decode_period("20240101T090000Z/20240101T170000Z", None).unwrap();
        assert!(matches!(explicit, Period::Explicit { .. }));

        let relative = decode_period("20240101T090000Z/PT8H", None).unwrap();
        match relative {
            Period::Duration { duration, .. } => assert_eq!(duration.hours, 8),
            Period::Explicit { .. } => panic!("expected duration period"),
        }
    }

    #[test]
    fn geo_pair() {
        let (lat, lon) = decode_geo("37.386013;-122.082932").unwrap();
        assert!((lat - 37.386_013).abs() < 1e-9);
        assert!((lon + 122.082_932).abs() < 1e-9);
        assert!(decode_geo("37.0").is_err());
        assert!(decode_geo("37.0;1.0;2.0").is_err());
    }

    #[test]
    fn recur_basic() {
        let recur = decode_recur("FREQ=DAILY;COUNT=10").unwrap();
        assert_eq!(recur.freq, Some(Frequency::Daily));
        assert_eq!(recur.count, Some(10));
    }

    #[test]
    fn recur_byday_ordinals() {
        let recur = decode_recur("FREQ=MONTHLY;BYDAY=-1FR,2MO").unwrap();
        assert_eq!(recur.by_day.len(), 2);
        assert_eq!(recur.by_day[0].ordinal, Some(-1));
        assert_eq!(recur.by_day[0].weekday, Weekday::Friday);
    }

    #[test]
    fn recur_byday_rejects_non_ascii_tokens() {
        assert_eq!(
            decode_recur("FREQ=MONTHLY;BYDAY=\u{20ac}"),
            Err(DecodeFailure::InvalidRecur("\u{20ac}".to_string()))
        );
        assert_eq!(
            decode_recur("FREQ=MONTHLY;BYDAY=1é"),
            Err(DecodeFailure::InvalidRecur("1é".to_string()))
        );
    }

    #[test]
    fn recur_count_until_conflict() {
        assert_eq!(
            decode_recur("FREQ=DAILY;COUNT=10;UNTIL=20240131"),
            Err(DecodeFailure::RecurCountUntilConflict)
        );
    }

    #[test]
    fn recur_requires_freq() {
        assert!(decode_recur("COUNT=10").is_err());
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape_text("hello\\, world"), "hello, world");
        assert_eq!(unescape_text("a\\nb"), "a\nb");
        assert_eq!(unescape_text("back\\\\slash"), "back\\slash");
        assert_eq!(unescape_text("semi\\;colon"), "semi;colon");
    }

    #[test]
    fn list_split_respects_escapes() {
        assert_eq!(split_list_items("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_list_items("a\\,b,c"), vec!["a\\,b", "c"]);
        assert_eq!(split_list_items("single"), vec!["single"]);
    }

    #[test]
    fn uri_and_cal_address_need_a_scheme() {
        assert_eq!(
            decode_uri("https://example.com/agenda.ics").as_deref(),
            Ok("https://example.com/agenda.ics")
        );
        assert!(decode_uri("").is_err());
        assert!(decode_uri("no-scheme").is_err());
        assert_eq!(
            decode_cal_address("mailto:jane@example.com").as_deref(),
            Ok("mailto:jane@example.com")
        );
        assert!(decode_cal_address("jane@example.com").is_err());
    }

    #[test]
    fn base64_payload() {
        assert_eq!(decode_base64("SGVsbG8gV29ybGQ=").unwrap(), b"Hello World");
        assert!(decode_base64("not base64!").is_err());
    }

    #[test]
    fn quoted_printable_payload() {
        assert_eq!(
            decode_quoted_printable("caf=C3=A9").unwrap(),
            "café".as_bytes()
        );
        assert_eq!(decode_quoted_printable("plain").unwrap(), b"plain");
        assert!(decode_quoted_printable("bad=Z9").is_err());
    }
}
