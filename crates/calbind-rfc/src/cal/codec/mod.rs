//! Stateless value and parameter codecs.
//!
//! [`value`] holds the primitive wire value types (RFC 5545 §3.3); [`parameter`]
//! holds the small types legal inside `;NAME=VALUE` slots. Every decoder is a
//! total function returning a typed [`DecodeFailure`] for out-of-grammar
//! tokens; nothing here panics or clamps.
//!
//! [`decode_alternative`] is the bridge the parsing engine uses: it interprets
//! one grammar [`Alternative`] (type tag, list flag, transfer encodings)
//! against a raw token.

pub mod parameter;
pub mod value;

use thiserror::Error;

use super::core::{TypeTag, Value};
use super::grammar::{Alternative, Encoding};

/// A token that does not match the grammar of its value type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("invalid DATE value: {0}")]
    InvalidDate(String),

    #[error("invalid TIME value: {0}")]
    InvalidTime(String),

    #[error("invalid DATE-TIME value: {0}")]
    InvalidDateTime(String),

    #[error("invalid UTC-OFFSET value: {0}")]
    InvalidUtcOffset(String),

    #[error("invalid DURATION value: {0}")]
    InvalidDuration(String),

    #[error("negative value where a positive duration is required: {0}")]
    NegativeDuration(String),

    #[error("invalid PERIOD value: {0}")]
    InvalidPeriod(String),

    #[error("invalid GEO value: {0}")]
    InvalidGeo(String),

    #[error("invalid BOOLEAN value: {0}")]
    InvalidBoolean(String),

    #[error("invalid INTEGER value: {0}")]
    InvalidInteger(String),

    #[error("invalid FLOAT value: {0}")]
    InvalidFloat(String),

    #[error("invalid base64 payload")]
    InvalidBase64,

    #[error("invalid quoted-printable payload")]
    InvalidQuotedPrintable,

    #[error("invalid RECUR value: {0}")]
    InvalidRecur(String),

    #[error("RECUR rule carries both COUNT and UNTIL")]
    RecurCountUntilConflict,

    #[error("invalid URI value: {0}")]
    InvalidUri(String),

    #[error("invalid calendar address: {0}")]
    InvalidCalAddress(String),

    #[error("invalid token value: {0}")]
    InvalidToken(String),

    #[error("transfer encoding not declared for this property: {0}")]
    UnknownEncoding(String),
}

/// Decodes a raw token as one grammar alternative.
///
/// `tzid` is the owning property's `TZID` parameter; `encoding` its
/// `ENCODING` parameter. List alternatives split on unescaped commas and
/// decode each element independently: failed elements are dropped, and the
/// whole list fails only when no element decodes.
///
/// ## Errors
/// Returns the underlying codec failure when the token (or every list
/// element) is out of grammar.
pub fn decode_alternative(
    alt: &Alternative,
    raw: &str,
    tzid: Option<&str>,
    encoding: Option<&str>,
) -> Result<Value, DecodeFailure> {
    if !alt.list {
        return decode_element(alt, raw, tzid, encoding);
    }

    let mut items = Vec::new();
    let mut first_failure = None;
    for element in value::split_list_items(raw) {
        match decode_element(alt, element, tzid, encoding) {
            Ok(value) => items.push(value),
            Err(failure) => {
                if first_failure.is_none() {
                    first_failure = Some(failure);
                }
            }
        }
    }

    if items.is_empty()
        && let Some(failure) = first_failure
    {
        return Err(failure);
    }
    Ok(Value::List(items))
}

fn decode_element(
    alt: &Alternative,
    raw: &str,
    tzid: Option<&str>,
    encoding: Option<&str>,
) -> Result<Value, DecodeFailure> {
    if alt.encodings.is_empty() {
        return decode_tag(alt.tag, raw, tzid);
    }

    // Binary-style alternative: resolve the transfer encoding first. With no
    // ENCODING parameter the first declared encoding applies.
    let declared = match encoding {
        Some(name) => Encoding::parse(name)
            .filter(|e| alt.encodings.contains(e))
            .ok_or_else(|| DecodeFailure::UnknownEncoding(name.to_string()))?,
        None => alt.encodings[0],
    };

    let bytes = match declared {
        Encoding::Base64 => value::decode_base64(raw)?,
        Encoding::QuotedPrintable => value::decode_quoted_printable(raw)?,
    };
    Ok(Value::Binary(bytes))
}

/// Decodes a raw token by type tag alone (no list or encoding handling).
///
/// ## Errors
/// Returns the codec failure of the selected type.
pub fn decode_tag(tag: TypeTag, raw: &str, tzid: Option<&str>) -> Result<Value, DecodeFailure> {
    match tag {
        TypeTag::Text => Ok(Value::Text(value::unescape_text(raw))),
        TypeTag::Integer => value::decode_integer(raw).map(Value::Integer),
        TypeTag::Float => value::decode_float(raw).map(Value::Float),
        TypeTag::Boolean => value::decode_boolean(raw).map(Value::Boolean),
        TypeTag::Date => value::decode_date(raw).map(Value::Date),
        TypeTag::Time => value::decode_time(raw).map(Value::Time),
        TypeTag::DateTime => value::decode_datetime(raw, tzid).map(Value::DateTime),
        TypeTag::Duration => value::decode_duration(raw).map(Value::Duration),
        TypeTag::Period => value::decode_period(raw, tzid).map(Value::Period),
        TypeTag::UtcOffset => value::decode_utc_offset(raw).map(Value::UtcOffset),
        TypeTag::Geo => {
            value::decode_geo(raw).map(|(latitude, longitude)| Value::Geo { latitude, longitude })
        }
        TypeTag::Uri => value::decode_uri(raw).map(Value::Uri),
        TypeTag::CalAddress => value::decode_cal_address(raw).map(Value::CalAddress),
        TypeTag::Recur => value::decode_recur(raw).map(|r| Value::Recur(Box::new(r))),
        // Binary always travels with a declared transfer encoding; a bare tag
        // dispatch defaults to base64.
        TypeTag::Binary => value::decode_base64(raw).map(Value::Binary),
    }
}
