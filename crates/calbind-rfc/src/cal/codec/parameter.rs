//! Decoders for parameter values (RFC 5545 §3.2).
//!
//! Only three small shapes are legal inside a `;NAME=VALUE` slot: a bare
//! token, a calendar address, and a URI. The latter two delegate to the value
//! codecs. A failure here never aborts the owning property's value decode;
//! the parser downgrades it to a dropped parameter plus a warning.

use super::DecodeFailure;
use super::value;
use crate::cal::grammar::ParamKind;

type DecodeResult<T> = Result<T, DecodeFailure>;

/// Decodes a bare parameter token.
///
/// Quoting and caret escapes are undone by the lexer before this runs, so a
/// newline (from `^n`) or a double quote (from `^'`) is a legal decoded
/// value; any other control character is not.
///
/// ## Errors
/// Returns an error for an empty token or one with characters outside the
/// parameter grammar.
pub fn decode_token(s: &str) -> DecodeResult<String> {
    if s.is_empty() || s.chars().any(|c| c.is_control() && c != '\n' && c != '\t') {
        return Err(DecodeFailure::InvalidToken(s.to_string()));
    }
    Ok(s.to_string())
}

/// Decodes a calendar-address parameter value (e.g. `SENT-BY`, `MEMBER`).
///
/// ## Errors
/// Returns an error for a token that is not URI-shaped.
pub fn decode_cal_address(s: &str) -> DecodeResult<String> {
    value::decode_cal_address(s)
}

/// Decodes a URI parameter value (e.g. `ALTREP`, `DIR`).
///
/// ## Errors
/// Returns an error for a token without a scheme separator.
pub fn decode_uri(s: &str) -> DecodeResult<String> {
    value::decode_uri(s)
}

/// Decodes one parameter value by its declared kind.
///
/// ## Errors
/// Returns the failure of the selected codec.
pub fn decode_kind(kind: ParamKind, s: &str) -> DecodeResult<String> {
    match kind {
        ParamKind::Token => decode_token(s),
        ParamKind::CalAddress => decode_cal_address(s),
        ParamKind::Uri => decode_uri(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_accepts_ordinary_values() {
        assert_eq!(decode_token("REQ-PARTICIPANT").as_deref(), Ok("REQ-PARTICIPANT"));
        assert_eq!(decode_token("Doe, Jane").as_deref(), Ok("Doe, Jane"));
    }

    #[test]
    fn token_keeps_caret_decoded_characters() {
        assert_eq!(decode_token("Doe\nCEO").as_deref(), Ok("Doe\nCEO"));
        assert_eq!(decode_token("say \"hi\"").as_deref(), Ok("say \"hi\""));
    }

    #[test]
    fn token_rejects_other_controls() {
        assert!(decode_token("").is_err());
        assert!(decode_token("bell\u{7}char").is_err());
        assert!(decode_token("nul\u{0}char").is_err());
    }

    #[test]
    fn kind_dispatch() {
        assert!(decode_kind(ParamKind::Uri, "https://example.com/").is_ok());
        assert!(decode_kind(ParamKind::Uri, "bare").is_err());
        assert!(decode_kind(ParamKind::CalAddress, "mailto:x@example.com").is_ok());
        assert!(decode_kind(ParamKind::Token, "STANDARD").is_ok());
    }
}
