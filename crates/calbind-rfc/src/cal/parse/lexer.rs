//! Content line lexer (RFC 5545 §3.1).
//!
//! Splits raw input into logical content lines (merging folded
//! continuations) and tokenizes each into name, parameters, and raw value.
//! Unfolding is formally a transport precondition; it is handled here anyway
//! so callers can hand over wire text directly.

use std::fmt;

use crate::cal::core::{ContentLine, Parameter};

/// A content line that does not scan as `NAME[;PARAM=VALUE]*:VALUE`.
///
/// Line syntax errors are not structural: the parser records a warning and
/// skips the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSyntaxError {
    MissingName,
    InvalidName,
    InvalidParameter,
    UnclosedQuote,
    MissingColon,
}

impl fmt::Display for LineSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "missing property name"),
            Self::InvalidName => write!(f, "invalid character in property name"),
            Self::InvalidParameter => write!(f, "malformed parameter"),
            Self::UnclosedQuote => write!(f, "unclosed quoted parameter value"),
            Self::MissingColon => write!(f, "no ':' separating name and value"),
        }
    }
}

impl std::error::Error for LineSyntaxError {}

/// Splits input into logical content lines, merging folded continuations.
///
/// Accepts CRLF and bare LF endings. A line opening with SP/HTAB continues
/// the previous line with the leading whitespace character removed (RFC 5545
/// §3.1 unfolding inserts nothing in its place). Returns 1-based line
/// numbers of each logical line's first physical line.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw) in input.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t'])
            && let Some((_, prev)) = lines.last_mut()
        {
            prev.push_str(continuation);
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Tokenizes one logical content line.
///
/// ## Errors
/// Returns a [`LineSyntaxError`] when the line does not match the content
/// line grammar.
pub fn tokenize_line(line: &str) -> Result<ContentLine, LineSyntaxError> {
    let mut scanner = Scanner::new(line);

    let name = scanner.take_name()?;
    if name.is_empty() {
        return Err(LineSyntaxError::MissingName);
    }

    let mut params = Vec::new();
    loop {
        match scanner.next_byte() {
            Some(b':') => break,
            Some(b';') => params.push(scanner.take_parameter()?),
            _ => return Err(LineSyntaxError::MissingColon),
        }
    }

    Ok(ContentLine {
        name: name.to_ascii_uppercase(),
        params,
        raw_value: scanner.rest().to_string(),
    })
}

/// Byte-level cursor over one content line. Names and delimiters are ASCII;
/// multi-byte UTF-8 only occurs inside parameter values and the raw value,
/// where the scanner copies whole chars.
struct Scanner<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.line.as_bytes().get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Some(b)
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Consumes an IANA name token (alphanumeric and `-`), stopping at the
    /// delimiter without consuming it.
    fn take_name(&mut self) -> Result<&'a str, LineSyntaxError> {
        let start = self.pos;
        while let Some(b) = self.peek_byte() {
            match b {
                b';' | b':' | b'=' => break,
                b if b.is_ascii_alphanumeric() || b == b'-' => self.pos += 1,
                _ => return Err(LineSyntaxError::InvalidName),
            }
        }
        Ok(&self.line[start..self.pos])
    }

    /// Consumes `NAME=VALUE[,VALUE...]`, leaving the trailing `;` or `:`
    /// unconsumed.
    fn take_parameter(&mut self) -> Result<Parameter, LineSyntaxError> {
        let name = self
            .take_name()
            .map_err(|_| LineSyntaxError::InvalidParameter)?;
        if name.is_empty() || self.next_byte() != Some(b'=') {
            return Err(LineSyntaxError::InvalidParameter);
        }

        let mut values = Vec::new();
        loop {
            values.push(self.take_param_value()?);
            match self.peek_byte() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b';' | b':') => return Ok(Parameter::with_values(name, values)),
                _ => return Err(LineSyntaxError::MissingColon),
            }
        }
    }

    /// Consumes one parameter value, undoing quoting and RFC 6868 caret
    /// escapes (`^^`, `^n`, `^'`).
    fn take_param_value(&mut self) -> Result<String, LineSyntaxError> {
        if self.peek_byte() == Some(b'"') {
            self.pos += 1;
            let mut value = String::new();
            let mut chars = self.line[self.pos..].char_indices();
            while let Some((i, c)) = chars.next() {
                match c {
                    '"' => {
                        self.pos += i + 1;
                        return Ok(value);
                    }
                    '^' => match chars.next() {
                        Some((_, '^')) => value.push('^'),
                        Some((_, 'n')) => value.push('\n'),
                        Some((_, '\'')) => value.push('"'),
                        // Not a recognized escape: keep both characters.
                        Some((_, other)) => {
                            value.push('^');
                            value.push(other);
                        }
                        None => value.push('^'),
                    },
                    _ => value.push(c),
                }
            }
            Err(LineSyntaxError::UnclosedQuote)
        } else {
            let rest = self.rest();
            let end = rest
                .find([',', ';', ':'])
                .ok_or(LineSyntaxError::MissingColon)?;
            self.pos += end;
            Ok(rest[..end].to_string())
        }
    }
}
