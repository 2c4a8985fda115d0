//! Structural parse errors.

use std::fmt;

use thiserror::Error;

/// A violation of the document's block structure or version declaration.
///
/// Structural errors are the only hard failures the parser produces: once
/// the shape of the document cannot be trusted, nothing after the violation
/// can be attributed to the right component. Everything value-level is
/// reported through conversion warnings instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}{}", context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct StructuralError {
    pub kind: StructuralErrorKind,
    /// 1-based logical line number (after unfolding).
    pub line: usize,
    pub context: Option<String>,
}

impl StructuralError {
    #[must_use]
    pub fn new(kind: StructuralErrorKind, line: usize) -> Self {
        Self {
            kind,
            line,
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// What kind of structural violation occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralErrorKind {
    /// The document does not open with a `BEGIN:` line.
    MissingBegin,
    /// A `BEGIN:` names a component the grammar does not allow here.
    UnknownComponent,
    /// An `END:` does not match the innermost open component.
    MismatchedEnd,
    /// The input ended with components still open.
    MissingEnd,
    /// The root component carries no version property.
    MissingVersion,
    /// The declared version has no registered grammar.
    UnsupportedVersion,
}

impl fmt::Display for StructuralErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBegin => write!(f, "expected BEGIN"),
            Self::UnknownComponent => write!(f, "unknown component"),
            Self::MismatchedEnd => write!(f, "mismatched END"),
            Self::MissingEnd => write!(f, "missing END"),
            Self::MissingVersion => write!(f, "missing version property"),
            Self::UnsupportedVersion => write!(f, "unsupported format version"),
        }
    }
}
