//! Non-fatal conversion diagnostics.
//!
//! Everything short of a structural violation is reported here: the caller
//! gets the best-effort result plus a list describing what was dropped or
//! defaulted. Warnings are accumulated in a plain `Vec` threaded through the
//! decode and mapping calls; they are never raised as errors.

use std::fmt;

use super::codec::DecodeFailure;

/// A value or structure that could not be fully interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    /// Property name the warning concerns.
    pub property: String,
    /// The partner property of a cross-field dependency, when the warning
    /// involves two properties.
    pub related: Option<String>,
    /// Human-readable reason.
    pub reason: String,
    /// The underlying codec failure, when one exists.
    pub failure: Option<DecodeFailure>,
}

impl ConversionWarning {
    #[must_use]
    pub fn new(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            related: None,
            reason: reason.into(),
            failure: None,
        }
    }

    /// A warning caused by a codec failure.
    #[must_use]
    pub fn decode(property: impl Into<String>, failure: DecodeFailure) -> Self {
        Self {
            property: property.into(),
            related: None,
            reason: failure.to_string(),
            failure: Some(failure),
        }
    }

    /// A warning for a dependency between two properties; both names are
    /// carried so consumers need not parse the reason text.
    #[must_use]
    pub fn cross_field(
        dependent: &str,
        prerequisite: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            property: dependent.to_string(),
            related: Some(prerequisite.to_string()),
            reason: reason.into(),
            failure: None,
        }
    }

    /// A warning that a non-repeatable property appeared more than once.
    #[must_use]
    pub fn duplicate_singleton(property: impl Into<String>) -> Self {
        let property = property.into();
        Self {
            reason: format!("duplicate occurrence of singleton property {property}; keeping the last"),
            property,
            related: None,
            failure: None,
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.related {
            Some(related) => write!(f, "{}/{}: {}", self.property, related, self.reason),
            None => write!(f, "{}: {}", self.property, self.reason),
        }
    }
}
