//! Property parameter type (RFC 5545 §3.2).

/// A property parameter.
///
/// Parameters can have multiple values (e.g., `MEMBER="a","b"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values in order of appearance.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter carries the given value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    // --- Convenience constructors ---

    /// Creates a VALUE parameter pinning the value type.
    #[must_use]
    pub fn value_type(type_name: impl Into<String>) -> Self {
        Self::new("VALUE", type_name)
    }

    /// Creates a TZID parameter.
    #[must_use]
    pub fn tzid(zone: impl Into<String>) -> Self {
        Self::new("TZID", zone)
    }

    /// Creates a RELATED parameter (trigger anchor edge).
    #[must_use]
    pub fn related(edge: impl Into<String>) -> Self {
        Self::new("RELATED", edge)
    }

    /// Creates an ENCODING=BASE64 parameter.
    #[must_use]
    pub fn encoding_base64() -> Self {
        Self::new("ENCODING", "BASE64")
    }

    /// Creates an FMTTYPE parameter (media type of an attachment).
    #[must_use]
    pub fn fmttype(media_type: impl Into<String>) -> Self {
        Self::new("FMTTYPE", media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_uppercased() {
        let param = Parameter::new("tzid", "Europe/Paris");
        assert_eq!(param.name, "TZID");
        assert_eq!(param.value(), Some("Europe/Paris"));
    }

    #[test]
    fn has_value_is_case_insensitive() {
        let param = Parameter::with_values("ROLE", vec!["Req-Participant".into()]);
        assert!(param.has_value("REQ-PARTICIPANT"));
        assert!(!param.has_value("CHAIR"));
    }
}
