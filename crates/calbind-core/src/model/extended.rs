//! Verbatim carriers for non-standard (X-) content.

/// A parameter preserved verbatim on an extension property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtendedParameter {
    /// Parameter name, uppercased.
    pub name: String,
    /// Parameter values in order of appearance.
    pub values: Vec<String>,
}

impl ExtendedParameter {
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            values: vec![value.to_string()],
        }
    }
}

/// A property the grammar does not describe, preserved verbatim.
///
/// Extension properties survive an import/export cycle byte-for-byte up to
/// line folding: the raw value text is never decoded or re-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtendedProperty {
    /// Property name, uppercased (usually `X-` prefixed).
    pub name: String,
    /// Parameters preserved in order of appearance.
    pub params: Vec<ExtendedParameter>,
    /// Raw value text exactly as it appeared after unfolding.
    pub value: String,
}

impl ExtendedProperty {
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            params: Vec::new(),
            value: value.to_string(),
        }
    }

    /// Returns the first value of the named parameter, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .and_then(|p| p.values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_uppercased() {
        let prop = ExtendedProperty::new("x-custom-field", "some value");
        assert_eq!(prop.name, "X-CUSTOM-FIELD");
        assert_eq!(prop.value, "some value");
    }

    #[test]
    fn param_lookup_is_case_insensitive() {
        let mut prop = ExtendedProperty::new("X-THING", "v");
        prop.params.push(ExtendedParameter::new("x-role", "chair"));
        assert_eq!(prop.param("X-ROLE"), Some("chair"));
        assert_eq!(prop.param("missing"), None);
    }
}
