//! Content lines and property occurrences (RFC 5545 §3.1).

use super::datetime::DateTime;
use super::duration::Duration;
use super::parameter::Parameter;
use super::value::{TypeTag, Value};

/// A raw content line as produced by the lexer.
///
/// This is the pre-grammar representation: the name and parameters are
/// tokenized but the value is still raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value text (after unfolding, before decoding).
    pub raw_value: String,
}

impl ContentLine {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.into(),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the first value of the named parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Returns the `VALUE=` parameter token if present.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.get_param_value("VALUE")
    }

    /// Returns the `TZID` parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param_value("TZID")
    }
}

/// One decoded property occurrence inside a parsed component.
///
/// `tag` records which grammar alternative decoded the value; extension
/// properties the grammar does not describe have no tag and keep their raw
/// text in [`Value::Unknown`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyOccurrence {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Resolved value type, `None` for extension properties.
    pub tag: Option<TypeTag>,
    /// Decoded parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Decoded value.
    pub value: Value,
}

impl PropertyOccurrence {
    /// Creates a text occurrence.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            tag: Some(TypeTag::Text),
            params: Vec::new(),
            value: Value::Text(value.into()),
        }
    }

    /// Creates an integer occurrence.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            tag: Some(TypeTag::Integer),
            params: Vec::new(),
            value: Value::Integer(value),
        }
    }

    /// Creates a date-time occurrence.
    #[must_use]
    pub fn date_time(name: impl Into<String>, value: DateTime) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            tag: Some(TypeTag::DateTime),
            params: Vec::new(),
            value: Value::DateTime(value),
        }
    }

    /// Creates a duration occurrence.
    #[must_use]
    pub fn duration(name: impl Into<String>, value: Duration) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            tag: Some(TypeTag::Duration),
            params: Vec::new(),
            value: Value::Duration(value),
        }
    }

    /// Creates a URI occurrence.
    #[must_use]
    pub fn uri(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            tag: Some(TypeTag::Uri),
            params: Vec::new(),
            value: Value::Uri(value.into()),
        }
    }

    /// Creates an extension occurrence whose raw value is kept verbatim.
    #[must_use]
    pub fn extension(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            tag: None,
            params: Vec::new(),
            value: Value::Unknown(raw.into()),
        }
    }

    /// Attaches a parameter (builder style).
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.set_param(param);
        self
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the first value of the named parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Sets a parameter, replacing any existing parameter with the same name.
    pub fn set_param(&mut self, param: Parameter) {
        self.params.retain(|p| p.name != param.name);
        self.params.push(param);
    }
}
