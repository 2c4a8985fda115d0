//! Parsed component tree (RFC 5545 §3.4-3.6).

use super::property::PropertyOccurrence;
use super::value::Value;

/// A parsed component: one `BEGIN:`/`END:` block.
///
/// The tree mirrors the grammar's descriptor shape. It is mutable and owned
/// exclusively by the parse or export call working on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedComponent {
    /// Component name (normalized to uppercase).
    pub name: String,
    /// Property occurrences in order of appearance.
    pub properties: Vec<PropertyOccurrence>,
    /// Nested child components in order of appearance.
    pub children: Vec<ParsedComponent>,
}

impl ParsedComponent {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the first occurrence of the named property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyOccurrence> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns every occurrence of the named property.
    #[must_use]
    pub fn properties_named(&self, name: &str) -> Vec<&PropertyOccurrence> {
        let name_upper = name.to_ascii_uppercase();
        self.properties
            .iter()
            .filter(|p| p.name == name_upper)
            .collect()
    }

    /// Returns the first occurrence's decoded value.
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<&Value> {
        self.property(name).map(|p| &p.value)
    }

    /// Returns the first occurrence's value as text.
    #[must_use]
    pub fn property_text(&self, name: &str) -> Option<&str> {
        self.property_value(name)?.as_text()
    }

    pub fn push_property(&mut self, occurrence: PropertyOccurrence) {
        self.properties.push(occurrence);
    }

    /// Removes every occurrence of the named property.
    pub fn remove_properties(&mut self, name: &str) {
        let name_upper = name.to_ascii_uppercase();
        self.properties.retain(|p| p.name != name_upper);
    }

    /// Returns child components with the given name.
    #[must_use]
    pub fn children_named(&self, name: &str) -> Vec<&ParsedComponent> {
        let name_upper = name.to_ascii_uppercase();
        self.children
            .iter()
            .filter(|c| c.name == name_upper)
            .collect()
    }

    /// Removes every child component with the given name.
    pub fn remove_children(&mut self, name: &str) {
        let name_upper = name.to_ascii_uppercase();
        self.children.retain(|c| c.name != name_upper);
    }
}

/// A parsed document: the declared format version plus the root component.
///
/// The version is what selected the grammar at parse time; the matching
/// `VERSION` property also remains in the root's occurrence list so
/// serialization re-emits it like any other property.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Declared format version (e.g. `"2.0"`).
    pub version: String,
    pub root: ParsedComponent,
}

impl Document {
    /// Builds an empty calendar document carrying VERSION and PRODID.
    #[must_use]
    pub fn new(version: &str, product_id: &str) -> Self {
        let mut root = ParsedComponent::new("VCALENDAR");
        root.push_property(PropertyOccurrence::text("VERSION", version));
        root.push_property(PropertyOccurrence::text("PRODID", product_id));
        Self {
            version: version.to_string(),
            root,
        }
    }

    /// Returns the PRODID text, if present.
    #[must_use]
    pub fn product_id(&self) -> Option<&str> {
        self.root.property_text("PRODID")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_lookup_is_case_insensitive() {
        let mut component = ParsedComponent::new("vevent");
        component.push_property(PropertyOccurrence::text("SUMMARY", "a"));
        assert_eq!(component.name, "VEVENT");
        assert_eq!(component.property_text("summary"), Some("a"));
        assert!(component.property("LOCATION").is_none());
    }

    #[test]
    fn remove_properties_drops_all_occurrences() {
        let mut component = ParsedComponent::new("VEVENT");
        component.push_property(PropertyOccurrence::text("CATEGORIES", "a"));
        component.push_property(PropertyOccurrence::text("CATEGORIES", "b"));
        component.push_property(PropertyOccurrence::text("SUMMARY", "s"));
        component.remove_properties("CATEGORIES");
        assert!(component.properties_named("CATEGORIES").is_empty());
        assert_eq!(component.properties.len(), 1);
    }

    #[test]
    fn new_document_carries_version() {
        let document = Document::new("2.0", "-//Example//Example//EN");
        assert_eq!(document.version, "2.0");
        assert_eq!(document.root.property_text("VERSION"), Some("2.0"));
        assert_eq!(document.product_id(), Some("-//Example//Example//EN"));
    }
}
