//! Version-keyed grammar descriptor trees.
//!
//! A grammar names, for every component type, the legal properties (each
//! with one or more candidate value types and its legal parameters) and the
//! legal nested child components. The tables are plain statics built at
//! compile time; [`GrammarRegistry::shared`] exposes the verified,
//! process-wide instance. Nothing in here is mutable after startup.
//!
//! The parsing and serializing engine interprets these descriptors and has
//! no per-component knowledge of its own; adding a property or component is
//! a table edit, not an engine change.

mod v1;
mod v2;

use std::sync::OnceLock;

use calbind_core::constants::{VERSION_ICALENDAR, VERSION_VCALENDAR};

use crate::cal::core::TypeTag;

/// Value shape of a parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Bare token (`ROLE=CHAIR`, possibly quoted).
    Token,
    /// Calendar address (`SENT-BY="mailto:assistant@example.com"`).
    CalAddress,
    /// URI (`ALTREP="https://example.com/desc.html"`).
    Uri,
}

/// One legal parameter of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Canonical (upper-case) parameter name.
    pub name: &'static str,
    pub kind: ParamKind,
}

impl ParameterDescriptor {
    pub const fn token(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Token,
        }
    }

    pub const fn cal_address(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::CalAddress,
        }
    }

    pub const fn uri(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Uri,
        }
    }
}

/// Transfer encoding a binary alternative accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base64,
    /// Legacy vCalendar 1.0 encoding.
    QuotedPrintable,
}

impl Encoding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "BASE64",
            Self::QuotedPrintable => "QUOTED-PRINTABLE",
        }
    }

    /// Resolves an `ENCODING=` parameter token (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BASE64" | "B" => Some(Self::Base64),
            "QUOTED-PRINTABLE" => Some(Self::QuotedPrintable),
            _ => None,
        }
    }
}

/// One candidate value type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub tag: TypeTag,
    /// Whether the value is a `,`-separated homogeneous list.
    pub list: bool,
    /// Accepted transfer encodings; empty for everything except binary.
    pub encodings: &'static [Encoding],
}

impl Alternative {
    pub const fn of(tag: TypeTag) -> Self {
        Self {
            tag,
            list: false,
            encodings: &[],
        }
    }

    pub const fn list_of(tag: TypeTag) -> Self {
        Self {
            tag,
            list: true,
            encodings: &[],
        }
    }

    pub const fn binary(encodings: &'static [Encoding]) -> Self {
        Self {
            tag: TypeTag::Binary,
            list: false,
            encodings,
        }
    }
}

/// Candidate value types of a property, in resolution order.
///
/// `OneOf` declares a polymorphic property: an explicit `VALUE=` parameter
/// pins one alternative, otherwise the first whose codec succeeds wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Fixed(Alternative),
    OneOf(&'static [Alternative]),
}

/// How many occurrences of a property a component may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Singleton,
    Repeatable,
}

/// One legal property of a component.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDescriptor {
    /// Canonical (upper-case) property name.
    pub name: &'static str,
    pub shape: ValueShape,
    /// Legal parameters, keyed by canonical name.
    pub params: &'static [ParameterDescriptor],
    pub cardinality: Cardinality,
}

impl PropertyDescriptor {
    pub const fn singleton(
        name: &'static str,
        shape: ValueShape,
        params: &'static [ParameterDescriptor],
    ) -> Self {
        Self {
            name,
            shape,
            params,
            cardinality: Cardinality::Singleton,
        }
    }

    pub const fn repeatable(
        name: &'static str,
        shape: ValueShape,
        params: &'static [ParameterDescriptor],
    ) -> Self {
        Self {
            name,
            shape,
            params,
            cardinality: Cardinality::Repeatable,
        }
    }

    /// Candidate value types in declaration order.
    #[must_use]
    pub fn alternatives(&self) -> &[Alternative] {
        match &self.shape {
            ValueShape::Fixed(alt) => std::slice::from_ref(alt),
            ValueShape::OneOf(alts) => alts,
        }
    }

    /// Returns the alternative a `VALUE=` tag pins, if declared.
    #[must_use]
    pub fn alternative_for(&self, tag: TypeTag) -> Option<&Alternative> {
        self.alternatives().iter().find(|a| a.tag == tag)
    }

    /// Returns the declared parameter with the given canonical name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.params.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        matches!(self.cardinality, Cardinality::Singleton)
    }
}

/// One legal component type: its properties and legal children.
#[derive(Debug)]
pub struct ComponentDescriptor {
    /// Canonical (upper-case) component name.
    pub name: &'static str,
    pub properties: &'static [PropertyDescriptor],
    pub children: &'static [&'static ComponentDescriptor],
}

impl ComponentDescriptor {
    /// Returns the descriptor of the named property (canonical name match).
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns the descriptor of the named child component.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&'static ComponentDescriptor> {
        self.children.iter().find(|c| c.name == name).copied()
    }
}

/// The immutable mapping from format version to root descriptor.
pub struct GrammarRegistry {
    versions: &'static [(&'static str, &'static ComponentDescriptor)],
}

static SHARED: OnceLock<GrammarRegistry> = OnceLock::new();

static VERSIONS: [(&str, &ComponentDescriptor); 2] = [
    (VERSION_VCALENDAR, &v1::ROOT),
    (VERSION_ICALENDAR, &v2::ROOT),
];

impl GrammarRegistry {
    /// Returns the process-wide registry, building and verifying it on first
    /// use.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::new)
    }

    fn new() -> Self {
        let registry = Self {
            versions: &VERSIONS,
        };
        registry.verify();
        registry
    }

    /// Resolves a declared format version to its root descriptor.
    #[must_use]
    pub fn resolve(&self, version: &str) -> Option<&'static ComponentDescriptor> {
        self.versions
            .iter()
            .find(|(v, _)| *v == version)
            .map(|(_, root)| *root)
    }

    /// The registered version strings.
    #[must_use]
    pub fn versions(&self) -> Vec<&'static str> {
        self.versions.iter().map(|(v, _)| *v).collect()
    }

    /// Checks the construction-time invariants of every registered grammar.
    ///
    /// A violation is a programming error in the tables, not a data error,
    /// so it panics; it is caught at process start (and by the unit tests
    /// below), never mid-parse.
    ///
    /// ## Panics
    /// Panics when a table breaks an invariant: duplicate versions, empty
    /// candidate lists, a polymorphic property without a `VALUE` parameter,
    /// a binary alternative without an `ENCODING` parameter, duplicate or
    /// non-canonical names.
    pub fn verify(&self) {
        for (i, (version, root)) in self.versions.iter().enumerate() {
            assert!(
                !self.versions[..i].iter().any(|(v, _)| v == version),
                "grammar version {version} registered twice"
            );
            verify_component(root);
        }
    }
}

fn verify_component(component: &ComponentDescriptor) {
    assert!(
        !component.name.is_empty() && component.name == component.name.to_ascii_uppercase(),
        "component name {:?} is not canonical",
        component.name
    );

    for (i, property) in component.properties.iter().enumerate() {
        assert!(
            property.name == property.name.to_ascii_uppercase(),
            "property name {:?} in {} is not canonical",
            property.name,
            component.name
        );
        assert!(
            !component.properties[..i].iter().any(|p| p.name == property.name),
            "property {} declared twice in {}",
            property.name,
            component.name
        );
        verify_property(component.name, property);
    }

    for (i, child) in component.children.iter().enumerate() {
        assert!(
            !component.children[..i].iter().any(|c| c.name == child.name),
            "child {} declared twice in {}",
            child.name,
            component.name
        );
        verify_component(child);
    }
}

fn verify_property(component: &str, property: &PropertyDescriptor) {
    let alternatives = property.alternatives();
    assert!(
        !alternatives.is_empty(),
        "property {}.{} has an empty candidate-type list",
        component,
        property.name
    );

    for (i, alt) in alternatives.iter().enumerate() {
        assert!(
            !alternatives[..i].iter().any(|a| a.tag == alt.tag),
            "property {}.{} declares type {} twice",
            component,
            property.name,
            alt.tag
        );
    }

    if alternatives.len() > 1 {
        assert!(
            property.parameter("VALUE").is_some(),
            "polymorphic property {}.{} does not declare the VALUE parameter",
            component,
            property.name
        );
    }

    if alternatives.iter().any(|a| !a.encodings.is_empty()) {
        assert!(
            property.parameter("ENCODING").is_some(),
            "binary property {}.{} does not declare the ENCODING parameter",
            component,
            property.name
        );
    }

    for (i, param) in property.params.iter().enumerate() {
        assert!(
            param.name == param.name.to_ascii_uppercase(),
            "parameter name {:?} on {}.{} is not canonical",
            param.name,
            component,
            property.name
        );
        assert!(
            !property.params[..i].iter().any(|p| p.name == param.name),
            "parameter {} declared twice on {}.{}",
            param.name,
            component,
            property.name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_registry_verifies() {
        // new() runs verify(); a table regression panics here.
        let registry = GrammarRegistry::shared();
        assert_eq!(registry.versions(), vec!["1.0", "2.0"]);
    }

    #[test]
    fn version_table_resolves_every_registered_root() {
        let registry = GrammarRegistry::shared();
        for version in ["1.0", "2.0"] {
            assert_eq!(registry.resolve(version).unwrap().name, "VCALENDAR");
        }
    }

    #[test]
    fn unknown_version_does_not_resolve() {
        assert!(GrammarRegistry::shared().resolve("3.0").is_none());
        assert!(GrammarRegistry::shared().resolve("2.0").is_some());
    }

    #[test]
    fn v2_component_tree_shape() {
        let root = GrammarRegistry::shared().resolve("2.0").unwrap();
        assert_eq!(root.name, "VCALENDAR");

        let event = root.child("VEVENT").unwrap();
        let alarm = event.child("VALARM").unwrap();
        assert!(alarm.children.is_empty());

        let timezone = root.child("VTIMEZONE").unwrap();
        assert!(timezone.child("STANDARD").is_some());
        assert!(timezone.child("DAYLIGHT").is_some());
        assert!(root.child("VALARM").is_none());
    }

    #[test]
    fn v2_trigger_is_polymorphic() {
        let root = GrammarRegistry::shared().resolve("2.0").unwrap();
        let alarm = root.child("VEVENT").unwrap().child("VALARM").unwrap();
        let trigger = alarm.property("TRIGGER").unwrap();

        assert!(trigger.is_singleton());
        assert_eq!(trigger.alternatives().len(), 2);
        // Declaration order: the RFC default (relative offset) first.
        assert_eq!(trigger.alternatives()[0].tag, TypeTag::Duration);
        assert!(trigger.alternative_for(TypeTag::DateTime).is_some());
        assert!(trigger.parameter("RELATED").is_some());
    }

    #[test]
    fn v1_keeps_rrule_opaque() {
        let root = GrammarRegistry::shared().resolve("1.0").unwrap();
        let event = root.child("VEVENT").unwrap();
        let rrule = event.property("RRULE").unwrap();
        assert_eq!(rrule.alternatives()[0].tag, TypeTag::Text);
        // v1 has no nested alarms; they travel as properties.
        assert!(event.child("VALARM").is_none());
        assert!(event.property("AALARM").is_some());
    }
}
