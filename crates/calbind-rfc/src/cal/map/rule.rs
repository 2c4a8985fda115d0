//! The per-attribute mapping rule seam.

use calbind_core::config::DecodeOptions;
use calbind_core::model::{ExtendedParameter, ExtendedProperty};

use crate::cal::build::encode_value;
use crate::cal::core::{Parameter, ParsedComponent, PropertyOccurrence, Value};
use crate::cal::warning::ConversionWarning;

/// Maps one attribute (or one tightly coupled group of attributes) between a
/// parsed component and a domain object.
///
/// Rules are stateless statics grouped into per-domain-object slices; the
/// drivers in [`super`] run every rule of a slice in order. `claims` names
/// the wire properties the rule owns: the export driver removes those
/// occurrences before the rule writes, which is what makes a second export
/// over the same component idempotent.
pub trait MappingRule<D>: Sync {
    /// Wire property names this rule reads and writes.
    fn claims(&self) -> &'static [&'static str];

    /// Reads the claimed properties into the domain object, recording
    /// warnings for whatever cannot be interpreted.
    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut D,
        options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    );

    /// Writes the domain attribute back as property occurrences. The claimed
    /// occurrences have already been removed.
    fn export(&self, source: &D, component: &mut ParsedComponent);
}

/// A rule for a plain optional text attribute.
pub struct TextRule<D: 'static> {
    pub claims: &'static [&'static str],
    pub read: fn(&D) -> Option<&str>,
    pub write: fn(&mut D, String),
}

impl<D> MappingRule<D> for TextRule<D> {
    fn claims(&self) -> &'static [&'static str] {
        self.claims
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut D,
        _options: &DecodeOptions,
        _warnings: &mut Vec<ConversionWarning>,
    ) {
        if let Some(text) = component.property_text(self.claims[0]) {
            (self.write)(target, text.to_string());
        }
    }

    fn export(&self, source: &D, component: &mut ParsedComponent) {
        if let Some(text) = (self.read)(source) {
            component.push_property(PropertyOccurrence::text(self.claims[0], text));
        }
    }
}

/// Collects every property no sibling rule claims into the domain object's
/// extension list, and writes them back untouched.
///
/// This covers both grammar-unknown properties (kept verbatim by the parser)
/// and grammar-recognized ones the domain object has no dedicated field for;
/// the latter are re-encoded from their resolved value.
pub struct ExtensionRule<D: 'static> {
    /// Union of the sibling rules' claims; everything else passes through.
    pub claimed: &'static [&'static str],
    pub read: fn(&D) -> &[ExtendedProperty],
    pub push: fn(&mut D, ExtendedProperty),
}

impl<D> MappingRule<D> for ExtensionRule<D> {
    fn claims(&self) -> &'static [&'static str] {
        // Claims are dynamic here; export removes its own names.
        &[]
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut D,
        _options: &DecodeOptions,
        _warnings: &mut Vec<ConversionWarning>,
    ) {
        for property in &component.properties {
            if self.claimed.contains(&property.name.as_str()) {
                continue;
            }
            let value = match &property.value {
                Value::Unknown(raw) => raw.clone(),
                value => encode_value(value),
            };
            (self.push)(
                target,
                ExtendedProperty {
                    name: property.name.clone(),
                    params: property
                        .params
                        .iter()
                        .map(|p| ExtendedParameter {
                            name: p.name.clone(),
                            values: p.values.clone(),
                        })
                        .collect(),
                    value,
                },
            );
        }
    }

    fn export(&self, source: &D, component: &mut ParsedComponent) {
        for property in (self.read)(source) {
            component.remove_properties(&property.name);
        }
        for property in (self.read)(source) {
            let mut occurrence = PropertyOccurrence::extension(&property.name, &property.value);
            occurrence.params = property
                .params
                .iter()
                .map(|p| Parameter::with_values(&p.name, p.values.clone()))
                .collect();
            component.push_property(occurrence);
        }
    }
}
