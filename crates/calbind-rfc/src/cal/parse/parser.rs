//! Grammar-driven parsing engine.
//!
//! The engine walks logical content lines with an explicit component stack
//! and interprets the grammar descriptors as it goes; it carries no knowledge
//! of any particular component or property. Structure violations abort the
//! parse; everything value-level degrades to a [`ConversionWarning`] and the
//! offending line or element is dropped.

use calbind_core::config::DecodeOptions;

use super::error::{StructuralError, StructuralErrorKind};
use super::lexer;
use crate::cal::codec;
use crate::cal::codec::parameter as param_codec;
use crate::cal::core::{
    ContentLine, Document, Parameter, ParsedComponent, PropertyOccurrence, TypeTag, Value,
};
use crate::cal::grammar::{ComponentDescriptor, GrammarRegistry, PropertyDescriptor};
use crate::cal::warning::ConversionWarning;

/// The result of a successful parse: the document plus every non-fatal
/// diagnostic gathered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub document: Document,
    pub warnings: Vec<ConversionWarning>,
}

/// Parses one calendar document.
///
/// The declared `VERSION` selects the grammar; the engine then accepts only
/// components the grammar nests and decodes property values against their
/// declared candidate types. Properties the grammar does not describe pass
/// through verbatim as extensions.
///
/// ## Errors
/// Returns a [`StructuralError`] when the block structure is broken or the
/// version is missing or unregistered. Value-level problems are reported in
/// [`ParseOutcome::warnings`] instead.
#[tracing::instrument(skip_all, fields(bytes = input.len()))]
pub fn parse(input: &str, options: &DecodeOptions) -> Result<ParseOutcome, StructuralError> {
    let lines = lexer::split_lines(input);

    let Some((first_line, first)) = lines.first() else {
        return Err(StructuralError::new(StructuralErrorKind::MissingBegin, 1));
    };
    if !first.to_ascii_uppercase().starts_with("BEGIN:") {
        return Err(StructuralError::new(
            StructuralErrorKind::MissingBegin,
            *first_line,
        ));
    }

    let version = declared_version(&lines)
        .ok_or_else(|| StructuralError::new(StructuralErrorKind::MissingVersion, *first_line))?;
    let root_descriptor = GrammarRegistry::shared().resolve(&version).ok_or_else(|| {
        StructuralError::new(StructuralErrorKind::UnsupportedVersion, *first_line)
            .with_context(format!("VERSION:{version}"))
    })?;

    let mut warnings = Vec::new();
    let mut stack = Vec::new();
    let mut root: Option<ParsedComponent> = None;

    for (line_no, line) in &lines {
        let content = match lexer::tokenize_line(line) {
            Ok(content) => content,
            Err(err) => {
                warnings.push(ConversionWarning::new(
                    line_name(line),
                    format!("skipped malformed line {line_no}: {err}"),
                ));
                continue;
            }
        };

        match content.name.as_str() {
            "BEGIN" => {
                open_component(&mut stack, root.is_some(), root_descriptor, &content, *line_no)?;
            }
            "END" => close_component(&mut stack, &mut root, &content, *line_no)?,
            _ => {
                let Some(&mut (descriptor, ref mut component, _)) = stack.last_mut() else {
                    return Err(StructuralError::new(
                        StructuralErrorKind::MissingBegin,
                        *line_no,
                    )
                    .with_context(format!("property {} outside any component", content.name)));
                };
                if let Some(occurrence) =
                    decode_property(descriptor, &content, options, &mut warnings)
                {
                    push_occurrence(descriptor, component, occurrence, &mut warnings);
                }
            }
        }
    }

    if let Some((descriptor, _, begin_line)) = stack.last() {
        return Err(
            StructuralError::new(StructuralErrorKind::MissingEnd, *begin_line)
                .with_context(format!("BEGIN:{} is never closed", descriptor.name)),
        );
    }
    let root = root.ok_or_else(|| {
        StructuralError::new(StructuralErrorKind::MissingBegin, *first_line)
            .with_context("no component in input")
    })?;

    tracing::debug!(version = %version, warnings = warnings.len(), "parsed document");
    Ok(ParseOutcome {
        document: Document { version, root },
        warnings,
    })
}

/// One open component: its grammar descriptor, the component under
/// construction, and the line of its `BEGIN`.
type Frame = (&'static ComponentDescriptor, ParsedComponent, usize);

fn open_component(
    stack: &mut Vec<Frame>,
    root_closed: bool,
    root_descriptor: &'static ComponentDescriptor,
    content: &ContentLine,
    line_no: usize,
) -> Result<(), StructuralError> {
    let name = content.raw_value.trim().to_ascii_uppercase();
    let descriptor = match stack.last() {
        Some((parent, _, _)) => parent.child(&name).ok_or_else(|| {
            StructuralError::new(StructuralErrorKind::UnknownComponent, line_no)
                .with_context(format!("BEGIN:{name}"))
        })?,
        None if root_closed => {
            return Err(StructuralError::new(
                StructuralErrorKind::MissingBegin,
                line_no,
            )
            .with_context("content after the document's final END"));
        }
        None => {
            if name != root_descriptor.name {
                return Err(StructuralError::new(
                    StructuralErrorKind::UnknownComponent,
                    line_no,
                )
                .with_context(format!("expected BEGIN:{}", root_descriptor.name)));
            }
            root_descriptor
        }
    };
    stack.push((descriptor, ParsedComponent::new(&name), line_no));
    Ok(())
}

fn close_component(
    stack: &mut Vec<Frame>,
    root: &mut Option<ParsedComponent>,
    content: &ContentLine,
    line_no: usize,
) -> Result<(), StructuralError> {
    let name = content.raw_value.trim().to_ascii_uppercase();
    let Some((descriptor, component, _)) = stack.pop() else {
        return Err(
            StructuralError::new(StructuralErrorKind::MismatchedEnd, line_no)
                .with_context(format!("END:{name} with no open component")),
        );
    };
    if descriptor.name != name {
        return Err(
            StructuralError::new(StructuralErrorKind::MismatchedEnd, line_no)
                .with_context(format!("expected END:{}, got END:{name}", descriptor.name)),
        );
    }
    match stack.last_mut() {
        Some((_, parent, _)) => parent.children.push(component),
        None => *root = Some(component),
    }
    Ok(())
}

/// Pre-scans for the root-level `VERSION` property, tracking nesting depth
/// so a VERSION inside a nested component is not mistaken for the document's.
fn declared_version(lines: &[(usize, String)]) -> Option<String> {
    let mut depth = 0usize;
    for (_, line) in lines {
        let Some(name_end) = line.find([';', ':']) else {
            continue;
        };
        let name = line[..name_end].to_ascii_uppercase();
        match name.as_str() {
            "BEGIN" => depth += 1,
            "END" => depth = depth.saturating_sub(1),
            "VERSION" if depth == 1 => {
                let value = line[name_end..].split_once(':')?.1.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Decodes one content line against its component's grammar.
///
/// Returns `None` when the value cannot be decoded as any candidate type;
/// the failure is recorded as a warning and the occurrence is dropped.
fn decode_property(
    descriptor: &ComponentDescriptor,
    line: &ContentLine,
    options: &DecodeOptions,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<PropertyOccurrence> {
    let Some(property) = descriptor.property(&line.name) else {
        // Extension passthrough: name, parameters, and raw value verbatim,
        // and no diagnostic.
        return Some(PropertyOccurrence {
            name: line.name.clone(),
            tag: None,
            params: line.params.clone(),
            value: Value::Unknown(line.raw_value.clone()),
        });
    };

    let params = decode_parameters(property, line, options, warnings);
    let tzid = line.tzid();
    let encoding = line.get_param_value("ENCODING");

    let (tag, value) = decode_value(property, line, tzid, encoding, warnings)?;
    Some(PropertyOccurrence {
        name: line.name.clone(),
        tag: Some(tag),
        params,
        value,
    })
}

/// Decodes the line's parameters against the property's declared slots.
///
/// Declared parameters that fail their codec are dropped with a warning.
/// Undeclared parameters are kept verbatim with a warning, unless strict
/// mode drops them.
fn decode_parameters(
    property: &PropertyDescriptor,
    line: &ContentLine,
    options: &DecodeOptions,
    warnings: &mut Vec<ConversionWarning>,
) -> Vec<Parameter> {
    let mut params = Vec::with_capacity(line.params.len());
    for param in &line.params {
        match property.parameter(&param.name) {
            Some(declared) => {
                let mut decoded = Vec::with_capacity(param.values.len());
                let mut dropped = false;
                for value in &param.values {
                    match param_codec::decode_kind(declared.kind, value) {
                        Ok(value) => decoded.push(value),
                        Err(failure) => {
                            warnings.push(ConversionWarning::decode(
                                format!("{};{}", line.name, param.name),
                                failure,
                            ));
                            dropped = true;
                        }
                    }
                }
                if !dropped || !decoded.is_empty() {
                    params.push(Parameter::with_values(declared.name, decoded));
                }
            }
            None => {
                warnings.push(ConversionWarning::new(
                    format!("{};{}", line.name, param.name),
                    if options.strict_unknown_parameters {
                        "undeclared parameter dropped"
                    } else {
                        "undeclared parameter kept verbatim"
                    },
                ));
                if !options.strict_unknown_parameters {
                    params.push(param.clone());
                }
            }
        }
    }
    params
}

/// Resolves the value type and decodes the raw token.
///
/// An explicit `VALUE=` parameter pins the candidate; otherwise candidates
/// are tried in declaration order and the first success wins.
fn decode_value(
    property: &PropertyDescriptor,
    line: &ContentLine,
    tzid: Option<&str>,
    encoding: Option<&str>,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<(TypeTag, Value)> {
    if let Some(token) = line.value_type() {
        match TypeTag::from_param(token).and_then(|tag| property.alternative_for(tag)) {
            Some(alt) => {
                return match codec::decode_alternative(alt, &line.raw_value, tzid, encoding) {
                    Ok(value) => Some((alt.tag, value)),
                    Err(failure) => {
                        warnings.push(ConversionWarning::decode(&line.name, failure));
                        None
                    }
                };
            }
            None => {
                // Fall through to declaration-order resolution.
                warnings.push(ConversionWarning::new(
                    &line.name,
                    format!("VALUE={token} is not declared for this property"),
                ));
            }
        }
    }

    let mut first_failure = None;
    for alt in property.alternatives() {
        match codec::decode_alternative(alt, &line.raw_value, tzid, encoding) {
            Ok(value) => return Some((alt.tag, value)),
            Err(failure) => {
                if first_failure.is_none() {
                    first_failure = Some(failure);
                }
            }
        }
    }
    if let Some(failure) = first_failure {
        warnings.push(ConversionWarning::decode(&line.name, failure));
    }
    None
}

/// Appends an occurrence, replacing the previous one (with a warning) when
/// the property is a singleton.
fn push_occurrence(
    descriptor: &ComponentDescriptor,
    component: &mut ParsedComponent,
    occurrence: PropertyOccurrence,
    warnings: &mut Vec<ConversionWarning>,
) {
    let is_singleton = descriptor
        .property(&occurrence.name)
        .is_some_and(PropertyDescriptor::is_singleton);
    if is_singleton && component.property(&occurrence.name).is_some() {
        warnings.push(ConversionWarning::duplicate_singleton(&occurrence.name));
        component.remove_properties(&occurrence.name);
    }
    component.push_property(occurrence);
}

/// Best-effort property name of a line that failed to tokenize.
fn line_name(line: &str) -> String {
    line.split([';', ':'])
        .next()
        .unwrap_or(line)
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calbind_core::config::DecodeOptions;

    fn parse_ok(input: &str) -> ParseOutcome {
        parse(input, &DecodeOptions::default()).unwrap()
    }

    const MINIMAL: &str = "BEGIN:VCALENDAR\r\n\
        VERSION:2.0\r\n\
        PRODID:-//Test//Test//EN\r\n\
        BEGIN:VEVENT\r\n\
        UID:1@example.com\r\n\
        DTSTART:20240101T120000Z\r\n\
        SUMMARY:New year lunch\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";

    #[test_log::test]
    fn parses_a_minimal_calendar() {
        let outcome = parse_ok(MINIMAL);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.document.version, "2.0");

        let event = &outcome.document.root.children[0];
        assert_eq!(event.name, "VEVENT");
        assert_eq!(event.property_text("SUMMARY"), Some("New year lunch"));
        assert_eq!(event.property("DTSTART").unwrap().tag, Some(TypeTag::DateTime));
    }

    #[test_log::test]
    fn missing_version_is_structural() {
        let err = parse(
            "BEGIN:VCALENDAR\r\nPRODID:x\r\nEND:VCALENDAR\r\n",
            &DecodeOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::MissingVersion);
    }

    #[test_log::test]
    fn nested_version_does_not_count() {
        let input = "BEGIN:VCALENDAR\r\n\
            PRODID:x\r\n\
            BEGIN:VEVENT\r\n\
            VERSION:2.0\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let err = parse(input, &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::MissingVersion);
    }

    #[test_log::test]
    fn unregistered_version_is_structural() {
        let err = parse(
            "BEGIN:VCALENDAR\r\nVERSION:9.9\r\nEND:VCALENDAR\r\n",
            &DecodeOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::UnsupportedVersion);
    }

    #[test_log::test]
    fn unknown_component_is_structural() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VWEIRD\r\n\
            END:VWEIRD\r\n\
            END:VCALENDAR\r\n";
        let err = parse(input, &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::UnknownComponent);
        assert_eq!(err.line, 3);
    }

    #[test_log::test]
    fn mismatched_end_is_structural() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let err = parse(input, &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::MismatchedEnd);
    }

    #[test_log::test]
    fn unclosed_component_is_structural() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:x\r\n";
        let err = parse(input, &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::MissingEnd);
        assert_eq!(err.line, 3);
    }

    #[test_log::test]
    fn malformed_value_becomes_warning_and_is_dropped() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            DTSTART:not-a-date\r\n\
            SUMMARY:still here\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].property, "DTSTART");

        let event = &outcome.document.root.children[0];
        assert!(event.property("DTSTART").is_none());
        assert_eq!(event.property_text("SUMMARY"), Some("still here"));
    }

    #[test_log::test]
    fn extension_property_passes_through_without_warning() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            X-CUSTOM-FIELD;X-FLAG=yes:raw \\, untouched\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        assert!(outcome.warnings.is_empty());

        let event = &outcome.document.root.children[0];
        let ext = event.property("X-CUSTOM-FIELD").unwrap();
        assert!(ext.tag.is_none());
        assert_eq!(ext.value.as_unknown(), Some("raw \\, untouched"));
        assert_eq!(ext.get_param_value("X-FLAG"), Some("yes"));
    }

    #[test_log::test]
    fn explicit_value_parameter_pins_the_type() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            DTSTART;VALUE=DATE:20240215\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        assert!(outcome.warnings.is_empty());
        let event = &outcome.document.root.children[0];
        assert_eq!(event.property("DTSTART").unwrap().tag, Some(TypeTag::Date));
    }

    #[test_log::test]
    fn trigger_defaults_to_duration_without_value_parameter() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            BEGIN:VALARM\r\n\
            ACTION:DISPLAY\r\n\
            TRIGGER:-PT15M\r\n\
            END:VALARM\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        let alarm = &outcome.document.root.children[0].children[0];
        assert_eq!(alarm.property("TRIGGER").unwrap().tag, Some(TypeTag::Duration));
    }

    #[test_log::test]
    fn duplicate_singleton_keeps_last_with_warning() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            SUMMARY:first\r\n\
            SUMMARY:second\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        assert_eq!(outcome.warnings.len(), 1);
        let event = &outcome.document.root.children[0];
        assert_eq!(event.properties_named("SUMMARY").len(), 1);
        assert_eq!(event.property_text("SUMMARY"), Some("second"));
    }

    #[test_log::test]
    fn strict_mode_drops_undeclared_parameters() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            SUMMARY;X-WEIRD=1:hello\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";

        let lenient = parse_ok(input);
        let event = &lenient.document.root.children[0];
        assert_eq!(
            event.property("SUMMARY").unwrap().get_param_value("X-WEIRD"),
            Some("1")
        );
        assert_eq!(lenient.warnings.len(), 1);

        let strict = parse(
            input,
            &DecodeOptions {
                strict_unknown_parameters: true,
                ..DecodeOptions::default()
            },
        )
        .unwrap();
        let event = &strict.document.root.children[0];
        assert!(event.property("SUMMARY").unwrap().get_param_value("X-WEIRD").is_none());
        assert_eq!(strict.warnings.len(), 1);
    }

    #[test_log::test]
    fn caret_escaped_newline_in_declared_parameter_is_kept() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            ATTENDEE;CN=\"Doe^nCEO\":mailto:doe@example.com\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        assert!(outcome.warnings.is_empty());

        let event = &outcome.document.root.children[0];
        assert_eq!(
            event.property("ATTENDEE").unwrap().get_param_value("CN"),
            Some("Doe\nCEO")
        );
    }

    #[test_log::test]
    fn malformed_line_is_skipped_with_warning() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            THIS LINE HAS NO COLON\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].reason.contains("line 5"));
    }

    #[test_log::test]
    fn legacy_version_selects_the_v1_grammar() {
        let input = "BEGIN:VCALENDAR\r\n\
            VERSION:1.0\r\n\
            BEGIN:VEVENT\r\n\
            UID:1\r\n\
            DTSTART:20240101T090000Z\r\n\
            AALARM:20240101T085000Z;;0;beep.wav\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";
        let outcome = parse_ok(input);
        assert!(outcome.warnings.is_empty());
        let event = &outcome.document.root.children[0];
        assert!(event.property("AALARM").is_some());
    }
}
