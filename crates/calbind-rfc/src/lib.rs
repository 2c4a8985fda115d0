//! Schema-driven codec for the vCalendar/iCalendar family of wire formats.
//!
//! The crate is built from five layers, leaves first:
//!
//! 1. [`cal::codec`] — stateless value and parameter codecs.
//! 2. [`cal::grammar`] — immutable, version-keyed descriptor trees naming the
//!    legal properties, parameters, and child components per component type.
//! 3. [`cal::parse`] / [`cal::build`] — one generic engine that interprets the
//!    descriptors in both directions; it carries no per-component logic.
//! 4. [`cal::map`] — per-attribute mapping rules binding parsed components to
//!    the domain objects in `calbind-core`.
//!
//! Malformed values never abort a document: everything short of a broken
//! BEGIN/END structure or an unsupported version is reported through an
//! accumulated list of [`cal::warning::ConversionWarning`]s.
//!
//! ```rust
//! use calbind_core::DecodeOptions;
//! use calbind_rfc::cal::{map, parse::parse};
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! PRODID:-//Example//Example//EN\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:demo@example.com\r\n\
//! SUMMARY:Quarterly review\r\n\
//! BEGIN:VALARM\r\n\
//! ACTION:DISPLAY\r\n\
//! TRIGGER:-PT15M\r\n\
//! DESCRIPTION:Starts soon\r\n\
//! END:VALARM\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let options = DecodeOptions::default();
//! let outcome = parse(input, &options).unwrap();
//! assert!(outcome.warnings.is_empty());
//!
//! let event = &outcome.document.root.children[0];
//! let (alarm, warnings) = map::import_alarm(&event.children[0], &options);
//! assert!(warnings.is_empty());
//! assert_eq!(alarm.trigger.duration, Some(chrono::Duration::minutes(-15)));
//! ```

pub mod cal;
pub mod error;

use calbind_core::DecodeOptions;
use calbind_core::constants::{
    MEDIA_TYPE_ICALENDAR, MEDIA_TYPE_VCALENDAR, VERSION_ICALENDAR, VERSION_VCALENDAR,
};
use calbind_core::model::Event;

use crate::cal::core::{Document, ParsedComponent};
use crate::cal::warning::ConversionWarning;

pub use error::{RfcError, RfcResult};

/// Parses one document and imports every event it contains.
///
/// ## Errors
/// Returns [`RfcError::Structural`] when the block structure or the declared
/// version is broken; value-level problems accumulate in the warning list
/// instead.
pub fn read_events(
    input: &str,
    options: &DecodeOptions,
) -> RfcResult<(Vec<Event>, Vec<ConversionWarning>)> {
    let outcome = cal::parse::parse(input, options)?;
    let mut warnings = outcome.warnings;
    let mut events = Vec::new();
    for component in &outcome.document.root.children {
        if component.name == "VEVENT" {
            let (event, event_warnings) = cal::map::import_event(component, options);
            warnings.extend(event_warnings);
            events.push(event);
        }
    }
    Ok((events, warnings))
}

/// Like [`read_events`], with options loaded from the environment and the
/// optional `calbind.toml` file.
///
/// ## Errors
/// Returns [`RfcError::Core`] when the configuration cannot be loaded, and
/// everything [`read_events`] returns.
pub fn read_events_from_env(input: &str) -> RfcResult<(Vec<Event>, Vec<ConversionWarning>)> {
    let options = DecodeOptions::load()?;
    read_events(input, &options)
}

/// Exports events into a fresh 2.0 document and serializes it.
#[must_use]
pub fn write_events(events: &[Event], prodid: &str) -> String {
    let mut document = Document::new(VERSION_ICALENDAR, prodid);
    for event in events {
        let mut component = ParsedComponent::new("VEVENT");
        cal::map::export_event(event, &mut component);
        document.root.children.push(component);
    }
    cal::build::serialize(&document)
}

/// The MIME content type of a serialized document, version parameter
/// included.
#[must_use]
pub fn media_type(document: &Document) -> &'static str {
    if document.version == VERSION_VCALENDAR {
        MEDIA_TYPE_VCALENDAR
    } else {
        MEDIA_TYPE_ICALENDAR
    }
}
