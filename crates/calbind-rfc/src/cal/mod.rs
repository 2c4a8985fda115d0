//! Calendar wire format support (RFC 5545 and vCalendar 1.0).
//!
//! ## Overview
//!
//! Parsing resolves the document's declared version against the
//! [`grammar::GrammarRegistry`] and interprets every content line through the
//! resulting descriptor tree; serialization walks the same descriptors in the
//! reverse direction. Neither direction contains component-specific code.
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use calbind_core::DecodeOptions;
//! use calbind_rfc::cal::parse::parse;
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! PRODID:-//Example//Example//EN\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:a@example.com\r\n\
//! SUMMARY:Standup\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let outcome = parse(input, &DecodeOptions::default()).unwrap();
//! assert_eq!(outcome.document.version, "2.0");
//! assert_eq!(outcome.document.root.children.len(), 1);
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use calbind_rfc::cal::build::serialize;
//! use calbind_rfc::cal::core::{Document, PropertyOccurrence};
//!
//! let mut document = Document::new("2.0", "-//Example//Example//EN");
//! let mut event = calbind_rfc::cal::core::ParsedComponent::new("VEVENT");
//! event.push_property(PropertyOccurrence::text("SUMMARY", "Standup"));
//! document.root.children.push(event);
//!
//! let output = serialize(&document);
//! assert!(output.contains("SUMMARY:Standup"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Parsed tree types (`Document`, `ParsedComponent`, values)
//! - [`codec`] - Value and parameter codecs
//! - [`grammar`] - Version-keyed component descriptor trees
//! - [`parse`] - The schema-interpreting parser
//! - [`build`] - The schema-interpreting serializer
//! - [`map`] - Attribute mapping between components and domain objects
//! - [`warning`] - Non-fatal conversion diagnostics

pub mod build;
pub mod codec;
pub mod core;
pub mod grammar;
pub mod map;
pub mod parse;
pub mod warning;

#[cfg(test)]
mod tests;

pub use build::serialize;
pub use core::{Document, ParsedComponent, PropertyOccurrence, Value};
pub use parse::{ParseOutcome, StructuralError, parse};
pub use warning::ConversionWarning;
