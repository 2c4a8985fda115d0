//! Grammar-agnostic serialization engine.
//!
//! Serialization is the mirror of parsing but needs no grammar lookups: every
//! occurrence already knows its resolved type, and extension values are
//! emitted verbatim. Occurrence and child order is preserved.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::cal::core::{Document, ParsedComponent, PropertyOccurrence, Value};

/// Serializes a document to wire text: CRLF line endings, lines folded at 75
/// octets.
#[tracing::instrument(skip_all, fields(version = %document.version))]
#[must_use]
pub fn serialize(document: &Document) -> String {
    let mut out = String::new();
    write_component(&mut out, &document.root);
    out
}

fn write_component(out: &mut String, component: &ParsedComponent) {
    push_line(out, &format!("BEGIN:{}", component.name));
    for property in &component.properties {
        push_line(out, &content_line(property));
    }
    for child in &component.children {
        write_component(out, child);
    }
    push_line(out, &format!("END:{}", component.name));
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(&fold_line(line));
    out.push_str("\r\n");
}

fn content_line(property: &PropertyOccurrence) -> String {
    let mut line = property.name.clone();
    for param in &property.params {
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        for (i, value) in param.values.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(&escape_param_value(value));
        }
    }
    line.push(':');
    line.push_str(&encode_value(&property.value));
    line
}

/// Encodes one resolved value as its wire token (no parameters, no name).
#[must_use]
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Text(text) => escape_text(text),
        // Extension payloads are never re-escaped.
        Value::Unknown(raw) => raw.clone(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(true) => "TRUE".to_string(),
        Value::Boolean(false) => "FALSE".to_string(),
        Value::Date(date) => date.to_string(),
        Value::Time(time) => time.to_string(),
        Value::DateTime(dt) => dt.to_string(),
        Value::Duration(duration) => duration.to_string(),
        Value::Period(period) => period.to_string(),
        Value::UtcOffset(offset) => offset.to_string(),
        Value::Uri(uri) | Value::CalAddress(uri) => uri.clone(),
        Value::Geo {
            latitude,
            longitude,
        } => format!("{latitude};{longitude}"),
        Value::Binary(bytes) => STANDARD.encode(bytes),
        Value::Recur(recur) => recur.to_string(),
        Value::List(items) => {
            let encoded: Vec<String> = items.iter().map(encode_value).collect();
            encoded.join(",")
        }
    }
}
