//! Mapping rules for events (VEVENT).

use calbind_core::config::DecodeOptions;
use calbind_core::model::{
    Alarm, AlarmAction, Attachment, Event, EventTime, RepeatRule, Transparency, Trigger,
};

use super::rule::{ExtensionRule, MappingRule, TextRule};
use super::timezone;
use crate::cal::codec::value as value_codec;
use crate::cal::core::{
    Date as WireDate, DateTime as WireDateTime, Parameter, ParsedComponent, PropertyOccurrence,
    TypeTag, Value,
};
use crate::cal::warning::ConversionWarning;

/// Every rule that makes up the event mapping, in import order.
pub(super) static RULES: &[&dyn MappingRule<Event>] = &[
    &TextRule {
        claims: &["UID"],
        read: |e: &Event| e.uid.as_deref(),
        write: |e, v| e.uid = Some(v),
    },
    &TextRule {
        claims: &["SUMMARY"],
        read: |e: &Event| e.summary.as_deref(),
        write: |e, v| e.summary = Some(v),
    },
    &TextRule {
        claims: &["DESCRIPTION"],
        read: |e: &Event| e.description.as_deref(),
        write: |e, v| e.description = Some(v),
    },
    &TextRule {
        claims: &["LOCATION"],
        read: |e: &Event| e.location.as_deref(),
        write: |e, v| e.location = Some(v),
    },
    &TimeRule {
        claims: &["DTSTART"],
        read: |e: &Event| e.start,
        write: |e, t| e.start = Some(t),
    },
    &TimeRule {
        claims: &["DTEND"],
        read: |e: &Event| e.end,
        write: |e, t| e.end = Some(t),
    },
    &TranspRule,
    &AlarmsRule,
    &ExtensionRule {
        claimed: CLAIMED,
        read: |e: &Event| &e.extended,
        push: |e, p| e.extended.push(p),
    },
];

/// Wire names the rules above own; everything else passes through as an
/// extension.
const CLAIMED: &[&str] = &[
    "UID",
    "SUMMARY",
    "DESCRIPTION",
    "LOCATION",
    "DTSTART",
    "DTEND",
    "TRANSP",
    "AALARM",
    "DALARM",
];

/// A rule for a date-or-date-time attribute.
struct TimeRule {
    claims: &'static [&'static str],
    read: fn(&Event) -> Option<EventTime>,
    write: fn(&mut Event, EventTime),
}

impl MappingRule<Event> for TimeRule {
    fn claims(&self) -> &'static [&'static str] {
        self.claims
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut Event,
        options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    ) {
        let name = self.claims[0];
        let resolved = match component.property_value(name) {
            Some(Value::Date(date)) => timezone::resolve_event_date(*date, name, warnings),
            Some(Value::DateTime(value)) => {
                timezone::resolve_event_time(value, name, &options.timezone, warnings)
            }
            Some(_) => {
                warnings.push(ConversionWarning::new(
                    name,
                    "value is neither a date nor a date-time",
                ));
                None
            }
            None => None,
        };
        if let Some(time) = resolved {
            (self.write)(target, time);
        }
    }

    fn export(&self, source: &Event, component: &mut ParsedComponent) {
        let name = self.claims[0];
        match (self.read)(source) {
            Some(EventTime::Date(date)) => {
                let occurrence = PropertyOccurrence {
                    name: name.to_string(),
                    tag: Some(TypeTag::Date),
                    params: Vec::new(),
                    value: Value::Date(WireDate::from_naive(date)),
                }
                .with_param(Parameter::value_type(TypeTag::Date.as_str()));
                component.push_property(occurrence);
            }
            Some(EventTime::Utc(instant)) => {
                component.push_property(PropertyOccurrence::date_time(
                    name,
                    WireDateTime::from_utc(instant),
                ));
            }
            Some(EventTime::Floating(naive)) => {
                component.push_property(PropertyOccurrence::date_time(
                    name,
                    WireDateTime::from_naive(naive),
                ));
            }
            None => {}
        }
    }
}

/// TRANSP is a token in 2.0 and a numeric transparency level in 1.0; zero
/// means busy in the legacy form.
struct TranspRule;

impl MappingRule<Event> for TranspRule {
    fn claims(&self) -> &'static [&'static str] {
        &["TRANSP"]
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut Event,
        _options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    ) {
        match component.property_value("TRANSP") {
            Some(Value::Text(token)) => {
                target.transparency = Transparency::parse(token);
                if target.transparency.is_none() {
                    warnings.push(ConversionWarning::new(
                        "TRANSP",
                        format!("unrecognized transparency {token}"),
                    ));
                }
            }
            Some(Value::Integer(level)) => {
                target.transparency = Some(if *level == 0 {
                    Transparency::Opaque
                } else {
                    Transparency::Transparent
                });
            }
            Some(_) | None => {}
        }
    }

    fn export(&self, source: &Event, component: &mut ParsedComponent) {
        if let Some(transparency) = source.transparency {
            component.push_property(PropertyOccurrence::text("TRANSP", transparency.as_str()));
        }
    }
}

/// Alarms arrive either as nested VALARM components (2.0) or as AALARM and
/// DALARM property lines (1.0). Export always writes the nested form.
struct AlarmsRule;

impl MappingRule<Event> for AlarmsRule {
    fn claims(&self) -> &'static [&'static str] {
        &["AALARM", "DALARM"]
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut Event,
        options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    ) {
        for child in component.children_named("VALARM") {
            let (alarm, alarm_warnings) = super::import_alarm(child, options);
            warnings.extend(alarm_warnings);
            target.alarms.push(alarm);
        }

        for (name, action) in [("AALARM", AlarmAction::Audio), ("DALARM", AlarmAction::Display)] {
            for occurrence in component.properties_named(name) {
                if let Some(text) = occurrence.value.as_text()
                    && let Some(alarm) = legacy_alarm(name, action, text, options, warnings)
                {
                    target.alarms.push(alarm);
                }
            }
        }
    }

    fn export(&self, source: &Event, component: &mut ParsedComponent) {
        component.remove_children("VALARM");
        for alarm in &source.alarms {
            let mut child = ParsedComponent::new("VALARM");
            super::export_alarm(alarm, &mut child);
            component.children.push(child);
        }
    }
}

/// Interprets a legacy semicolon-structured alarm value:
/// `runTime;snoozeGap;repeatCount;payload`.
///
/// Trailing fields may be empty or absent. The payload is an audio reference
/// for AALARM and display text for DALARM.
fn legacy_alarm(
    property: &str,
    action: AlarmAction,
    text: &str,
    options: &DecodeOptions,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<Alarm> {
    let mut fields = text.splitn(4, ';').map(str::trim);
    let run_time = fields.next().unwrap_or_default();
    let snooze = fields.next().unwrap_or_default();
    let count = fields.next().unwrap_or_default();
    let payload = fields.next().unwrap_or_default();

    let trigger = if run_time.is_empty() {
        Trigger::default()
    } else {
        match value_codec::decode_datetime(run_time, None) {
            Ok(value) => timezone::resolve_instant(&value, property, &options.timezone, warnings)
                .map_or_else(Trigger::default, Trigger::absolute),
            Err(failure) => {
                warnings.push(ConversionWarning::decode(property, failure));
                return None;
            }
        }
    };

    let mut alarm = Alarm {
        action: Some(action),
        trigger,
        ..Alarm::default()
    };

    let repeat_count = match count.parse::<u32>() {
        Ok(n) => n,
        Err(_) if count.is_empty() => 0,
        Err(_) => {
            warnings.push(ConversionWarning::new(
                property,
                format!("unreadable repeat count {count}"),
            ));
            0
        }
    };
    if repeat_count > 0 {
        match value_codec::decode_positive_duration(snooze) {
            Ok(gap) => {
                alarm.repeat = Some(RepeatRule {
                    count: repeat_count,
                    gap: gap.to_chrono(),
                });
            }
            Err(_) => warnings.push(ConversionWarning::new(
                property,
                "repeat count without a readable snooze gap; repeat schedule dropped",
            )),
        }
    }

    if !payload.is_empty() {
        match action {
            AlarmAction::Audio => alarm.attach = Some(Attachment::Uri(payload.to_string())),
            _ => alarm.description = Some(payload.to_string()),
        }
    }

    Some(alarm)
}
