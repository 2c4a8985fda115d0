//! Mapping rules for alarms (VALARM).

use calbind_core::config::DecodeOptions;
use calbind_core::model::{Alarm, AlarmAction, Attachment, RepeatRule, Trigger, TriggerEdge};

use super::rule::{ExtensionRule, MappingRule, TextRule};
use super::timezone;
use crate::cal::core::{
    DateTime as WireDateTime, Duration as WireDuration, Parameter, ParsedComponent,
    PropertyOccurrence, TypeTag, Value,
};
use crate::cal::warning::ConversionWarning;

/// Every rule that makes up the alarm mapping, in import order.
pub(super) static RULES: &[&dyn MappingRule<Alarm>] = &[
    &ActionRule,
    &TriggerRule,
    &RepeatDurationRule,
    &TextRule {
        claims: &["DESCRIPTION"],
        read: |a: &Alarm| a.description.as_deref(),
        write: |a, v| a.description = Some(v),
    },
    &TextRule {
        claims: &["SUMMARY"],
        read: |a: &Alarm| a.summary.as_deref(),
        write: |a, v| a.summary = Some(v),
    },
    &AttachRule,
    &ExtensionRule {
        claimed: CLAIMED,
        read: |a: &Alarm| &a.extended,
        push: |a, p| a.extended.push(p),
    },
];

/// Wire names the rules above own; everything else passes through as an
/// extension.
const CLAIMED: &[&str] = &[
    "ACTION",
    "TRIGGER",
    "REPEAT",
    "DURATION",
    "DESCRIPTION",
    "SUMMARY",
    "ATTACH",
];

struct ActionRule;

impl MappingRule<Alarm> for ActionRule {
    fn claims(&self) -> &'static [&'static str] {
        &["ACTION"]
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut Alarm,
        _options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    ) {
        if let Some(token) = component.property_text("ACTION") {
            target.action = AlarmAction::parse(token);
            if target.action.is_none() {
                warnings.push(ConversionWarning::new(
                    "ACTION",
                    format!("unrecognized alarm action {token}"),
                ));
            }
        }
    }

    fn export(&self, source: &Alarm, component: &mut ParsedComponent) {
        if let Some(action) = source.action {
            component.push_property(PropertyOccurrence::text("ACTION", action.as_str()));
        }
    }
}

/// TRIGGER is polymorphic on the wire: a signed duration relative to the
/// parent component, or an absolute date-time. The resolved type tag of the
/// occurrence tells the two forms apart.
struct TriggerRule;

impl MappingRule<Alarm> for TriggerRule {
    fn claims(&self) -> &'static [&'static str] {
        &["TRIGGER"]
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut Alarm,
        options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    ) {
        let Some(occurrence) = component.property("TRIGGER") else {
            return;
        };

        match &occurrence.value {
            Value::Duration(duration) => {
                let mut trigger = Trigger::relative(duration.to_chrono());
                if let Some(token) = occurrence.get_param_value("RELATED") {
                    trigger.related = TriggerEdge::parse(token);
                    if trigger.related.is_none() {
                        warnings.push(ConversionWarning::new(
                            "TRIGGER",
                            format!("unrecognized RELATED edge {token}"),
                        ));
                    }
                }
                target.trigger = trigger;
            }
            Value::DateTime(value) => {
                if let Some(instant) =
                    timezone::resolve_instant(value, "TRIGGER", &options.timezone, warnings)
                {
                    target.trigger = Trigger::absolute(instant);
                }
            }
            _ => warnings.push(ConversionWarning::new(
                "TRIGGER",
                "trigger value is neither a duration nor a date-time",
            )),
        }
    }

    fn export(&self, source: &Alarm, component: &mut ParsedComponent) {
        if let Some(instant) = source.trigger.date_time {
            component.push_property(
                PropertyOccurrence::date_time("TRIGGER", WireDateTime::from_utc(instant))
                    .with_param(Parameter::value_type(TypeTag::DateTime.as_str())),
            );
        } else if let Some(offset) = source.trigger.duration {
            let mut occurrence =
                PropertyOccurrence::duration("TRIGGER", WireDuration::from_chrono(offset));
            // START is the wire default and stays implicit.
            if source.trigger.related == Some(TriggerEdge::End) {
                occurrence = occurrence.with_param(Parameter::related(TriggerEdge::End.as_str()));
            }
            component.push_property(occurrence);
        }
    }
}

/// REPEAT and DURATION only mean something together: the count says how many
/// extra firings, the duration the gap between them. Each side decodes on its
/// own; the pairing check happens here, after both are in hand.
struct RepeatDurationRule;

impl MappingRule<Alarm> for RepeatDurationRule {
    fn claims(&self) -> &'static [&'static str] {
        &["REPEAT", "DURATION"]
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut Alarm,
        _options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    ) {
        let count = component
            .property_value("REPEAT")
            .and_then(Value::as_integer);
        let gap = component
            .property_value("DURATION")
            .and_then(Value::as_duration);

        match (count, gap) {
            (Some(count), Some(gap)) => {
                if count < 0 {
                    warnings.push(ConversionWarning::new(
                        "REPEAT",
                        format!("negative repeat count {count}"),
                    ));
                    return;
                }
                if gap.negative {
                    warnings.push(ConversionWarning::new(
                        "DURATION",
                        format!("negative repeat gap {gap}"),
                    ));
                    return;
                }
                target.repeat = Some(RepeatRule {
                    count: count.unsigned_abs(),
                    gap: gap.to_chrono(),
                });
            }
            (Some(_), None) => warnings.push(ConversionWarning::cross_field(
                "REPEAT",
                "DURATION",
                "REPEAT without a DURATION gap; repeat schedule dropped",
            )),
            (None, Some(_)) => warnings.push(ConversionWarning::cross_field(
                "DURATION",
                "REPEAT",
                "DURATION without a REPEAT count; repeat schedule dropped",
            )),
            (None, None) => {}
        }
    }

    fn export(&self, source: &Alarm, component: &mut ParsedComponent) {
        if let Some(repeat) = &source.repeat {
            component.push_property(PropertyOccurrence::integer(
                "REPEAT",
                i32::try_from(repeat.count).unwrap_or(i32::MAX),
            ));
            component.push_property(PropertyOccurrence::duration(
                "DURATION",
                WireDuration::from_chrono(repeat.gap),
            ));
        }
    }
}

struct AttachRule;

impl MappingRule<Alarm> for AttachRule {
    fn claims(&self) -> &'static [&'static str] {
        &["ATTACH"]
    }

    fn import(
        &self,
        component: &ParsedComponent,
        target: &mut Alarm,
        _options: &DecodeOptions,
        warnings: &mut Vec<ConversionWarning>,
    ) {
        let Some(occurrence) = component.property("ATTACH") else {
            return;
        };

        match &occurrence.value {
            Value::Uri(uri) => target.attach = Some(Attachment::Uri(uri.clone())),
            Value::Binary(data) => {
                target.attach = Some(Attachment::Binary {
                    media_type: occurrence.get_param_value("FMTTYPE").map(str::to_string),
                    data: data.clone(),
                });
            }
            _ => warnings.push(ConversionWarning::new(
                "ATTACH",
                "attachment value is neither a URI nor binary data",
            )),
        }
    }

    fn export(&self, source: &Alarm, component: &mut ParsedComponent) {
        match &source.attach {
            Some(Attachment::Uri(uri)) => {
                component.push_property(PropertyOccurrence::uri("ATTACH", uri));
            }
            Some(Attachment::Binary { media_type, data }) => {
                let mut occurrence = PropertyOccurrence {
                    name: "ATTACH".to_string(),
                    tag: Some(TypeTag::Binary),
                    params: Vec::new(),
                    value: Value::Binary(data.clone()),
                }
                .with_param(Parameter::value_type(TypeTag::Binary.as_str()))
                .with_param(Parameter::encoding_base64());
                if let Some(media_type) = media_type {
                    occurrence = occurrence.with_param(Parameter::fmttype(media_type));
                }
                component.push_property(occurrence);
            }
            None => {}
        }
    }
}
