//! Attribute mapping between parsed components and domain objects.
//!
//! Each domain object has a static slice of [`rule::MappingRule`]s, one per
//! attribute (or per coupled attribute group such as REPEAT/DURATION). The
//! drivers below just run the slice; no rule knows about any other. Import
//! never fails: whatever cannot be interpreted is dropped with a
//! [`ConversionWarning`]. Export first removes every occurrence a rule
//! claims, so exporting twice into the same component changes nothing.

mod alarm;
mod event;
pub mod rule;
pub mod timezone;

use calbind_core::config::DecodeOptions;
use calbind_core::model::{Alarm, Event};

use crate::cal::core::ParsedComponent;
use crate::cal::warning::ConversionWarning;

/// Imports a VALARM component into an [`Alarm`].
#[tracing::instrument(skip_all)]
#[must_use]
pub fn import_alarm(
    component: &ParsedComponent,
    options: &DecodeOptions,
) -> (Alarm, Vec<ConversionWarning>) {
    let mut target = Alarm::default();
    let mut warnings = Vec::new();
    for rule in alarm::RULES {
        rule.import(component, &mut target, options, &mut warnings);
    }
    (target, warnings)
}

/// Exports an [`Alarm`] into a component, replacing any claimed occurrences
/// already present.
pub fn export_alarm(source: &Alarm, component: &mut ParsedComponent) {
    for rule in alarm::RULES {
        for name in rule.claims() {
            component.remove_properties(name);
        }
        rule.export(source, component);
    }
}

/// Imports a VEVENT component into an [`Event`], including its nested or
/// legacy property-borne alarms.
#[tracing::instrument(skip_all)]
#[must_use]
pub fn import_event(
    component: &ParsedComponent,
    options: &DecodeOptions,
) -> (Event, Vec<ConversionWarning>) {
    let mut target = Event::default();
    let mut warnings = Vec::new();
    for rule in event::RULES {
        rule.import(component, &mut target, options, &mut warnings);
    }
    (target, warnings)
}

/// Exports an [`Event`] into a component, replacing any claimed occurrences
/// and alarm children already present.
pub fn export_event(source: &Event, component: &mut ParsedComponent) {
    for rule in event::RULES {
        for name in rule.claims() {
            component.remove_properties(name);
        }
        rule.export(source, component);
    }
}

#[cfg(test)]
mod tests {
    use calbind_core::model::{AlarmAction, Attachment, TriggerEdge};
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::cal::core::{PropertyOccurrence, Value};

    fn alarm_component(lines: &[(&str, PropertyOccurrence)]) -> ParsedComponent {
        let mut component = ParsedComponent::new("VALARM");
        for (_, occurrence) in lines {
            component.push_property(occurrence.clone());
        }
        component
    }

    #[test_log::test]
    fn import_display_alarm() {
        let mut component = ParsedComponent::new("VALARM");
        component.push_property(PropertyOccurrence::text("ACTION", "DISPLAY"));
        component.push_property(PropertyOccurrence::duration(
            "TRIGGER",
            crate::cal::core::Duration {
                negative: true,
                minutes: 15,
                ..crate::cal::core::Duration::zero()
            },
        ));
        component.push_property(PropertyOccurrence::text("DESCRIPTION", "Starts soon"));

        let (alarm, warnings) = import_alarm(&component, &DecodeOptions::default());
        assert!(warnings.is_empty());
        assert_eq!(alarm.action, Some(AlarmAction::Display));
        assert_eq!(alarm.trigger.duration, Some(Duration::minutes(-15)));
        assert!(alarm.trigger.related.is_none());
        assert_eq!(alarm.description.as_deref(), Some("Starts soon"));
    }

    #[test_log::test]
    fn unknown_action_warns_but_keeps_the_rest() {
        let component = alarm_component(&[
            ("a", PropertyOccurrence::text("ACTION", "BEEP")),
            ("d", PropertyOccurrence::text("DESCRIPTION", "kept")),
        ]);
        let (alarm, warnings) = import_alarm(&component, &DecodeOptions::default());
        assert!(alarm.action.is_none());
        assert_eq!(alarm.description.as_deref(), Some("kept"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].property, "ACTION");
    }

    #[test_log::test]
    fn export_twice_is_idempotent() {
        let alarm = Alarm {
            action: Some(AlarmAction::Display),
            trigger: calbind_core::model::Trigger {
                duration: Some(Duration::minutes(-5)),
                related: Some(TriggerEdge::End),
                ..Default::default()
            },
            description: Some("soon".to_string()),
            ..Alarm::default()
        };

        let mut component = ParsedComponent::new("VALARM");
        export_alarm(&alarm, &mut component);
        let once = component.clone();
        export_alarm(&alarm, &mut component);
        assert_eq!(component, once);
        assert_eq!(component.properties_named("TRIGGER").len(), 1);
        assert_eq!(
            component
                .property("TRIGGER")
                .unwrap()
                .get_param_value("RELATED"),
            Some("END")
        );
    }

    #[test_log::test]
    fn alarm_round_trips_through_export_and_import() {
        let alarm = Alarm {
            action: Some(AlarmAction::Email),
            trigger: calbind_core::model::Trigger::absolute(
                Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            ),
            summary: Some("Subject".to_string()),
            attach: Some(Attachment::Uri("https://example.com/note".to_string())),
            ..Alarm::default()
        };

        let mut component = ParsedComponent::new("VALARM");
        export_alarm(&alarm, &mut component);
        let (back, warnings) = import_alarm(&component, &DecodeOptions::default());
        assert!(warnings.is_empty());
        assert_eq!(back, alarm);
    }

    #[test_log::test]
    fn repeat_without_duration_is_a_cross_field_warning() {
        let component = alarm_component(&[("r", PropertyOccurrence::integer("REPEAT", 2))]);
        let (alarm, warnings) = import_alarm(&component, &DecodeOptions::default());
        assert!(alarm.repeat.is_none());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].property, "REPEAT");
        assert_eq!(warnings[0].related.as_deref(), Some("DURATION"));
    }

    #[test_log::test]
    fn extension_properties_survive_import_and_export() {
        let mut component = ParsedComponent::new("VALARM");
        component.push_property(PropertyOccurrence::extension("X-SNOOZE-LIMIT", "3"));

        let (alarm, warnings) = import_alarm(&component, &DecodeOptions::default());
        assert!(warnings.is_empty());
        assert_eq!(alarm.extended.len(), 1);
        assert_eq!(alarm.extended[0].name, "X-SNOOZE-LIMIT");

        let mut out = ParsedComponent::new("VALARM");
        export_alarm(&alarm, &mut out);
        assert_eq!(
            out.property("X-SNOOZE-LIMIT").unwrap().value,
            Value::Unknown("3".to_string())
        );
    }

    #[test_log::test]
    fn import_event_collects_nested_alarms() {
        let mut event_component = ParsedComponent::new("VEVENT");
        event_component.push_property(PropertyOccurrence::text("UID", "1@example.com"));
        let mut alarm_component = ParsedComponent::new("VALARM");
        alarm_component.push_property(PropertyOccurrence::text("ACTION", "DISPLAY"));
        event_component.children.push(alarm_component);

        let (event, warnings) = import_event(&event_component, &DecodeOptions::default());
        assert!(warnings.is_empty());
        assert_eq!(event.uid.as_deref(), Some("1@example.com"));
        assert_eq!(event.alarms.len(), 1);
        assert_eq!(event.alarms[0].action, Some(AlarmAction::Display));
    }

    #[test_log::test]
    fn import_event_reads_legacy_alarm_properties() {
        let mut component = ParsedComponent::new("VEVENT");
        component.push_property(PropertyOccurrence::text(
            "AALARM",
            "20240101T085000Z;PT5M;2;beep.wav",
        ));

        let (event, warnings) = import_event(&component, &DecodeOptions::default());
        assert!(warnings.is_empty());
        assert_eq!(event.alarms.len(), 1);

        let alarm = &event.alarms[0];
        assert_eq!(alarm.action, Some(AlarmAction::Audio));
        assert_eq!(
            alarm.trigger.date_time,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 50, 0).unwrap())
        );
        let repeat = alarm.repeat.as_ref().unwrap();
        assert_eq!(repeat.count, 2);
        assert_eq!(repeat.gap, Duration::minutes(5));
        assert_eq!(alarm.attach, Some(Attachment::Uri("beep.wav".to_string())));
    }

    #[test_log::test]
    fn export_event_writes_nested_alarm_form() {
        let event = Event {
            uid: Some("1".to_string()),
            alarms: vec![Alarm {
                action: Some(AlarmAction::Display),
                ..Alarm::default()
            }],
            ..Event::default()
        };

        let mut component = ParsedComponent::new("VEVENT");
        export_event(&event, &mut component);
        assert_eq!(component.children_named("VALARM").len(), 1);

        // A second export replaces, not appends.
        export_event(&event, &mut component);
        assert_eq!(component.children_named("VALARM").len(), 1);
    }
}
