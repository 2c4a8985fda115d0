//! End-to-end import/export over parsed documents.

use calbind_core::DecodeOptions;
use calbind_core::model::{Alarm, AlarmAction, Event, EventTime, Transparency, Trigger, TriggerEdge};
use chrono::{Duration, TimeZone, Utc};

use super::fixtures;
use crate::cal::build::serialize;
use crate::cal::core::{Document, ParsedComponent};
use crate::cal::map;
use crate::cal::parse::parse;

fn first_event(input: &str, options: &DecodeOptions) -> ParsedComponent {
    let outcome = parse(input, options).unwrap();
    outcome.document.root.children[0].clone()
}

#[test_log::test]
fn absolute_trigger_resolves_to_an_instant() {
    let options = DecodeOptions::default();
    let event = first_event(fixtures::ABSOLUTE_TRIGGER, &options);
    let (alarm, warnings) = map::import_alarm(&event.children[0], &options);

    assert!(warnings.is_empty());
    assert_eq!(alarm.action, Some(AlarmAction::Audio));
    assert_eq!(
        alarm.trigger.date_time,
        Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap())
    );
    assert!(alarm.trigger.duration.is_none());
}

#[test_log::test]
fn relative_trigger_keeps_offset_and_edge() {
    let options = DecodeOptions::default();

    let event = first_event(fixtures::EVENT_WITH_ALARM, &options);
    let (alarm, warnings) = map::import_alarm(&event.children[0], &options);
    assert!(warnings.is_empty());
    assert_eq!(alarm.trigger.duration, Some(Duration::minutes(-15)));
    assert!(alarm.trigger.date_time.is_none());
    assert!(alarm.trigger.related.is_none());

    let event = first_event(fixtures::END_RELATED_TRIGGER, &options);
    let (alarm, warnings) = map::import_alarm(&event.children[0], &options);
    assert!(warnings.is_empty());
    assert_eq!(alarm.trigger.duration, Some(Duration::minutes(-5)));
    assert_eq!(alarm.trigger.related, Some(TriggerEdge::End));
}

#[test_log::test]
fn repeat_needs_its_duration_partner() {
    let options = DecodeOptions::default();

    let event = first_event(fixtures::REPEAT_WITHOUT_DURATION, &options);
    let (alarm, warnings) = map::import_alarm(&event.children[0], &options);
    assert!(alarm.repeat.is_none());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].property, "REPEAT");
    assert_eq!(warnings[0].related.as_deref(), Some("DURATION"));

    let event = first_event(fixtures::REPEAT_WITH_DURATION, &options);
    let (alarm, warnings) = map::import_alarm(&event.children[0], &options);
    assert!(warnings.is_empty());
    let repeat = alarm.repeat.unwrap();
    assert_eq!(repeat.count, 2);
    assert_eq!(repeat.gap, Duration::minutes(5));
}

#[test_log::test]
fn extension_fields_pass_through_the_domain_object() {
    let options = DecodeOptions::default();
    let event_component = first_event(fixtures::EXTENSION_PASSTHROUGH, &options);
    let (event, warnings) = map::import_event(&event_component, &options);

    assert!(warnings.is_empty());
    assert_eq!(event.extended.len(), 1);
    assert_eq!(event.extended[0].name, "X-CUSTOM-FIELD");
    assert_eq!(event.extended[0].value, "opaque \\, payload");
    assert_eq!(event.extended[0].param("X-ROLE"), Some("primary"));

    let mut out = ParsedComponent::new("VEVENT");
    map::export_event(&event, &mut out);
    let ext = out.property("X-CUSTOM-FIELD").unwrap();
    assert_eq!(ext.value.as_unknown(), Some("opaque \\, payload"));
}

#[test_log::test]
fn unclaimed_recognized_properties_survive_the_domain_object() {
    let options = DecodeOptions::default();
    let input = "BEGIN:VCALENDAR\r\n\
        VERSION:2.0\r\n\
        PRODID:-//Calbind//Calbind//EN\r\n\
        BEGIN:VEVENT\r\n\
        UID:evt-7@example.com\r\n\
        PRIORITY:5\r\n\
        STATUS:CONFIRMED\r\n\
        CATEGORIES:WORK,FINANCE\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";
    let event_component = first_event(input, &options);
    let (event, warnings) = map::import_event(&event_component, &options);

    assert!(warnings.is_empty());
    let names: Vec<_> = event.extended.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["PRIORITY", "STATUS", "CATEGORIES"]);
    assert_eq!(event.extended[0].value, "5");
    assert_eq!(event.extended[2].value, "WORK,FINANCE");

    let mut out = ParsedComponent::new("VEVENT");
    map::export_event(&event, &mut out);
    assert_eq!(out.property("PRIORITY").unwrap().value.as_unknown(), Some("5"));
    assert_eq!(
        out.property("STATUS").unwrap().value.as_unknown(),
        Some("CONFIRMED")
    );
}

#[test_log::test]
fn legacy_calendar_imports_a_property_borne_alarm() {
    let options = DecodeOptions::default();
    let event_component = first_event(fixtures::LEGACY_VCALENDAR, &options);
    let (event, warnings) = map::import_event(&event_component, &options);

    assert!(warnings.is_empty());
    assert_eq!(event.summary.as_deref(), Some("Dentist"));
    assert_eq!(event.alarms.len(), 1);

    let alarm = &event.alarms[0];
    assert_eq!(alarm.action, Some(AlarmAction::Audio));
    assert_eq!(
        alarm.trigger.date_time,
        Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 45, 0).unwrap())
    );
    assert_eq!(alarm.repeat.as_ref().unwrap().count, 1);
}

#[test_log::test]
fn event_round_trips_through_the_wire() {
    let options = DecodeOptions::default();
    let event = Event {
        uid: Some("round@example.com".to_string()),
        summary: Some("Budget, planning; part 1".to_string()),
        description: Some("Bring the Q3\nnumbers".to_string()),
        location: Some("HQ".to_string()),
        start: Some(EventTime::Utc(
            Utc.with_ymd_and_hms(2024, 9, 2, 13, 0, 0).unwrap(),
        )),
        end: Some(EventTime::Utc(
            Utc.with_ymd_and_hms(2024, 9, 2, 14, 0, 0).unwrap(),
        )),
        transparency: Some(Transparency::Transparent),
        alarms: vec![Alarm {
            action: Some(AlarmAction::Display),
            trigger: Trigger::relative(Duration::minutes(-10)),
            description: Some("Soon".to_string()),
            ..Alarm::default()
        }],
        ..Event::default()
    };

    let mut document = Document::new("2.0", "-//Calbind//Calbind//EN");
    let mut component = ParsedComponent::new("VEVENT");
    map::export_event(&event, &mut component);
    document.root.children.push(component);

    let wire = serialize(&document);
    let outcome = parse(&wire, &options).unwrap();
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);

    let (back, warnings) = map::import_event(&outcome.document.root.children[0], &options);
    assert!(warnings.is_empty());
    assert_eq!(back, event);
}

#[test_log::test]
fn all_day_event_round_trips_as_a_date() {
    let options = DecodeOptions::default();
    let event = Event {
        uid: Some("allday@example.com".to_string()),
        start: Some(EventTime::Date(
            chrono::NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
        )),
        ..Event::default()
    };

    let mut document = Document::new("2.0", "-//Calbind//Calbind//EN");
    let mut component = ParsedComponent::new("VEVENT");
    map::export_event(&event, &mut component);
    document.root.children.push(component);

    let wire = serialize(&document);
    assert!(wire.contains("DTSTART;VALUE=DATE:20241224\r\n"));

    let outcome = parse(&wire, &options).unwrap();
    let (back, warnings) = map::import_event(&outcome.document.root.children[0], &options);
    assert!(warnings.is_empty());
    assert_eq!(back.start, event.start);
}
