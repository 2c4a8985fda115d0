//! Shared wire-text fixtures.

/// A well-formed 2.0 calendar with a display alarm on the event.
pub const EVENT_WITH_ALARM: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Calbind//Calbind//EN\r\n\
BEGIN:VEVENT\r\n\
UID:evt-1@example.com\r\n\
DTSTART:20240601T090000Z\r\n\
DTEND:20240601T100000Z\r\n\
SUMMARY:Design review\r\n\
LOCATION:Room 4\r\n\
TRANSP:OPAQUE\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT15M\r\n\
DESCRIPTION:Starts in 15 minutes\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// An alarm triggering at an absolute UTC instant.
pub const ABSOLUTE_TRIGGER: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Calbind//Calbind//EN\r\n\
BEGIN:VEVENT\r\n\
UID:evt-2@example.com\r\n\
BEGIN:VALARM\r\n\
ACTION:AUDIO\r\n\
TRIGGER;VALUE=DATE-TIME:20240601T083000Z\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// A relative trigger anchored to the end of the event.
pub const END_RELATED_TRIGGER: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Calbind//Calbind//EN\r\n\
BEGIN:VEVENT\r\n\
UID:evt-3@example.com\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER;RELATED=END:-PT5M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// REPEAT without its DURATION partner.
pub const REPEAT_WITHOUT_DURATION: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Calbind//Calbind//EN\r\n\
BEGIN:VEVENT\r\n\
UID:evt-4@example.com\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT10M\r\n\
REPEAT:2\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// A complete repeat schedule.
pub const REPEAT_WITH_DURATION: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Calbind//Calbind//EN\r\n\
BEGIN:VEVENT\r\n\
UID:evt-5@example.com\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT10M\r\n\
REPEAT:2\r\n\
DURATION:PT5M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Non-standard properties that must survive untouched.
pub const EXTENSION_PASSTHROUGH: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Calbind//Calbind//EN\r\n\
BEGIN:VEVENT\r\n\
UID:evt-6@example.com\r\n\
X-CUSTOM-FIELD;X-ROLE=primary:opaque \\, payload\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// A legacy 1.0 calendar with a property-borne audio alarm.
pub const LEGACY_VCALENDAR: &str = "BEGIN:VCALENDAR\r\n\
VERSION:1.0\r\n\
PRODID:-//Calbind//Calbind//EN\r\n\
BEGIN:VEVENT\r\n\
UID:legacy-1\r\n\
DTSTART:20240601T090000Z\r\n\
SUMMARY:Dentist\r\n\
AALARM:20240601T084500Z;PT5M;1;reminder.wav\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Builds a calendar with `valid` well-formed events and one event whose
/// DTSTART does not decode.
#[must_use]
pub fn calendar_with_one_bad_event(valid: usize) -> String {
    let mut out = String::from(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Calbind//Calbind//EN\r\n",
    );
    for i in 0..valid {
        out.push_str(&format!(
            "BEGIN:VEVENT\r\nUID:ok-{i}@example.com\r\nDTSTART:20240601T0{}0000Z\r\nSUMMARY:Event {i}\r\nEND:VEVENT\r\n",
            i % 10
        ));
    }
    out.push_str(
        "BEGIN:VEVENT\r\nUID:bad@example.com\r\nDTSTART:never\r\nSUMMARY:Broken start\r\nEND:VEVENT\r\n",
    );
    out.push_str("END:VCALENDAR\r\n");
    out
}
