//! iCalendar 2.0 grammar tables (RFC 5545).

use super::{
    Alternative, ComponentDescriptor, Encoding, ParameterDescriptor, PropertyDescriptor,
    ValueShape,
};
use crate::cal::core::TypeTag;

use Alternative as Alt;
use ParameterDescriptor as Param;
use PropertyDescriptor as Prop;

// Local shorthand so the tables below stay readable.
const fn fixed(alt: Alternative) -> ValueShape {
    ValueShape::Fixed(alt)
}

const fn one_of(alts: &'static [Alternative]) -> ValueShape {
    ValueShape::OneOf(alts)
}

const VALUE: Param = Param::token("VALUE");
const TZID: Param = Param::token("TZID");
const LANGUAGE: Param = Param::token("LANGUAGE");
const ALTREP: Param = Param::uri("ALTREP");
const ENCODING: Param = Param::token("ENCODING");
const FMTTYPE: Param = Param::token("FMTTYPE");
const RELATED: Param = Param::token("RELATED");
const RELTYPE: Param = Param::token("RELTYPE");
const RANGE: Param = Param::token("RANGE");
const FBTYPE: Param = Param::token("FBTYPE");
const CN: Param = Param::token("CN");
const ROLE: Param = Param::token("ROLE");
const PARTSTAT: Param = Param::token("PARTSTAT");
const RSVP: Param = Param::token("RSVP");
const CUTYPE: Param = Param::token("CUTYPE");
const MEMBER: Param = Param::cal_address("MEMBER");
const DELEGATED_FROM: Param = Param::cal_address("DELEGATED-FROM");
const DELEGATED_TO: Param = Param::cal_address("DELEGATED-TO");
const SENT_BY: Param = Param::cal_address("SENT-BY");
const DIR: Param = Param::uri("DIR");

const TEXT_PARAMS: &[Param] = &[LANGUAGE, ALTREP];
const DT_PARAMS: &[Param] = &[VALUE, TZID];
const ATTENDEE_PARAMS: &[Param] = &[
    CN,
    ROLE,
    PARTSTAT,
    RSVP,
    CUTYPE,
    MEMBER,
    DELEGATED_FROM,
    DELEGATED_TO,
    SENT_BY,
    DIR,
    LANGUAGE,
];

const DATE_OR_DATETIME: &[Alt] = &[Alt::of(TypeTag::DateTime), Alt::of(TypeTag::Date)];
const DT_LISTS: &[Alt] = &[Alt::list_of(TypeTag::DateTime), Alt::list_of(TypeTag::Date)];
const RDATE_ALTS: &[Alt] = &[
    Alt::list_of(TypeTag::DateTime),
    Alt::list_of(TypeTag::Date),
    Alt::list_of(TypeTag::Period),
];
const ATTACH_ALTS: &[Alt] = &[Alt::of(TypeTag::Uri), Alt::binary(&[Encoding::Base64])];
// The RFC default interpretation (relative offset) is declared first.
const TRIGGER_ALTS: &[Alt] = &[Alt::of(TypeTag::Duration), Alt::of(TypeTag::DateTime)];

const UID: Prop = Prop::singleton("UID", fixed(Alt::of(TypeTag::Text)), &[]);
const DTSTAMP: Prop = Prop::singleton("DTSTAMP", fixed(Alt::of(TypeTag::DateTime)), &[]);
const DTSTART: Prop = Prop::singleton("DTSTART", one_of(DATE_OR_DATETIME), DT_PARAMS);
const DTEND: Prop = Prop::singleton("DTEND", one_of(DATE_OR_DATETIME), DT_PARAMS);
const DUE: Prop = Prop::singleton("DUE", one_of(DATE_OR_DATETIME), DT_PARAMS);
const DURATION: Prop = Prop::singleton("DURATION", fixed(Alt::of(TypeTag::Duration)), &[]);
const SUMMARY: Prop = Prop::singleton("SUMMARY", fixed(Alt::of(TypeTag::Text)), TEXT_PARAMS);
const DESCRIPTION: Prop =
    Prop::singleton("DESCRIPTION", fixed(Alt::of(TypeTag::Text)), TEXT_PARAMS);
const LOCATION: Prop = Prop::singleton("LOCATION", fixed(Alt::of(TypeTag::Text)), TEXT_PARAMS);
const GEO: Prop = Prop::singleton("GEO", fixed(Alt::of(TypeTag::Geo)), &[]);
const CLASS: Prop = Prop::singleton("CLASS", fixed(Alt::of(TypeTag::Text)), &[]);
const PRIORITY: Prop = Prop::singleton("PRIORITY", fixed(Alt::of(TypeTag::Integer)), &[]);
const SEQUENCE: Prop = Prop::singleton("SEQUENCE", fixed(Alt::of(TypeTag::Integer)), &[]);
const STATUS: Prop = Prop::singleton("STATUS", fixed(Alt::of(TypeTag::Text)), &[]);
const TRANSP: Prop = Prop::singleton("TRANSP", fixed(Alt::of(TypeTag::Text)), &[]);
const URL: Prop = Prop::singleton("URL", fixed(Alt::of(TypeTag::Uri)), &[]);
const RRULE: Prop = Prop::singleton("RRULE", fixed(Alt::of(TypeTag::Recur)), &[]);
const EXDATE: Prop = Prop::repeatable("EXDATE", one_of(DT_LISTS), DT_PARAMS);
const RDATE: Prop = Prop::repeatable("RDATE", one_of(RDATE_ALTS), DT_PARAMS);
const RECURRENCE_ID: Prop =
    Prop::singleton("RECURRENCE-ID", one_of(DATE_OR_DATETIME), &[VALUE, TZID, RANGE]);
const ATTENDEE: Prop = Prop::repeatable(
    "ATTENDEE",
    fixed(Alt::of(TypeTag::CalAddress)),
    ATTENDEE_PARAMS,
);
const ORGANIZER: Prop = Prop::singleton(
    "ORGANIZER",
    fixed(Alt::of(TypeTag::CalAddress)),
    &[CN, SENT_BY, DIR, LANGUAGE],
);
const CATEGORIES: Prop =
    Prop::repeatable("CATEGORIES", fixed(Alt::list_of(TypeTag::Text)), &[LANGUAGE]);
const RESOURCES: Prop =
    Prop::repeatable("RESOURCES", fixed(Alt::list_of(TypeTag::Text)), TEXT_PARAMS);
const COMMENT: Prop = Prop::repeatable("COMMENT", fixed(Alt::of(TypeTag::Text)), TEXT_PARAMS);
const CONTACT: Prop = Prop::repeatable("CONTACT", fixed(Alt::of(TypeTag::Text)), TEXT_PARAMS);
const RELATED_TO: Prop =
    Prop::repeatable("RELATED-TO", fixed(Alt::of(TypeTag::Text)), &[RELTYPE]);
const ATTACH: Prop =
    Prop::repeatable("ATTACH", one_of(ATTACH_ALTS), &[VALUE, ENCODING, FMTTYPE]);
const CREATED: Prop = Prop::singleton("CREATED", fixed(Alt::of(TypeTag::DateTime)), &[]);
const LAST_MODIFIED: Prop =
    Prop::singleton("LAST-MODIFIED", fixed(Alt::of(TypeTag::DateTime)), &[]);
const PERCENT_COMPLETE: Prop =
    Prop::singleton("PERCENT-COMPLETE", fixed(Alt::of(TypeTag::Integer)), &[]);
const COMPLETED: Prop = Prop::singleton("COMPLETED", fixed(Alt::of(TypeTag::DateTime)), &[]);
const FREEBUSY: Prop =
    Prop::repeatable("FREEBUSY", fixed(Alt::list_of(TypeTag::Period)), &[FBTYPE]);

static VALARM: ComponentDescriptor = ComponentDescriptor {
    name: "VALARM",
    properties: &[
        Prop::singleton("ACTION", fixed(Alt::of(TypeTag::Text)), &[]),
        Prop::singleton("TRIGGER", one_of(TRIGGER_ALTS), &[VALUE, TZID, RELATED]),
        Prop::singleton("REPEAT", fixed(Alt::of(TypeTag::Integer)), &[]),
        DURATION,
        DESCRIPTION,
        SUMMARY,
        Prop::repeatable("ATTACH", one_of(ATTACH_ALTS), &[VALUE, ENCODING, FMTTYPE]),
        ATTENDEE,
    ],
    children: &[],
};

static VEVENT: ComponentDescriptor = ComponentDescriptor {
    name: "VEVENT",
    properties: &[
        UID,
        DTSTAMP,
        DTSTART,
        DTEND,
        DURATION,
        SUMMARY,
        DESCRIPTION,
        LOCATION,
        GEO,
        CLASS,
        PRIORITY,
        SEQUENCE,
        STATUS,
        TRANSP,
        URL,
        RRULE,
        EXDATE,
        RDATE,
        RECURRENCE_ID,
        ATTENDEE,
        ORGANIZER,
        CATEGORIES,
        RESOURCES,
        COMMENT,
        CONTACT,
        RELATED_TO,
        ATTACH,
        CREATED,
        LAST_MODIFIED,
    ],
    children: &[&VALARM],
};

static VTODO: ComponentDescriptor = ComponentDescriptor {
    name: "VTODO",
    properties: &[
        UID,
        DTSTAMP,
        DTSTART,
        DUE,
        COMPLETED,
        DURATION,
        SUMMARY,
        DESCRIPTION,
        LOCATION,
        GEO,
        CLASS,
        PRIORITY,
        SEQUENCE,
        STATUS,
        PERCENT_COMPLETE,
        URL,
        RRULE,
        EXDATE,
        RDATE,
        RECURRENCE_ID,
        ATTENDEE,
        ORGANIZER,
        CATEGORIES,
        RESOURCES,
        COMMENT,
        CONTACT,
        RELATED_TO,
        ATTACH,
        CREATED,
        LAST_MODIFIED,
    ],
    children: &[&VALARM],
};

static VJOURNAL: ComponentDescriptor = ComponentDescriptor {
    name: "VJOURNAL",
    properties: &[
        UID,
        DTSTAMP,
        DTSTART,
        SUMMARY,
        Prop::repeatable("DESCRIPTION", fixed(Alt::of(TypeTag::Text)), TEXT_PARAMS),
        CLASS,
        STATUS,
        SEQUENCE,
        URL,
        RRULE,
        EXDATE,
        RDATE,
        RECURRENCE_ID,
        ATTENDEE,
        ORGANIZER,
        CATEGORIES,
        COMMENT,
        CONTACT,
        RELATED_TO,
        ATTACH,
        CREATED,
        LAST_MODIFIED,
    ],
    children: &[],
};

static VFREEBUSY: ComponentDescriptor = ComponentDescriptor {
    name: "VFREEBUSY",
    properties: &[
        UID, DTSTAMP, DTSTART, DTEND, ORGANIZER, ATTENDEE, FREEBUSY, URL, COMMENT, CONTACT,
    ],
    children: &[],
};

static TZ_OBSERVANCE_PROPS: &[Prop] = &[
    Prop::singleton("DTSTART", fixed(Alt::of(TypeTag::DateTime)), &[]),
    Prop::singleton("TZOFFSETFROM", fixed(Alt::of(TypeTag::UtcOffset)), &[]),
    Prop::singleton("TZOFFSETTO", fixed(Alt::of(TypeTag::UtcOffset)), &[]),
    RRULE,
    RDATE,
    Prop::repeatable("TZNAME", fixed(Alt::of(TypeTag::Text)), &[LANGUAGE]),
    COMMENT,
];

static STANDARD: ComponentDescriptor = ComponentDescriptor {
    name: "STANDARD",
    properties: TZ_OBSERVANCE_PROPS,
    children: &[],
};

static DAYLIGHT: ComponentDescriptor = ComponentDescriptor {
    name: "DAYLIGHT",
    properties: TZ_OBSERVANCE_PROPS,
    children: &[],
};

static VTIMEZONE: ComponentDescriptor = ComponentDescriptor {
    name: "VTIMEZONE",
    properties: &[
        Prop::singleton("TZID", fixed(Alt::of(TypeTag::Text)), &[]),
        LAST_MODIFIED,
        Prop::singleton("TZURL", fixed(Alt::of(TypeTag::Uri)), &[]),
    ],
    children: &[&STANDARD, &DAYLIGHT],
};

pub(super) static ROOT: ComponentDescriptor = ComponentDescriptor {
    name: "VCALENDAR",
    properties: &[
        Prop::singleton("VERSION", fixed(Alt::of(TypeTag::Text)), &[]),
        Prop::singleton("PRODID", fixed(Alt::of(TypeTag::Text)), &[]),
        Prop::singleton("CALSCALE", fixed(Alt::of(TypeTag::Text)), &[]),
        Prop::singleton("METHOD", fixed(Alt::of(TypeTag::Text)), &[]),
    ],
    children: &[&VEVENT, &VTODO, &VJOURNAL, &VFREEBUSY, &VTIMEZONE],
};
