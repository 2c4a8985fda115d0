//! Legacy vCalendar 1.0 grammar tables.
//!
//! The 1.0 format has no nested alarm or timezone components: DAYLIGHT and
//! TZ are root-level properties, and alarm data travels in AALARM/DALARM
//! property lines on the event itself. Its recurrence syntax predates RFC
//! 5545 RECUR, so RRULE is kept as an opaque text token.

use super::{
    Alternative, ComponentDescriptor, Encoding, ParameterDescriptor, PropertyDescriptor,
    ValueShape,
};
use crate::cal::core::TypeTag;

use Alternative as Alt;
use ParameterDescriptor as Param;
use PropertyDescriptor as Prop;

const fn fixed(alt: Alternative) -> ValueShape {
    ValueShape::Fixed(alt)
}

const fn one_of(alts: &'static [Alternative]) -> ValueShape {
    ValueShape::OneOf(alts)
}

const VALUE: Param = Param::token("VALUE");
const ENCODING: Param = Param::token("ENCODING");
const TYPE: Param = Param::token("TYPE");

const ATTACH_ALTS: &[Alt] = &[
    Alt::of(TypeTag::Uri),
    Alt::binary(&[Encoding::Base64, Encoding::QuotedPrintable]),
];

const UID: Prop = Prop::singleton("UID", fixed(Alt::of(TypeTag::Text)), &[]);
const SUMMARY: Prop = Prop::singleton("SUMMARY", fixed(Alt::of(TypeTag::Text)), &[]);
const DESCRIPTION: Prop = Prop::singleton("DESCRIPTION", fixed(Alt::of(TypeTag::Text)), &[]);
const LOCATION: Prop = Prop::singleton("LOCATION", fixed(Alt::of(TypeTag::Text)), &[]);
const DTSTART: Prop = Prop::singleton("DTSTART", fixed(Alt::of(TypeTag::DateTime)), &[]);
const STATUS: Prop = Prop::singleton("STATUS", fixed(Alt::of(TypeTag::Text)), &[]);
const CLASS: Prop = Prop::singleton("CLASS", fixed(Alt::of(TypeTag::Text)), &[]);
const PRIORITY: Prop = Prop::singleton("PRIORITY", fixed(Alt::of(TypeTag::Integer)), &[]);
const CATEGORIES: Prop =
    Prop::repeatable("CATEGORIES", fixed(Alt::list_of(TypeTag::Text)), &[]);
const RRULE: Prop = Prop::singleton("RRULE", fixed(Alt::of(TypeTag::Text)), &[]);
const EXDATE: Prop = Prop::repeatable("EXDATE", fixed(Alt::list_of(TypeTag::DateTime)), &[]);
const ATTACH: Prop = Prop::repeatable("ATTACH", one_of(ATTACH_ALTS), &[VALUE, ENCODING, TYPE]);
// Alarm properties: semicolon-structured text, interpreted by the mapping
// layer (run time; snooze gap; repeat count; payload).
const AALARM: Prop = Prop::repeatable("AALARM", fixed(Alt::of(TypeTag::Text)), &[TYPE, VALUE]);
const DALARM: Prop = Prop::repeatable("DALARM", fixed(Alt::of(TypeTag::Text)), &[TYPE, VALUE]);

static VEVENT: ComponentDescriptor = ComponentDescriptor {
    name: "VEVENT",
    properties: &[
        UID,
        SUMMARY,
        DESCRIPTION,
        LOCATION,
        DTSTART,
        Prop::singleton("DTEND", fixed(Alt::of(TypeTag::DateTime)), &[]),
        STATUS,
        CLASS,
        PRIORITY,
        // vCalendar 1.0 TRANSP is a numeric level, not OPAQUE/TRANSPARENT.
        Prop::singleton("TRANSP", fixed(Alt::of(TypeTag::Integer)), &[]),
        CATEGORIES,
        RRULE,
        EXDATE,
        ATTACH,
        AALARM,
        DALARM,
    ],
    children: &[],
};

static VTODO: ComponentDescriptor = ComponentDescriptor {
    name: "VTODO",
    properties: &[
        UID,
        SUMMARY,
        DESCRIPTION,
        DTSTART,
        Prop::singleton("DUE", fixed(Alt::of(TypeTag::DateTime)), &[]),
        Prop::singleton("COMPLETED", fixed(Alt::of(TypeTag::DateTime)), &[]),
        STATUS,
        CLASS,
        PRIORITY,
        CATEGORIES,
        RRULE,
        EXDATE,
        ATTACH,
        AALARM,
        DALARM,
    ],
    children: &[],
};

pub(super) static ROOT: ComponentDescriptor = ComponentDescriptor {
    name: "VCALENDAR",
    properties: &[
        Prop::singleton("VERSION", fixed(Alt::of(TypeTag::Text)), &[]),
        Prop::singleton("PRODID", fixed(Alt::of(TypeTag::Text)), &[]),
        Prop::singleton("GEO", fixed(Alt::of(TypeTag::Geo)), &[]),
        Prop::singleton("TZ", fixed(Alt::of(TypeTag::UtcOffset)), &[]),
        Prop::repeatable("DAYLIGHT", fixed(Alt::of(TypeTag::Text)), &[]),
    ],
    children: &[&VEVENT, &VTODO],
};
