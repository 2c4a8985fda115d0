//! Domain model for calendar entities.
//!
//! These types are what applications work with; they carry no knowledge of
//! the wire format. The `calbind-rfc` crate maps between these and
//! iCalendar/vCalendar components.

pub mod alarm;
pub mod event;
pub mod extended;

pub use alarm::{Alarm, AlarmAction, Attachment, RepeatRule, Trigger, TriggerEdge};
pub use event::{Event, EventTime, Transparency};
pub use extended::{ExtendedParameter, ExtendedProperty};
